// Component-based building blocks for the studio screen

pub mod component;
pub mod footer;
pub mod gallery;
pub mod header;
pub mod message_box;

pub use component::{Component, ComponentAction};
pub use gallery::GalleryComponent;
