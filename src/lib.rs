//! montage - turn your photos into videos from the terminal
//!
//! This library provides the client side of the montage service: account
//! handling, image upload, the image gallery and video rendering requests,
//! shared by the one-shot CLI commands and the interactive studio.

// Core modules
pub mod api;
pub mod cli;
pub mod components;
pub mod config;
pub mod controller;
pub mod session;
pub mod studio;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod video;
pub mod view;

// Re-exports for convenience
pub use api::{ApiClient, Backend};
pub use config::Config;
pub use controller::{Controller, Outcome};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use video::{AudioMood, Resolution, VideoOptions};
pub use view::{Page, Route, View};
