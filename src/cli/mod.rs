//! Command-line interface.
//!
//! Each subcommand builds a controller over a [`ConsoleView`], runs one
//! handler and maps its outcome to the process exit status.

mod commands;
mod common;
pub mod completions;
mod console_view;

pub use commands::{Cli, Commands};
pub use common::*;
pub use console_view::ConsoleView;
