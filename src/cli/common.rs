//! Common CLI utilities shared across all CLI commands.
//!
//! This module provides:
//! - `CliContext`: loaded config plus a factory for controllers
//! - Output helpers: `print_success`, `print_error`, `print_warning`, `print_info`
//! - Prompt helpers: `prompt_string`, `prompt_password`

use crate::api::ApiClient;
use crate::cli::console_view::ConsoleView;
use crate::config::Config;
use crate::controller::Controller;
use crate::session::FileSessionStore;
use crate::view::Route;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;

/// Controller type every CLI command drives
pub type CliController = Controller<ApiClient, FileSessionStore, ConsoleView>;

/// Shared context for CLI commands.
pub struct CliContext {
    /// The loaded configuration
    pub config: Config,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Server the commands talk to (`--server` > `MONTAGE_SERVER_URL` > config)
    pub server_url: String,
}

impl CliContext {
    /// Load the CLI context, creating a default config on first run.
    pub fn load() -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;

        Ok(Self {
            server_url: config.effective_server_url(),
            config,
            config_path,
        })
    }

    /// Build a controller whose view shows `route`
    pub fn controller(&self, route: Route) -> Result<CliController> {
        let backend = ApiClient::new(&self.server_url)?;
        let session = FileSessionStore::open(&crate::utils::get_session_path())
            .context("Failed to open session")?;
        Ok(Controller::new(backend, session, ConsoleView::new(route)))
    }
}

/// Runtime for driving async handlers from synchronous commands
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to create tokio runtime")
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print a warning message with a warning sign prefix.
pub fn print_warning(msg: &str) {
    println!("\u{26A0}\u{FE0F} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}

// =============================================================================
// Prompt Helpers
// =============================================================================

/// Prompt the user for a string input with an optional default value.
///
/// # Returns
/// The user's input, or the default if they pressed Enter
pub fn prompt_string(label: &str, default: Option<&str>) -> Result<String> {
    if let Some(def) = default {
        print!("{} [{}]: ", label, def);
    } else {
        print!("{}: ", label);
    }
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Prompt for a password without echoing it.
pub fn prompt_password(label: &str) -> Result<String> {
    dialoguer::Password::new()
        .with_prompt(label)
        .allow_empty_password(true)
        .interact()
        .context("Failed to read password")
}

/// Use `value` when given, otherwise prompt until something non-empty is typed.
pub fn require_value(value: Option<String>, label: &str) -> Result<String> {
    if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
        return Ok(v.trim().to_string());
    }
    loop {
        let input = prompt_string(label, None)?;
        if !input.is_empty() {
            return Ok(input);
        }
        print_warning(&format!("{} cannot be empty", label));
    }
}
