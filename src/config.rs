use crate::video::{AudioMood, Resolution};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable overriding the configured server URL
pub const SERVER_URL_ENV: &str = "MONTAGE_SERVER_URL";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the montage service
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Resolution preselected in the video dropdown
    #[serde(default)]
    pub default_resolution: Resolution,
    /// Audio mood preselected in the video dropdown
    #[serde(default)]
    pub default_audio_mood: AudioMood,
    /// File name used when saving a rendered video without `--output`
    #[serde(default = "default_download_name")]
    pub download_name: String,
    /// UI theme: dark, light or nocolor
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_download_name() -> String {
    crate::view::DOWNLOAD_FILE_NAME.to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            default_resolution: Resolution::default(),
            default_audio_mood: AudioMood::default(),
            download_name: default_download_name(),
            theme: default_theme(),
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            // Blank values in a hand-edited file fall back to defaults
            if config.server_url.trim().is_empty() {
                config.server_url = default_server_url();
            }
            if config.download_name.trim().is_empty() {
                config.download_name = default_download_name();
            }

            Ok(config)
        } else {
            info!("Creating default config at {:?}", config_path);
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with secure permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // Set secure permissions (600: owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    /// Server URL, with `MONTAGE_SERVER_URL` taking precedence over the file
    pub fn effective_server_url(&self) -> String {
        match std::env::var(SERVER_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => self.server_url.clone(),
        }
    }
}
