//! Client-local session persistence.
//!
//! The service hands out an opaque bearer token on login. The client keeps it,
//! together with the username it logged in with, in a small key-value store.
//! There is no expiry or refresh: the pair stays until logout removes it.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key the bearer token is stored under
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Key the logged-in username is stored under
pub const LOGGED_IN_USER_KEY: &str = "loggedInUser";

/// Key-value storage for session state.
///
/// Mirrors the small surface of a browser's local storage so handlers can be
/// exercised against an in-memory map in tests.
pub trait SessionStore {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a value (no-op when missing)
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Write several values as one update.
    ///
    /// Stores with a durable backing override this so that either every pair
    /// is written or none is.
    fn set_all(&mut self, pairs: &[(&str, &str)]) -> Result<()> {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Delete several values as one update; all-or-nothing like [`Self::set_all`]
    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Stored bearer token, if any
    fn token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY)
    }

    /// Stored username, if any
    fn username(&self) -> Option<String> {
        self.get(LOGGED_IN_USER_KEY)
    }

    /// Persist the result of a successful login
    fn store_login(&mut self, token: &str, username: &str) -> Result<()> {
        self.set_all(&[(ACCESS_TOKEN_KEY, token), (LOGGED_IN_USER_KEY, username)])
    }

    /// Forget both session keys
    fn clear(&mut self) -> Result<()> {
        self.remove_all(&[LOGGED_IN_USER_KEY, ACCESS_TOKEN_KEY])
    }
}

/// In-memory session store
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: BTreeMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a login
    pub fn logged_in(token: &str, username: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        entries.insert(LOGGED_IN_USER_KEY.to_string(), username.to_string());
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Session store backed by a JSON file.
///
/// Every update rewrites the whole file with owner-only permissions, since it
/// holds a bearer token in clear text. The in-memory map only changes once the
/// file write succeeded, so memory and disk never disagree.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileSessionStore {
    /// Open the store at `path`, starting empty when the file does not exist
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read session file: {:?}", path))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse session file: {:?}", path))?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened session store at {:?} ({} keys)", path, entries.len());
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `update` to a copy of the entries, persist it, then keep it
    fn commit(&mut self, update: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut next = self.entries.clone();
        update(&mut next);
        if next == self.entries {
            return Ok(());
        }
        Self::save(&self.path, &next)?;
        self.entries = next;
        Ok(())
    }

    fn save(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            if path.exists() {
                std::fs::remove_file(path)
                    .with_context(|| format!("Failed to remove session file: {:?}", path))?;
            }
            return Ok(());
        }

        let content = serde_json::to_string_pretty(entries)
            .context("Failed to serialize session")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create session directory: {:?}", parent))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write session file: {:?}", path))?;

        // 600: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)
                .with_context(|| format!("Failed to get file metadata: {:?}", path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", path))?;
        }

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_all(&[(key, value)])
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.remove_all(&[key])
    }

    fn set_all(&mut self, pairs: &[(&str, &str)]) -> Result<()> {
        self.commit(|entries| {
            for (key, value) in pairs {
                entries.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn remove_all(&mut self, keys: &[&str]) -> Result<()> {
        self.commit(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}

/// Short, log-safe preview of a token
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}
