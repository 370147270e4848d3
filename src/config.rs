//! Persisted configuration: the alias list
//!
//! The only state disk-mgr keeps between invocations is a list of
//! alias → filesystem UUID bindings stored as JSON:
//!
//! ```json
//! {"aliasList": [{"uuid": "0f3c9a4e-...", "alias": "backup"}]}
//! ```
//!
//! There is no locking around the file. Two invocations mutating aliases at
//! the same time race on read-modify-write and the last writer wins.

use crate::error::{DiskError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Name of the configuration file inside the configuration directory
pub const CONFIG_FILE: &str = "config.json";

/// Directory name used under the per-user configuration directory
pub const APP_DIR: &str = "disk-mgr";

/// One alias binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Filesystem UUID the alias points at
    pub uuid: String,
    /// User-chosen alias name, unique within the configuration
    pub alias: String,
}

impl AliasEntry {
    /// Create a new alias binding
    pub fn new<A: Into<String>, U: Into<String>>(alias: A, uuid: U) -> Self {
        Self {
            uuid: uuid.into(),
            alias: alias.into(),
        }
    }
}

/// Main persisted configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Alias bindings in insertion order
    #[serde(rename = "aliasList", default)]
    pub alias_list: Vec<AliasEntry>,
}

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an alias by exact (case-sensitive) name
    pub fn find_alias(&self, alias: &str) -> Option<&AliasEntry> {
        self.alias_list.iter().find(|a| a.alias == alias)
    }

    /// First alias, in file order, bound to `uuid`
    pub fn alias_for_uuid(&self, uuid: &str) -> Option<&AliasEntry> {
        self.alias_list.iter().find(|a| a.uuid == uuid)
    }

    /// Append an alias, refusing duplicate names
    pub fn add_alias(&mut self, entry: AliasEntry) -> Result<()> {
        if let Some(existing) = self.find_alias(&entry.alias) {
            return Err(DiskError::AliasExists {
                alias: existing.alias.clone(),
                uuid: existing.uuid.clone(),
            });
        }
        self.alias_list.push(entry);
        Ok(())
    }

    /// Remove an alias by name, returning the removed entry
    pub fn remove_alias(&mut self, alias: &str) -> Result<AliasEntry> {
        let index = self
            .alias_list
            .iter()
            .position(|a| a.alias == alias)
            .ok_or_else(|| DiskError::AliasNotFound(alias.to_string()))?;
        Ok(self.alias_list.remove(index))
    }
}

/// Location of the persisted [`Configuration`]
#[derive(Debug, Clone)]
pub struct AliasStore {
    dir: PathBuf,
}

impl AliasStore {
    /// Store rooted at an explicit directory
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the per-user configuration directory
    ///
    /// Uses `$XDG_CONFIG_HOME/disk-mgr` (or the platform equivalent), falling
    /// back to `~/.disk-mgr` when no configuration directory is known.
    pub fn user_default() -> Result<Self> {
        let dir = dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .or_else(|| dirs::home_dir().map(|h| h.join(format!(".{}", APP_DIR))))
            .ok_or_else(|| DiskError::config("could not determine a configuration directory"))?;
        Ok(Self::new(dir))
    }

    /// Full path of the configuration file
    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Load the configuration
    ///
    /// A missing, unreadable or corrupt file yields an empty configuration.
    pub fn load(&self) -> Configuration {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("No configuration read from {}: {}", path.display(), e);
                return Configuration::default();
            }
        };

        if content.trim().is_empty() {
            return Configuration::default();
        }

        match serde_json::from_str::<Configuration>(&content) {
            Ok(config) => {
                log::debug!(
                    "Read {} aliases from {}",
                    config.alias_list.len(),
                    path.display()
                );
                config
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable configuration {}: {}",
                    path.display(),
                    e
                );
                Configuration::default()
            }
        }
    }

    /// Atomically replace the configuration file
    pub fn save(&self, config: &Configuration) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let content = serde_json::to_string_pretty(config)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;

        let path = self.path();
        tmp.persist(&path).map_err(|e| DiskError::Io(e.error))?;

        log::debug!("Wrote configuration: {}", path.display());
        Ok(())
    }
}
