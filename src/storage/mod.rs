// SPDX-License-Identifier: PMPL-1.0-or-later

//! Persisted page preferences.
//!
//! The page keeps three string values across reloads. The controller only
//! sees the [`Store`] trait; [`MemoryStore`] lives as long as the process,
//! [`FileStore`] writes through to a JSON file so the CLI can simulate
//! reloads across invocations.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Locale code, `"en"` or `"es"`.
pub const KEY_LANGUAGE: &str = "preferredLanguage";
/// `"true"` once the gate has been opened; absent otherwise.
pub const KEY_UNLOCKED: &str = "isUnlocked";
/// Identifier of the last shown section.
pub const KEY_SECTION: &str = "currentPage";

/// String-keyed get/set persistence.
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `path`, starting empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading state file {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing state file {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forget everything, on disk too.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let payload = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, payload)
            .with_context(|| format!("writing state file {}", self.path.display()))?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}
