use super::normalize_name;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reader for `uv.lock`, the installed-package snapshot.
pub struct UvLockReader;

/// `[[package]]` entry. Both fields are optional so incomplete entries can
/// be skipped instead of failing the whole document.
#[derive(Debug, Deserialize)]
struct LockEntry {
    name: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UvLock {
    #[serde(default)]
    package: Vec<LockEntry>,
}

impl UvLockReader {
    pub fn new() -> Self {
        Self
    }

    /// Read `uv.lock` into a lower-cased name → installed version map.
    /// Missing file or parse failure yields an empty map, never an error.
    pub fn read(&self, workspace_root: &Path) -> HashMap<String, String> {
        let lock_path = workspace_root.join("uv.lock");
        let content = match fs::read_to_string(&lock_path) {
            Ok(content) => content,
            Err(err) => {
                debug!("no readable uv.lock at {}: {err}", lock_path.display());
                return HashMap::new();
            }
        };
        self.read_content(&content)
    }

    pub fn read_content(&self, content: &str) -> HashMap<String, String> {
        let lock: UvLock = match toml::from_str(content) {
            Ok(lock) => lock,
            Err(err) => {
                warn!("failed to parse uv.lock: {err}");
                return HashMap::new();
            }
        };

        let mut installed = HashMap::new();
        for entry in lock.package {
            let (Some(name), Some(version)) = (entry.name, entry.version) else {
                continue;
            };
            installed.insert(normalize_name(&name), version);
        }
        installed
    }
}

impl Default for UvLockReader {
    fn default() -> Self {
        Self::new()
    }
}
