use crate::parsers::{Anchor, DependencyRecord};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Why an in-place edit was refused or failed. Every variant is user-facing;
/// none of them leaves the manifest partially written.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("'{name}' has no anchored manifest line; refusing to edit")]
    Unanchored { name: String },
    #[error("'{name}' declares no version literal to rewrite")]
    NoRequestedVersion { name: String },
    #[error("manifest line {line} no longer mentions '{name}'; re-scan before editing")]
    AnchorDrift { name: String, line: usize },
    #[error("anchored line {line} is past the end of the manifest")]
    LineOutOfRange { line: usize },
    #[error("failed to read or write the manifest")]
    Io(#[from] std::io::Error),
}

/// Rewrites version literals in `pyproject.toml`, one line at a time.
pub struct ManifestEditor {
    manifest_path: PathBuf,
}

impl ManifestEditor {
    pub fn new(workspace_root: &Path) -> Self {
        Self {
            manifest_path: workspace_root.join("pyproject.toml"),
        }
    }

    /// Replace the record's requested version with `target_version` on its
    /// anchored line, leaving every other line byte-identical.
    ///
    /// The manifest is re-read from disk so the edit never trusts a stale
    /// snapshot, and the anchored line must still mention the dependency's
    /// name or the edit is refused.
    pub fn apply_version(
        &self,
        record: &DependencyRecord,
        target_version: &str,
    ) -> Result<(), EditError> {
        let Anchor::Line(line_idx) = record.anchor else {
            return Err(EditError::Unanchored {
                name: record.name.clone(),
            });
        };
        if record.requested_version.is_empty() {
            return Err(EditError::NoRequestedVersion {
                name: record.name.clone(),
            });
        }

        let content = fs::read_to_string(&self.manifest_path)?;
        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

        let Some(line) = lines.get(line_idx) else {
            return Err(EditError::LineOutOfRange { line: line_idx });
        };
        if !line.to_lowercase().contains(&record.name.to_lowercase()) {
            return Err(EditError::AnchorDrift {
                name: record.name.clone(),
                line: line_idx,
            });
        }

        let edited = line.replacen(&record.requested_version, target_version, 1);
        lines[line_idx] = edited;

        let mut updated = lines.join("\n");
        if content.ends_with('\n') {
            updated.push('\n');
        }
        fs::write(&self.manifest_path, updated)?;

        debug!(
            package = %record.name,
            from = %record.requested_version,
            to = target_version,
            "rewrote manifest constraint"
        );
        Ok(())
    }

    /// Rewrite the constraint to the locked installed version. No-op when
    /// the lock has no entry for this record.
    pub fn bump_to_installed(&self, record: &DependencyRecord) -> Result<(), EditError> {
        let Some(installed) = record.installed_version.as_deref() else {
            return Ok(());
        };
        self.apply_version(record, installed)
    }
}

/// One `uv add --upgrade` command line per dependency group, groups in
/// first-seen order. Handed to an external process runner, never spawned
/// here.
pub fn upgrade_commands(records: &[&DependencyRecord]) -> Vec<String> {
    let mut order: Vec<Option<String>> = Vec::new();
    let mut grouped: HashMap<Option<String>, Vec<String>> = HashMap::new();

    for record in records {
        let key = record.group.clone();
        if !grouped.contains_key(&key) {
            order.push(key.clone());
        }
        grouped.entry(key).or_default().push(record.name.clone());
    }

    let mut commands = Vec::new();
    for key in order {
        let Some(names) = grouped.remove(&key) else {
            continue;
        };
        let command = match &key {
            Some(group) => format!("uv add --upgrade --group {group} {}", names.join(" ")),
            None => format!("uv add --upgrade {}", names.join(" ")),
        };
        commands.push(command);
    }
    commands
}
