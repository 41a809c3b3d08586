use super::anchor::{locate_declaration, Anchor};
use super::DependencyRecord;
use crate::specifier::parse_specifier;
use std::fs;
use std::path::Path;
use toml::Value;
use tracing::{debug, warn};

/// Scanner for `pyproject.toml` declared dependencies.
///
/// Reads the flat `[project] dependencies` list and the `[dependency-groups]`
/// table (PEP 735). Output order follows the document: primary entries first,
/// then groups in declaration order, entries within a group in list order.
pub struct PyProjectScanner;

impl PyProjectScanner {
    pub fn new() -> Self {
        Self
    }

    /// Scan the workspace manifest. A missing or unparsable manifest yields
    /// an empty list, never an error.
    pub fn scan(&self, workspace_root: &Path) -> Vec<DependencyRecord> {
        let manifest_path = workspace_root.join("pyproject.toml");
        let content = match fs::read_to_string(&manifest_path) {
            Ok(content) => content,
            Err(err) => {
                debug!("no readable pyproject.toml at {}: {err}", manifest_path.display());
                return Vec::new();
            }
        };
        self.scan_content(&content)
    }

    /// Scan manifest text directly (the `scan` body, file I/O factored out).
    pub fn scan_content(&self, content: &str) -> Vec<DependencyRecord> {
        let value: Value = match toml::from_str(content) {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to parse pyproject.toml: {err}");
                return Vec::new();
            }
        };

        let lines: Vec<&str> = content.lines().collect();
        let mut records = Vec::new();

        if let Some(deps) = value
            .get("project")
            .and_then(|p| p.get("dependencies"))
            .and_then(|d| d.as_array())
        {
            for dep in deps {
                if let Some(declaration) = dep.as_str() {
                    if let Some(record) = build_record(declaration, None, &lines) {
                        records.push(record);
                    }
                }
            }
        }

        if let Some(groups) = value.get("dependency-groups").and_then(|g| g.as_table()) {
            for (group_name, entries) in groups {
                let Some(list) = entries.as_array() else {
                    continue;
                };
                for dep in list {
                    if let Some(declaration) = dep.as_str() {
                        if let Some(record) =
                            build_record(declaration, Some(group_name.as_str()), &lines)
                        {
                            records.push(record);
                        }
                    }
                }
            }
        }

        debug!(count = records.len(), "scanned manifest declarations");
        records
    }
}

impl Default for PyProjectScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn build_record(declaration: &str, group: Option<&str>, lines: &[&str]) -> Option<DependencyRecord> {
    let spec = parse_specifier(declaration)?;
    let anchor = locate_declaration(lines, declaration, &spec.name);
    if anchor == Anchor::NotFound {
        warn!(package = %spec.name, "declaration has no locatable manifest line");
    }
    let line_text = anchor
        .line()
        .and_then(|idx| lines.get(idx))
        .map_or_else(String::new, |line| (*line).to_string());

    Some(DependencyRecord {
        name: spec.name,
        requested_version: spec.requested_version,
        installed_version: None,
        latest_version: None,
        freshness: None,
        anchor,
        original_line: declaration.trim().to_string(),
        line_text,
        group: group.map(str::to_string),
        package_url: None,
        summary: None,
        home_page: None,
    })
}
