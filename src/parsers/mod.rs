pub mod anchor;
pub mod lockfile;
pub mod pyproject;

pub use anchor::Anchor;
pub use lockfile::UvLockReader;
pub use pyproject::PyProjectScanner;

use crate::pypi::VersionInfo;

/// Staleness of one dependency relative to the registry. Absent until the
/// latest published version is known; exactly one variant afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    UpToDate,
    Outdated,
}

/// One declared dependency, merged from the manifest, the lock snapshot and
/// the registry. Rebuilt from scratch on every reconciliation pass.
#[derive(Debug, Clone)]
pub struct DependencyRecord {
    /// Package name as written in the manifest (display form).
    pub name: String,
    /// Version literal from the constraint, empty when unconstrained.
    pub requested_version: String,
    /// Version from the lock snapshot, if the package is locked.
    pub installed_version: Option<String>,
    /// Latest published version, once remote resolution succeeds.
    pub latest_version: Option<String>,
    pub freshness: Option<Freshness>,
    /// Manifest line this declaration is anchored to. Edits against
    /// `Anchor::NotFound` records are refused.
    pub anchor: Anchor,
    /// The declaration string as written (trimmed).
    pub original_line: String,
    /// Full source-line snapshot at scan time.
    pub line_text: String,
    /// Named dependency group; `None` is the primary dependency set.
    pub group: Option<String>,
    pub package_url: Option<String>,
    pub summary: Option<String>,
    pub home_page: Option<String>,
}

impl DependencyRecord {
    /// Name used for joins across the manifest, lock and registry.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    pub fn is_up_to_date(&self) -> bool {
        self.freshness == Some(Freshness::UpToDate)
    }

    pub fn is_outdated(&self) -> bool {
        self.freshness == Some(Freshness::Outdated)
    }

    /// Version the registry result is classified against: installed if
    /// known, else the requested literal.
    pub fn reference_version(&self) -> &str {
        self.installed_version
            .as_deref()
            .unwrap_or(&self.requested_version)
    }

    /// The manifest constraint lags the locked install.
    pub fn needs_bump(&self) -> bool {
        match &self.installed_version {
            Some(installed) => *installed != self.requested_version,
            None => false,
        }
    }

    /// A newer version than the locked install has been published.
    pub fn needs_upgrade(&self) -> bool {
        self.latest_version.is_some() && self.installed_version != self.latest_version
    }

    /// Merge a successful registry lookup into this record.
    pub fn merge_version_info(&mut self, info: VersionInfo) {
        self.latest_version = Some(info.latest_version);
        self.freshness = Some(info.freshness);
        self.package_url = Some(info.package_url);
        self.summary = Some(info.summary);
        self.home_page = Some(info.home_page);
    }
}

/// PyPI-style name normalization: case-insensitive, `_` and `-` equivalent.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}
