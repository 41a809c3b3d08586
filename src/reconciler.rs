use crate::parsers::{DependencyRecord, PyProjectScanner, UvLockReader};
use crate::pypi::{Clock, PyPiClient, SystemClock};
use std::path::Path;
use tracing::debug;

/// Runs one full reconciliation pass: scan the manifest, read the lock
/// snapshot, then resolve each record against the registry.
///
/// Registry calls happen sequentially, one package at a time, and a failed
/// lookup only leaves that record's latest-version fields absent — the pass
/// always completes with whatever subset resolved.
pub struct Reconciler<C: Clock = SystemClock> {
    scanner: PyProjectScanner,
    lock_reader: UvLockReader,
    resolver: PyPiClient<C>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::with_resolver(PyPiClient::new())
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Reconciler<C> {
    pub fn with_resolver(resolver: PyPiClient<C>) -> Self {
        Self {
            scanner: PyProjectScanner::new(),
            lock_reader: UvLockReader::new(),
            resolver,
        }
    }

    pub async fn run(&self, workspace_root: &Path) -> Vec<DependencyRecord> {
        self.run_with_progress(workspace_root, |_, _| {}).await
    }

    /// Run a pass, reporting `(done, total)` after each package resolves.
    pub async fn run_with_progress(
        &self,
        workspace_root: &Path,
        progress: impl Fn(usize, usize),
    ) -> Vec<DependencyRecord> {
        let mut records = self.scanner.scan(workspace_root);
        let installed = self.lock_reader.read(workspace_root);
        debug!(
            declared = records.len(),
            installed = installed.len(),
            "starting reconciliation pass"
        );

        for record in &mut records {
            record.installed_version = installed.get(&record.normalized_name()).cloned();
        }

        let total = records.len();
        for (index, record) in records.iter_mut().enumerate() {
            let reference = record.reference_version().to_string();
            if let Some(info) = self.resolver.resolve(&record.name, &reference).await {
                record.merge_version_info(info);
            }
            progress(index + 1, total);
        }

        records
    }
}
