use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a temporary project directory
pub struct TempProject {
    pub dir: TempDir,
}

impl TempProject {
    /// Create a new temporary project
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        Self { dir }
    }

    /// Get the path to the project directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file in the project with the given content
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let file_path = self.dir.path().join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Get the absolute path to a file in the project
    pub fn file_path(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample pyproject.toml with a primary list and two dependency groups
pub fn sample_pyproject() -> &'static str {
    r#"[project]
name = "test-project"
version = "0.1.0"
description = "A test project"
dependencies = [
    "requests>=2.28.0",
    "numpy==1.24.0",
]

[dependency-groups]
dev = [
    "pytest>=7.0.0",
    "black>=23.0.0",
]
docs = [
    "sphinx~=7.2",
]

[build-system]
requires = ["setuptools>=61.0"]
build-backend = "setuptools.build_meta"
"#
}

/// Sample uv.lock matching `sample_pyproject`, with pytest left unlocked
pub fn sample_uv_lock() -> &'static str {
    r#"version = 1
requires-python = ">=3.11"

[[package]]
name = "requests"
version = "2.31.0"

[[package]]
name = "numpy"
version = "1.24.0"

[[package]]
name = "black"
version = "23.7.0"

[[package]]
name = "sphinx"
version = "7.2.6"
"#
}

/// Create a temp project with both manifest and lock in place
pub fn create_project_with_lock() -> TempProject {
    let project = TempProject::new();
    project.create_file("pyproject.toml", sample_pyproject());
    project.create_file("uv.lock", sample_uv_lock());
    project
}
