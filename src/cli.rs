use clap::Parser;
use std::path::PathBuf;

/// Track Python project dependencies against uv.lock and PyPI
#[derive(Parser, Debug, Clone)]
#[command(name = "pydeps")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to project directory (defaults to current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Rewrite manifest constraints to the locked installed versions
    #[arg(short, long)]
    pub bump: bool,

    /// Print grouped `uv add --upgrade` commands for outdated packages
    #[arg(short, long)]
    pub upgrade: bool,

    /// Keep running and refresh on a timer
    #[arg(short, long)]
    pub watch: bool,

    /// Auto-refresh period for --watch, in seconds
    #[arg(long, default_value_t = 300, value_name = "SECS")]
    pub interval: u64,

    /// Override the package index base URL (defaults to PyPI)
    #[arg(long, value_name = "URL")]
    pub index_url: Option<String>,
}

impl Args {
    /// Get the project path, defaulting to current directory
    pub fn project_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
