pub mod cli;
pub mod output;
pub mod parsers;
pub mod pypi;
pub mod reconciler;
pub mod refresh;
pub mod specifier;
pub mod updater;

pub use cli::Args;
pub use output::TableRenderer;
pub use parsers::{Anchor, DependencyRecord, Freshness, PyProjectScanner, UvLockReader};
pub use pypi::{Clock, PyPiClient, SystemClock, VersionInfo};
pub use reconciler::Reconciler;
pub use refresh::{RefreshHandle, RefreshQueue};
pub use specifier::{parse_specifier, ParsedSpecifier};
pub use updater::{upgrade_commands, EditError, ManifestEditor};
