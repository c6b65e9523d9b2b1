//! Command implementations for the CLI.

mod config;
mod plants;
mod snapshot;
mod watch;

pub use config::cmd_config;
pub use plants::cmd_plants;
pub use snapshot::{SnapshotArgs, cmd_snapshot};
pub use watch::{WatchArgs, cmd_watch};
