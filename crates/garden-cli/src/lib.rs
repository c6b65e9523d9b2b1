//! Command-line interface and terminal dashboard for garden sensors.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `snapshot` | Fetch one snapshot and print it |
//! | `plants` | List plants with their status badges |
//! | `watch` | Refresh continuously, one line per snapshot |
//! | `tui` | Interactive terminal dashboard |
//! | `config` | Manage configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! Settings live in `~/.config/garden/config.toml` (or platform equivalent):
//!
//! - `refresh_secs`: seconds between refreshes (default 30)
//! - `latency_ms`: simulated fetch delay (default 1000)
//! - `seed`: fixed seed for reproducible readings
//! - `max_retries`: retries per refresh for transient failures
//! - `no_color`, `fahrenheit`, `theme`
//! - `[ranges]`, `[weather]` and `[[plants]]` tables
//!
//! # Environment Variables
//!
//! - `GARDEN_SEED`: default seed (overridden by `--seed`)
//! - `NO_COLOR`: disable colored output when set
//! - `RUST_LOG`: log filter when neither `--verbose` nor `--quiet` is given
//!
//! # Examples
//!
//! ```bash
//! garden snapshot --seed 42 --no-delay
//! garden watch --interval 5 --count 3 --format json
//! garden tui
//! ```

pub mod config;
pub mod setup;

// Re-export core dependencies for convenience
pub use garden_core;
pub use garden_types;

// TUI module - publicly exposed for the garden-tui crate to use
#[cfg(feature = "tui")]
pub mod tui;
