//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Use Fahrenheit for temperature display (overrides --celsius and config)
    #[arg(long, conflicts_with = "celsius")]
    pub fahrenheit: bool,

    /// Use Celsius for temperature display (default, overrides config)
    #[arg(long, conflicts_with = "fahrenheit")]
    pub celsius: bool,
}

impl OutputArgs {
    /// Resolve fahrenheit setting: explicit flags override config
    pub fn resolve_fahrenheit(&self, config_fahrenheit: bool) -> bool {
        if self.fahrenheit {
            true
        } else if self.celsius {
            false
        } else {
            config_fahrenheit
        }
    }
}

#[derive(Parser)]
#[command(name = "garden")]
#[command(author, version, about = "Garden sensor dashboard", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one snapshot and print it
    Snapshot {
        #[command(flatten)]
        output: OutputArgs,

        /// Seed for reproducible readings
        #[arg(long, env = "GARDEN_SEED")]
        seed: Option<u64>,

        /// Skip the simulated fetch delay
        #[arg(long)]
        no_delay: bool,
    },

    /// List plants with their status badges
    Plants {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Refresh continuously and print one line per snapshot
    Watch {
        #[command(flatten)]
        output: OutputArgs,

        /// Refresh interval in seconds (defaults to config, then 30)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Number of snapshots before exiting (0 for unlimited)
        #[arg(short = 'n', long, default_value = "0")]
        count: u64,

        /// Seed for reproducible readings
        #[arg(long, env = "GARDEN_SEED")]
        seed: Option<u64>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Launch interactive terminal dashboard
    #[cfg(feature = "tui")]
    Tui {
        /// Seed for reproducible readings
        #[arg(long, env = "GARDEN_SEED")]
        seed: Option<u64>,
    },
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_snapshot_json_with_seed() {
        let cli = Cli::try_parse_from(["garden", "snapshot", "--format", "json", "--seed", "42"])
            .unwrap();
        match cli.command {
            Commands::Snapshot { output, seed, no_delay } => {
                assert_eq!(output.format, OutputFormat::Json);
                assert_eq!(seed, Some(42));
                assert!(!no_delay);
            }
            _ => panic!("expected snapshot"),
        }
    }

    #[test]
    fn test_parse_watch_defaults() {
        let cli = Cli::try_parse_from(["garden", "watch"]).unwrap();
        match cli.command {
            Commands::Watch { interval, count, .. } => {
                assert_eq!(interval, None);
                assert_eq!(count, 0);
            }
            _ => panic!("expected watch"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["garden", "plants", "-q", "--no-color"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.no_color);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_output_path_flag() {
        let cli = Cli::try_parse_from(["garden", "snapshot", "-o", "out.json"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_fahrenheit_conflicts_with_celsius() {
        let result = Cli::try_parse_from(["garden", "plants", "--fahrenheit", "--celsius"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_fahrenheit() {
        let args = OutputArgs {
            format: OutputFormat::Text,
            fahrenheit: false,
            celsius: true,
        };
        assert!(!args.resolve_fahrenheit(true));

        let args = OutputArgs {
            celsius: false,
            ..args
        };
        assert!(args.resolve_fahrenheit(true));
    }
}
