mod cli;
mod commands;
mod format;
mod style;
mod util;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{SnapshotArgs, WatchArgs, cmd_config, cmd_plants, cmd_snapshot, cmd_watch};
use format::FormatOptions;
use garden_cli::config::{Config, resolve_period, resolve_seed};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "garden", &mut io::stdout());
        return Ok(());
    }

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // Log lines would draw over the dashboard's alternate screen.
    #[cfg(feature = "tui")]
    let owns_terminal = matches!(cli.command, Commands::Tui { .. });
    #[cfg(not(feature = "tui"))]
    let owns_terminal = false;
    if !owns_terminal {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    let config = Config::load();
    let no_color = cli.no_color || config.no_color;
    let output = cli.output.as_ref();

    match cli.command {
        Commands::Snapshot {
            output: out,
            seed,
            no_delay,
        } => {
            let opts = FormatOptions::new(no_color, out.resolve_fahrenheit(config.fahrenheit))
                .with_compact(cli.compact);
            cmd_snapshot(
                &config,
                SnapshotArgs {
                    seed: resolve_seed(seed, &config),
                    no_delay,
                    format: out.format,
                    output,
                    quiet: cli.quiet,
                    opts: &opts,
                },
            )
            .await?;
        }
        Commands::Plants { output: out } => {
            let opts = FormatOptions::new(no_color, out.resolve_fahrenheit(config.fahrenheit))
                .with_compact(cli.compact);
            cmd_plants(&config, out.format, output, &opts)?;
        }
        Commands::Watch {
            output: out,
            interval,
            count,
            seed,
        } => {
            if interval == Some(0) {
                anyhow::bail!("--interval must be > 0");
            }
            let opts = FormatOptions::new(no_color, out.resolve_fahrenheit(config.fahrenheit))
                .with_compact(cli.compact);
            cmd_watch(
                &config,
                WatchArgs {
                    period: resolve_period(interval, &config),
                    count,
                    seed: resolve_seed(seed, &config),
                    format: out.format,
                    output,
                    quiet: cli.quiet,
                    opts: &opts,
                },
            )
            .await?;
        }
        Commands::Config { action } => {
            cmd_config(action, &config, no_color)?;
        }
        #[cfg(feature = "tui")]
        Commands::Tui { seed } => {
            garden_cli::tui::run(config.clone(), resolve_seed(seed, &config)).await?;
        }
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
