//! Watch command implementation.
//!
//! Spawns the refresh loop and prints one record per published snapshot
//! until Ctrl+C or the requested count is reached.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use garden_cli::config::Config;
use garden_cli::setup::build_view_model;
use garden_core::{DashboardState, RefreshOptions};
use garden_types::Snapshot;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_watch_json, format_watch_line};
use crate::style;
use crate::util::append_output;

/// Arguments for the watch command.
pub struct WatchArgs<'a> {
    pub period: Duration,
    pub count: u64,
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub quiet: bool,
    pub opts: &'a FormatOptions,
}

/// What the watch loop has already reported.
#[derive(Default)]
struct Progress {
    printed: u64,
    generation: u64,
    last_error: Option<String>,
    previous: Option<Arc<Snapshot>>,
    spinner: Option<ProgressBar>,
}

pub async fn cmd_watch(config: &Config, args: WatchArgs<'_>) -> Result<()> {
    let WatchArgs {
        period,
        count,
        seed,
        format,
        output,
        quiet,
        opts,
    } = args;

    let vm = build_view_model(config, seed)?;
    let mut rx = vm.subscribe();
    let handle = vm
        .spawn(RefreshOptions::with_period(period))
        .context("Failed to start refresh loop")?;

    if !quiet {
        let header = if opts.no_color {
            format!("Watching: {}", vm.source_name())
        } else {
            format!("Watching: {}", vm.source_name().green())
        };
        eprintln!("{}", header);
        if count > 0 {
            eprintln!(
                "Interval: {}s | Count: {} | Press Ctrl+C to stop",
                period.as_secs(),
                count
            );
        } else {
            eprintln!("Interval: {}s | Press Ctrl+C to stop", period.as_secs());
        }
        eprintln!("{}", "-".repeat(50));
    }

    let show_spinner = !quiet && format == OutputFormat::Text && output.is_none();
    let mut progress = Progress::default();

    loop {
        let state = rx.borrow_and_update().clone();
        report(&state, &mut progress, format, output, show_spinner, opts)?;

        if count > 0 && progress.printed >= count {
            if !quiet {
                eprintln!("Completed {} snapshots.", progress.printed);
            }
            break;
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nShutting down...");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    if let Some(spinner) = progress.spinner.take() {
        spinner.finish_and_clear();
    }
    handle.shutdown().await;
    Ok(())
}

fn report(
    state: &DashboardState,
    progress: &mut Progress,
    format: OutputFormat,
    output: Option<&PathBuf>,
    show_spinner: bool,
    opts: &FormatOptions,
) -> Result<()> {
    if state.loading {
        if show_spinner && progress.spinner.is_none() {
            progress.spinner = Some(style::loading_spinner("Refreshing..."));
        }
        return Ok(());
    }
    if let Some(spinner) = progress.spinner.take() {
        spinner.finish_and_clear();
    }

    if state.last_error != progress.last_error {
        if let Some(error) = &state.last_error {
            eprintln!(
                "{}",
                style::format_warning(&format!("Refresh failed: {}", error), opts.no_color)
            );
        }
        progress.last_error = state.last_error.clone();
    }

    if let Some(snapshot) = &state.snapshot
        && state.generation > progress.generation
    {
        let content = match format {
            OutputFormat::Json => format_watch_json(snapshot)?,
            OutputFormat::Text => {
                format_watch_line(snapshot, progress.previous.as_deref(), opts)
            }
        };
        append_output(output, &content)?;
        progress.generation = state.generation;
        progress.previous = Some(Arc::clone(snapshot));
        progress.printed += 1;
    }
    Ok(())
}
