//! Snapshot command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use garden_cli::config::Config;
use garden_cli::setup::build_view_model;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_snapshot_json, format_snapshot_text};
use crate::style;
use crate::util::write_output;

/// Arguments for the snapshot command.
pub struct SnapshotArgs<'a> {
    pub seed: Option<u64>,
    pub no_delay: bool,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub quiet: bool,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_snapshot(config: &Config, args: SnapshotArgs<'_>) -> Result<()> {
    let SnapshotArgs {
        seed,
        no_delay,
        format,
        output,
        quiet,
        opts,
    } = args;

    let config = if no_delay {
        Config {
            latency_ms: 0,
            ..config.clone()
        }
    } else {
        config.clone()
    };
    let vm = build_view_model(&config, seed)?;

    let spinner = (!quiet && format == OutputFormat::Text)
        .then(|| style::loading_spinner("Fetching garden snapshot..."));
    let result = vm.refresh().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let snapshot = result.context("Failed to fetch snapshot")?;

    let content = match format {
        OutputFormat::Json => format_snapshot_json(&snapshot, vm.plants(), opts)?,
        OutputFormat::Text => format_snapshot_text(&snapshot, vm.plants(), opts),
    };
    write_output(output, &content)
}
