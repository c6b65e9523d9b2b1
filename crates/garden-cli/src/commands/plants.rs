//! Plants command implementation.

use std::path::PathBuf;

use anyhow::Result;

use garden_cli::config::Config;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_plants_json, format_plants_text};
use crate::util::write_output;

pub fn cmd_plants(
    config: &Config,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let plants = config.catalog();
    let content = match format {
        OutputFormat::Json => format_plants_json(&plants, opts)?,
        OutputFormat::Text => format_plants_text(&plants, opts),
    };
    write_output(output, &content)
}
