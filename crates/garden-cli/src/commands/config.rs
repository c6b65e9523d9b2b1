//! Config command implementation.

use anyhow::{Result, bail};

use garden_cli::config::Config;

use crate::cli::ConfigAction;
use crate::style;

pub fn cmd_config(action: ConfigAction, config: &Config, no_color: bool) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }
        ConfigAction::Init { force } => {
            let path = Config::path();
            if path.exists() && !force {
                bail!(
                    "Config already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save()?;
            eprintln!(
                "{}",
                style::format_success(&format!("Wrote {}", path.display()), no_color)
            );
        }
    }
    Ok(())
}
