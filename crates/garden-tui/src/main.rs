use anyhow::Result;

use garden_cli::config::{Config, resolve_seed};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();
    let seed = resolve_seed(None, &config);
    garden_cli::tui::run(config, seed).await
}
