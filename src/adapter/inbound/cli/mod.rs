//! CLI module graph.

pub mod check;
pub mod command;
pub mod decode;
pub mod results;

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use command::{Cli, Commands};

/// Load `path`, or defaults plus environment overrides if it does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path)
    } else {
        Config::parse_toml("")
    }
}

pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Decode(args) => decode::execute(args),
        Commands::Winners { market_id } => results::execute_winners(config, *market_id).await,
        Commands::Position { market_id, runner } => {
            results::execute_position(config, *market_id, runner).await
        }
        Commands::Check => {
            check::execute_config(&cli.config, config);
            Ok(())
        }
    }
}
