use clap::Parser;
use paddock::adapter::inbound::cli::command::Cli;
use paddock::adapter::inbound::cli::{execute, load_config};
use tracing::debug;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    debug!(config = %cli.config.display(), "paddock starting");

    if let Err(e) = execute(&cli, &config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
