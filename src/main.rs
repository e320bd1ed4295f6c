use anyhow::Context;
use clap::Parser;
use lorekeeper::cli::{self, Cli, Command};
use lorekeeper::config::AppConfig;
use lorekeeper::infrastructure::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config =
        AppConfig::load_with(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    match cli.command {
        Command::Serve => cli::serve::run(&config).await,
        Command::Generate(args) => cli::generate::run(&config, args).await,
        Command::Templates => {
            cli::list_templates(&config);
            Ok(())
        }
        Command::Cache { command } => cli::cache::run(&config, command).await,
    }
}
