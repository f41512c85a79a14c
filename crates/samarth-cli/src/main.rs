mod admin;
mod catalog;
mod clipboard;
mod contact;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::admin::AdminCommands;
use crate::catalog::CatalogCommands;
use crate::contact::ContactCommands;

#[derive(Debug, Parser)]
#[command(name = "samarth-cli")]
#[command(about = "Samarth Overseas export catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Edit, import, export, or reset the persisted product list
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Send an inquiry or preview a product-based prefill
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = samarth_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Catalog { command }) => catalog::run(&config, command).await?,
        Some(Commands::Admin { command }) => admin::run(&config, command).await?,
        Some(Commands::Contact { command }) => contact::run(&config, command).await?,
        None => println!("samarth-cli ready; see --help for commands"),
    }

    Ok(())
}
