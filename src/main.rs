use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sitemill::app::AppContext;
use sitemill::cli::{commands, Cli, Commands};
use sitemill::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    if let Some(Commands::InitConfig { force }) = cli.command {
        commands::init_config(cli.config.as_deref(), force)?;
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let ctx = AppContext::new(config)?;

    match cli.command {
        None | Some(Commands::Run) => {
            commands::run(&ctx).await?;
        }
        Some(Commands::Harvest) => {
            commands::harvest(&ctx).await?;
        }
        Some(Commands::InitConfig { .. }) => {}
    }

    Ok(())
}
