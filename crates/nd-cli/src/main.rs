use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nd_cli::commands::{entries, foods, macros, refresh, summary, trend};
use nd_cli::{Cli, Commands, Config};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Summary(args)) => {
            let config = load_config(cli.config.as_deref())?;
            summary::run(args, &config)?;
        }
        Some(Commands::Trend(args)) => {
            let config = load_config(cli.config.as_deref())?;
            trend::run(args, &config)?;
        }
        Some(Commands::Foods(args)) => {
            let config = load_config(cli.config.as_deref())?;
            foods::run(args, &config)?;
        }
        Some(Commands::Macros(args)) => {
            let config = load_config(cli.config.as_deref())?;
            macros::run(args, &config)?;
        }
        Some(Commands::Entries(args)) => {
            let config = load_config(cli.config.as_deref())?;
            entries::run(args, &config)?;
        }
        Some(Commands::Refresh) => {
            let config = load_config(cli.config.as_deref())?;
            refresh::run(&mut std::io::stdout(), &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
