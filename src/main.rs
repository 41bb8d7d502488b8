//! Overlay Studio CLI
//!
//! Command-line front end for generating and exporting DJ overlays and flyers.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use overlay_studio::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --verbose wins over RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("Overlay Studio v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Overlay Studio v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Templates => commands::list_templates()?,
        Commands::Overlay {
            args,
            remove_background,
            opacity,
        } => {
            commands::overlay(&args, remove_background, opacity)
                .context("overlay command failed")?;
        }
        Commands::Flyer { args } => {
            commands::flyer(&args).context("flyer command failed")?;
        }
    }
    Ok(())
}
