//! Brewlab CLI Application
//!
//! Command-line front-end for the brewlab coffee companion.

mod args;
mod cli;
mod renderer;
mod timer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use brewlab_core::CoffeeLabBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        sync_url,
        command,
    } = Args::parse();

    let lab = CoffeeLabBuilder::new()
        .with_database_path(database_file)
        .with_sync_url(sync_url)
        .build()
        .await
        .context("Failed to initialize brew store")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Brewlab started");

    let cli = Cli::new(lab, renderer);
    match command {
        Some(Method { command }) => cli.handle_method_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(Bean { command }) => cli.handle_bean_command(command).await,
        Some(Grinder { command }) => cli.handle_grinder_command(command).await,
        Some(Record { command }) => cli.handle_record_command(command).await,
        Some(Calc { command }) => cli.handle_calc_command(command).await,
        Some(Timer(args)) => cli.run_timer(args).await,
        Some(Sync { command }) => cli.handle_sync_command(command).await,
        None => cli.list_methods().await,
    }
}
