//! Solarflow CLI Application
//!
//! Command-line interface for the Solarflow order pipeline tracker.

mod args;
mod cli;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use solarflow_core::{params::ListOrders, TrackerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        actor,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    info!("Solarflow started");

    let cli = Cli::new(tracker, actor);

    match command {
        Some(Order { command }) => cli.handle_order_command(command).await,
        Some(Stage { command }) => cli.handle_stage_command(command).await,
        Some(Warehouse { command }) => cli.handle_warehouse_command(command).await,
        None => cli.list_orders(&ListOrders::default()).await,
    }
}
