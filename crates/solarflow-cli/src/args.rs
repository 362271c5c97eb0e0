use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{OrderCommands, StageCommands, WarehouseCommands};

/// Main command-line interface for the Solarflow order tracker
///
/// Solarflow tracks solar installation orders through a fixed fulfilment
/// pipeline, from estimate through subsidy disbursal. Each order progresses
/// stage by stage; stages are completed with their business fields and
/// unlock the next stage in sequence.
#[derive(Parser)]
#[command(version, about, name = "sol")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/solarflow/orders.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Acting user, checked by permission-gated stages
    #[arg(long, global = true)]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Solarflow CLI
///
/// The CLI is organized into three main command categories:
/// - `order`: Operations for managing orders (create, list, show)
/// - `stage`: Operations for progressing an order through its pipeline
/// - `warehouse`: The warehouse registry used by the installation gate
#[derive(Subcommand)]
pub enum Commands {
    /// Manage orders
    #[command(alias = "o")]
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Progress an order through its pipeline stages
    #[command(alias = "s")]
    Stage {
        #[command(subcommand)]
        command: StageCommands,
    },
    /// Manage the warehouse registry
    #[command(alias = "w")]
    Warehouse {
        #[command(subcommand)]
        command: WarehouseCommands,
    },
}
