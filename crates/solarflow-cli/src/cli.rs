//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure using clap's derive API,
//! implementing the parameter wrapper pattern for clean separation between
//! CLI framework concerns and core domain logic:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! CLI argument structs carry the clap derives and convert into core
//! parameter types via `From`, so the core stays framework-free. Stage
//! business fields arrive as repeated `-f key=value` flags and are
//! assembled into the tagged stage payload here.

use anyhow::{bail, Context};
use clap::{Args, Subcommand, ValueEnum};

use solarflow_core::{
    display::{CreateResult, OrderSummaries, UpdateResult, Warehouses},
    models::{CompletionFilter, OrderFilter, StageKey, StagePayload},
    params::{AddWarehouse, CompleteStage, CreateOrder, Id, ListOrders},
    Tracker,
};

/// Create a new order
#[derive(Args)]
pub struct CreateOrderArgs {
    /// Customer name
    pub customer: String,
    /// Customer contact phone
    #[arg(short, long)]
    pub phone: Option<String>,
    /// Customer contact email
    #[arg(short, long)]
    pub email: Option<String>,
    /// Customer tax identifier (15-character GSTIN)
    #[arg(long)]
    pub gstin: Option<String>,
    /// Installation site address
    #[arg(short, long)]
    pub site_address: Option<String>,
}

impl From<CreateOrderArgs> for CreateOrder {
    fn from(val: CreateOrderArgs) -> Self {
        CreateOrder {
            customer: val.customer,
            phone: val.phone,
            email: val.email,
            gstin: val.gstin,
            site_address: val.site_address,
        }
    }
}

/// List orders
///
/// Shows every order by default. Use --completed for orders whose pipeline
/// has finished, or --in-progress for orders still moving through it.
#[derive(Args)]
pub struct ListOrdersArgs {
    /// Show only orders whose pipeline has completed
    #[arg(long, conflicts_with = "in_progress")]
    pub completed: bool,
    /// Show only orders still progressing through the pipeline
    #[arg(long)]
    pub in_progress: bool,
}

impl From<ListOrdersArgs> for ListOrders {
    fn from(val: ListOrdersArgs) -> Self {
        let completion = if val.completed {
            Some(CompletionFilter::Completed)
        } else if val.in_progress {
            Some(CompletionFilter::InProgress)
        } else {
            None
        };
        ListOrders {
            filter: OrderFilter { completion },
        }
    }
}

/// Show an order with its pipeline board
#[derive(Args)]
pub struct ShowOrderArgs {
    /// ID of the order to display
    pub id: u64,
}

impl From<ShowOrderArgs> for Id {
    fn from(val: ShowOrderArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Create a new order
    #[command(alias = "c")]
    Create(CreateOrderArgs),
    /// List orders
    #[command(aliases = ["l", "ls"])]
    List(ListOrdersArgs),
    /// Show an order with its pipeline board
    #[command(alias = "s")]
    Show(ShowOrderArgs),
}

/// Complete the current stage of an order
///
/// The stage's business fields are passed as repeated `-f key=value` flags,
/// for example: `sol stage complete 3 planner -f planned_priority=High`.
/// Completing a stage that is already completed re-submits its fields
/// without moving the pipeline.
#[derive(Args)]
pub struct CompleteStageArgs {
    /// ID of the order to progress
    pub order_id: u64,
    /// The stage being completed
    pub stage: StageArg,
    /// Stage business fields as key=value pairs
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

/// Update a stage's business fields without completing it
#[derive(Args)]
pub struct UpdateStageArgs {
    /// ID of the order to update
    pub order_id: u64,
    /// The stage whose fields to update
    pub stage: StageArg,
    /// Stage business fields as key=value pairs
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

/// Record a zero-amount estimate
///
/// Marks the estimate as generated and paid in a single step and opens the
/// planner stage. Only valid while the order is at the estimate stage.
#[derive(Args)]
pub struct SkipEstimateArgs {
    /// ID of the order
    pub order_id: u64,
    /// Confirm the shortcut (required; it cannot be undone)
    #[arg(long)]
    pub confirm: bool,
}

impl From<SkipEstimateArgs> for Id {
    fn from(val: SkipEstimateArgs) -> Self {
        Id { id: val.order_id }
    }
}

#[derive(Subcommand)]
pub enum StageCommands {
    /// Complete the current stage of an order
    #[command(alias = "c")]
    Complete(CompleteStageArgs),
    /// Update a stage's business fields without completing it
    #[command(alias = "u")]
    Update(UpdateStageArgs),
    /// Record a zero-amount estimate and skip to the planner stage
    #[command(alias = "z")]
    SkipZeroEstimate(SkipEstimateArgs),
}

/// Register a warehouse with its manager
#[derive(Args)]
pub struct AddWarehouseArgs {
    /// Warehouse display name
    pub name: String,
    /// User who manages the warehouse
    pub manager: String,
}

impl From<AddWarehouseArgs> for AddWarehouse {
    fn from(val: AddWarehouseArgs) -> Self {
        AddWarehouse {
            name: val.name,
            manager: val.manager,
        }
    }
}

#[derive(Subcommand)]
pub enum WarehouseCommands {
    /// Register a warehouse with its manager
    #[command(alias = "a")]
    Add(AddWarehouseArgs),
    /// List registered warehouses
    #[command(aliases = ["l", "ls"])]
    List,
}

/// Command-line argument representation of pipeline stages
///
/// Mirrors the pipeline order; converts to the core stage key for payload
/// assembly. Clap renders these kebab-case in help output.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StageArg {
    EstimateGenerated,
    EstimatePaid,
    Planner,
    Delivery,
    AssignFabricatorAndInstaller,
    Fabrication,
    Installation,
    NetmeterApply,
    NetmeterInstalled,
    SubsidyClaim,
    SubsidyDisbursed,
}

impl From<StageArg> for StageKey {
    fn from(val: StageArg) -> Self {
        match val {
            StageArg::EstimateGenerated => StageKey::EstimateGenerated,
            StageArg::EstimatePaid => StageKey::EstimatePaid,
            StageArg::Planner => StageKey::Planner,
            StageArg::Delivery => StageKey::Delivery,
            StageArg::AssignFabricatorAndInstaller => StageKey::AssignFabricatorAndInstaller,
            StageArg::Fabrication => StageKey::Fabrication,
            StageArg::Installation => StageKey::Installation,
            StageArg::NetmeterApply => StageKey::NetmeterApply,
            StageArg::NetmeterInstalled => StageKey::NetmeterInstalled,
            StageArg::SubsidyClaim => StageKey::SubsidyClaim,
            StageArg::SubsidyDisbursed => StageKey::SubsidyDisbursed,
        }
    }
}

/// Parses one `-f key=value` flag into a JSON field.
///
/// Values that parse as integers become JSON numbers (warehouse IDs,
/// quantities); everything else stays a string. Dates and amounts
/// deserialize from their string form in the payload.
fn parse_field(raw: &str) -> anyhow::Result<(String, serde_json::Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("invalid field '{raw}': expected KEY=VALUE");
    };
    let value = match value.parse::<i64>() {
        Ok(number) => serde_json::Value::from(number),
        Err(_) => serde_json::Value::from(value),
    };
    Ok((key.to_string(), value))
}

/// Assembles a tagged stage payload from `-f` flags.
fn build_payload(stage: StageArg, fields: &[String]) -> anyhow::Result<StagePayload> {
    let stage_key = StageKey::from(stage);
    let mut object = serde_json::Map::new();
    object.insert(
        "stage".to_string(),
        serde_json::Value::from(stage_key.as_str()),
    );
    for raw in fields {
        let (key, value) = parse_field(raw)?;
        object.insert(key, value);
    }
    serde_json::from_value(serde_json::Value::Object(object))
        .with_context(|| format!("invalid fields for stage '{stage_key}'"))
}

/// CLI command handler that owns the tracker and the acting user.
pub struct Cli {
    tracker: Tracker,
    actor: Option<String>,
}

impl Cli {
    pub fn new(tracker: Tracker, actor: Option<String>) -> Self {
        Self { tracker, actor }
    }

    pub async fn handle_order_command(&self, command: OrderCommands) -> anyhow::Result<()> {
        match command {
            OrderCommands::Create(args) => {
                let order = self.tracker.create_order(&args.into()).await?;
                print!("{}", CreateResult::new(order));
            }
            OrderCommands::List(args) => {
                self.list_orders(&args.into()).await?;
            }
            OrderCommands::Show(args) => {
                let params: Id = args.into();
                match self.tracker.get_order(&params).await? {
                    Some(order) => print!("{order}"),
                    None => bail!("Order with ID {} not found", params.id),
                }
            }
        }
        Ok(())
    }

    pub async fn handle_stage_command(&self, command: StageCommands) -> anyhow::Result<()> {
        match command {
            StageCommands::Complete(args) => {
                let payload = build_payload(args.stage, &args.fields)?;
                let stage = payload.stage();
                let order = self
                    .tracker
                    .complete_stage(&CompleteStage {
                        order_id: args.order_id,
                        payload,
                        actor: self.actor.clone(),
                    })
                    .await?;
                print!("{}", UpdateResult::for_stage(order, stage));
            }
            StageCommands::Update(args) => {
                let payload = build_payload(args.stage, &args.fields)?;
                let stage = payload.stage();
                let order = self
                    .tracker
                    .update_stage_fields(&CompleteStage {
                        order_id: args.order_id,
                        payload,
                        actor: self.actor.clone(),
                    })
                    .await?;
                print!("{}", UpdateResult::for_stage(order, stage));
            }
            StageCommands::SkipZeroEstimate(args) => {
                if !args.confirm {
                    bail!(
                        "Recording a zero-amount estimate completes both estimate stages; \
                         re-run with --confirm to proceed"
                    );
                }
                let order = self.tracker.skip_zero_amount_estimate(&args.into()).await?;
                print!("{}", UpdateResult::new(order));
            }
        }
        Ok(())
    }

    pub async fn handle_warehouse_command(&self, command: WarehouseCommands) -> anyhow::Result<()> {
        match command {
            WarehouseCommands::Add(args) => {
                let warehouse = self.tracker.add_warehouse(&args.into()).await?;
                print!("{}", CreateResult::new(warehouse));
            }
            WarehouseCommands::List => {
                let warehouses = self.tracker.list_warehouses().await?;
                print!("{}", Warehouses(warehouses));
            }
        }
        Ok(())
    }

    pub async fn list_orders(&self, params: &ListOrders) -> anyhow::Result<()> {
        let summaries = self.tracker.list_orders(params).await?;
        print!("{}", OrderSummaries(summaries));
        Ok(())
    }
}
