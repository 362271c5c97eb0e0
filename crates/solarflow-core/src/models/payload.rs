//! Typed per-stage payloads.
//!
//! Instead of merging duck-typed field maps into a generic update call, each
//! stage owns a tagged payload variant. The completion path is therefore
//! exhaustively checked against the stage it targets, and each variant
//! validates its own required fields before anything is persisted.

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::validate;

use super::StageKey;

/// Quantities arrive from the stage forms as either JSON strings ("10") or
/// bare numbers (10); normalize both to text and validate later.
fn qty_field<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// Business fields for one stage submission, tagged by stage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StagePayload {
    EstimateGenerated {
        quotation_number: Option<String>,
        amount: Option<Decimal>,
        due_date: Option<Date>,
    },
    EstimatePaid {
        payment_reference: Option<String>,
        amount_received: Option<Decimal>,
        paid_on: Option<Date>,
    },
    Planner {
        planned_delivery_date: Option<Date>,
        planned_priority: Option<String>,
        planned_warehouse_id: Option<i64>,
        #[serde(default, deserialize_with = "qty_field")]
        planned_solar_panel_qty: Option<String>,
        #[serde(default, deserialize_with = "qty_field")]
        planned_inverter_qty: Option<String>,
    },
    Delivery {
        challan_number: Option<String>,
        delivered_on: Option<Date>,
        remarks: Option<String>,
    },
    AssignFabricatorAndInstaller {
        fabricator: Option<String>,
        installer: Option<String>,
    },
    Fabrication {
        started_on: Option<Date>,
        finished_on: Option<Date>,
        remarks: Option<String>,
    },
    Installation {
        installed_on: Option<Date>,
        remarks: Option<String>,
    },
    NetmeterApply {
        application_number: Option<String>,
        applied_on: Option<Date>,
    },
    NetmeterInstalled {
        meter_number: Option<String>,
        installed_on: Option<Date>,
    },
    SubsidyClaim {
        claim_reference: Option<String>,
        claimed_on: Option<Date>,
    },
    SubsidyDisbursed {
        disbursed_amount: Option<Decimal>,
        disbursed_on: Option<Date>,
    },
}

impl StagePayload {
    /// The stage this payload targets.
    pub fn stage(&self) -> StageKey {
        match self {
            StagePayload::EstimateGenerated { .. } => StageKey::EstimateGenerated,
            StagePayload::EstimatePaid { .. } => StageKey::EstimatePaid,
            StagePayload::Planner { .. } => StageKey::Planner,
            StagePayload::Delivery { .. } => StageKey::Delivery,
            StagePayload::AssignFabricatorAndInstaller { .. } => {
                StageKey::AssignFabricatorAndInstaller
            }
            StagePayload::Fabrication { .. } => StageKey::Fabrication,
            StagePayload::Installation { .. } => StageKey::Installation,
            StagePayload::NetmeterApply { .. } => StageKey::NetmeterApply,
            StagePayload::NetmeterInstalled { .. } => StageKey::NetmeterInstalled,
            StagePayload::SubsidyClaim { .. } => StageKey::SubsidyClaim,
            StagePayload::SubsidyDisbursed { .. } => StageKey::SubsidyDisbursed,
        }
    }

    /// Validates the stage's required fields and field-level checks.
    ///
    /// Fails with `Validation` naming the first offending field; nothing is
    /// persisted on failure.
    pub fn validate(&self) -> Result<()> {
        match self {
            StagePayload::EstimateGenerated {
                quotation_number,
                amount,
                due_date,
            } => {
                validate::require_text("quotation_number", quotation_number)?;
                validate::positive_amount("amount", amount)?;
                validate::require_date("due_date", due_date)?;
            }
            StagePayload::EstimatePaid {
                payment_reference,
                amount_received,
                paid_on,
            } => {
                validate::require_text("payment_reference", payment_reference)?;
                validate::positive_amount("amount_received", amount_received)?;
                validate::require_date("paid_on", paid_on)?;
            }
            StagePayload::Planner {
                planned_delivery_date,
                planned_priority,
                planned_warehouse_id,
                planned_solar_panel_qty,
                planned_inverter_qty,
            } => {
                validate::require_date("planned_delivery_date", planned_delivery_date)?;
                validate::check_priority("planned_priority", planned_priority)?;
                validate::positive_id("planned_warehouse_id", planned_warehouse_id)?;
                validate::positive_qty("planned_solar_panel_qty", planned_solar_panel_qty)?;
                validate::positive_qty("planned_inverter_qty", planned_inverter_qty)?;
            }
            StagePayload::Delivery {
                challan_number,
                delivered_on,
                remarks: _,
            } => {
                validate::require_text("challan_number", challan_number)?;
                validate::require_date("delivered_on", delivered_on)?;
            }
            StagePayload::AssignFabricatorAndInstaller {
                fabricator,
                installer,
            } => {
                validate::require_text("fabricator", fabricator)?;
                validate::require_text("installer", installer)?;
            }
            StagePayload::Fabrication {
                started_on,
                finished_on,
                remarks: _,
            } => {
                validate::require_date("started_on", started_on)?;
                validate::require_date("finished_on", finished_on)?;
            }
            StagePayload::Installation {
                installed_on,
                remarks: _,
            } => {
                validate::require_date("installed_on", installed_on)?;
            }
            StagePayload::NetmeterApply {
                application_number,
                applied_on,
            } => {
                validate::require_text("application_number", application_number)?;
                validate::require_date("applied_on", applied_on)?;
            }
            StagePayload::NetmeterInstalled {
                meter_number,
                installed_on,
            } => {
                validate::require_text("meter_number", meter_number)?;
                validate::require_date("installed_on", installed_on)?;
            }
            StagePayload::SubsidyClaim {
                claim_reference,
                claimed_on,
            } => {
                validate::require_text("claim_reference", claim_reference)?;
                validate::require_date("claimed_on", claimed_on)?;
            }
            StagePayload::SubsidyDisbursed {
                disbursed_amount,
                disbursed_on,
            } => {
                validate::positive_amount("disbursed_amount", disbursed_amount)?;
                validate::require_date("disbursed_on", disbursed_on)?;
            }
        }
        Ok(())
    }

    /// Flattens the payload into the business-field object merged onto the
    /// order's `details`. The stage tag and absent fields are dropped.
    pub fn to_details(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut object = match serde_json::to_value(self)? {
            serde_json::Value::Object(object) => object,
            _ => unreachable!("tagged enum serializes to an object"),
        };
        object.remove("stage");
        object.retain(|_, value| !value.is_null());
        Ok(object)
    }
}
