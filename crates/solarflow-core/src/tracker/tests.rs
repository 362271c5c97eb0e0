//! Tests for the tracker module.

use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::TempDir;

use super::*;
use crate::directory::StaticWarehouseDirectory;
use crate::error::TrackerError;
use crate::models::{StageKey, StagePayload, StageStatus, STAGES};
use crate::params::{AddWarehouse, CompleteStage, CreateOrder, Id, ListOrders};

/// Helper function to create a test tracker
async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

/// Tracker whose warehouse directory is a fixed in-memory table
async fn create_test_tracker_with_directory(
    directory: StaticWarehouseDirectory,
) -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_warehouse_directory(Arc::new(directory))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

async fn create_test_order(tracker: &Tracker) -> u64 {
    tracker
        .create_order(&CreateOrder {
            customer: "Asha Verma".to_string(),
            phone: Some("9876543210".to_string()),
            email: None,
            gstin: None,
            site_address: Some("14 MG Road, Pune".to_string()),
        })
        .await
        .expect("Failed to create order")
        .id
}

fn date(text: &str) -> jiff::civil::Date {
    text.parse().expect("date")
}

fn planner_payload(warehouse_id: i64) -> StagePayload {
    StagePayload::Planner {
        planned_delivery_date: Some(date("2024-05-01")),
        planned_priority: Some("High".to_string()),
        planned_warehouse_id: Some(warehouse_id),
        planned_solar_panel_qty: Some("10".to_string()),
        planned_inverter_qty: Some("1".to_string()),
    }
}

/// A valid payload for each stage, matching one order's walk through the
/// pipeline. The installer assigned mid-pipeline is "sunil".
fn payload_for(stage: StageKey) -> StagePayload {
    match stage {
        StageKey::EstimateGenerated => StagePayload::EstimateGenerated {
            quotation_number: Some("Q-2024-001".to_string()),
            amount: Some(Decimal::new(125_000, 0)),
            due_date: Some(date("2024-04-30")),
        },
        StageKey::EstimatePaid => StagePayload::EstimatePaid {
            payment_reference: Some("UTR-77810".to_string()),
            amount_received: Some(Decimal::new(125_000, 0)),
            paid_on: Some(date("2024-04-18")),
        },
        StageKey::Planner => planner_payload(7),
        StageKey::Delivery => StagePayload::Delivery {
            challan_number: Some("CH-104".to_string()),
            delivered_on: Some(date("2024-05-04")),
            remarks: None,
        },
        StageKey::AssignFabricatorAndInstaller => StagePayload::AssignFabricatorAndInstaller {
            fabricator: Some("kiran".to_string()),
            installer: Some("sunil".to_string()),
        },
        StageKey::Fabrication => StagePayload::Fabrication {
            started_on: Some(date("2024-05-06")),
            finished_on: Some(date("2024-05-09")),
            remarks: Some("Frame galvanized".to_string()),
        },
        StageKey::Installation => StagePayload::Installation {
            installed_on: Some(date("2024-05-12")),
            remarks: None,
        },
        StageKey::NetmeterApply => StagePayload::NetmeterApply {
            application_number: Some("NM-221".to_string()),
            applied_on: Some(date("2024-05-14")),
        },
        StageKey::NetmeterInstalled => StagePayload::NetmeterInstalled {
            meter_number: Some("MTR-8812".to_string()),
            installed_on: Some(date("2024-06-02")),
        },
        StageKey::SubsidyClaim => StagePayload::SubsidyClaim {
            claim_reference: Some("SC-19".to_string()),
            claimed_on: Some(date("2024-06-05")),
        },
        StageKey::SubsidyDisbursed => StagePayload::SubsidyDisbursed {
            disbursed_amount: Some(Decimal::new(78_000, 0)),
            disbursed_on: Some(date("2024-07-01")),
        },
    }
}

/// Completes every stage up to and including `last` in pipeline order.
async fn complete_through(tracker: &Tracker, order_id: u64, last: StageKey) {
    for descriptor in &STAGES[..=last.index()] {
        tracker
            .complete_stage(&CompleteStage {
                order_id,
                payload: payload_for(descriptor.key),
                actor: Some("sunil".to_string()),
            })
            .await
            .unwrap_or_else(|e| panic!("Failed to complete {}: {e}", descriptor.key));
    }
}

#[tokio::test]
async fn new_order_starts_at_the_estimate_stage() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;

    let order = tracker
        .get_order(&Id { id: order_id })
        .await
        .expect("Failed to get order")
        .expect("Order should exist");

    assert_eq!(order.current_stage, Some(StageKey::EstimateGenerated));
    assert_eq!(
        order.stage_status(StageKey::EstimateGenerated),
        StageStatus::Pending
    );
    assert_eq!(order.stage_status(StageKey::Planner), StageStatus::Locked);
    assert!(!order.zero_amount_estimate);
    assert!(order.completed_at.is_empty());
}

#[tokio::test]
async fn completing_a_future_stage_is_out_of_order() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;

    let err = tracker
        .complete_stage(&CompleteStage {
            order_id,
            payload: planner_payload(7),
            actor: None,
        })
        .await
        .unwrap_err();

    match err {
        TrackerError::OutOfOrder { stage, current } => {
            assert_eq!(stage, StageKey::Planner);
            assert_eq!(current, Some(StageKey::EstimateGenerated));
        }
        other => panic!("expected out-of-order error, got {other:?}"),
    }
}

#[tokio::test]
async fn completing_the_planner_stage_opens_delivery() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::EstimatePaid).await;

    let order = tracker
        .complete_stage(&CompleteStage {
            order_id,
            payload: planner_payload(7),
            actor: None,
        })
        .await
        .expect("Failed to complete planner stage");

    assert_eq!(order.stage_status(StageKey::Planner), StageStatus::Completed);
    assert_eq!(order.stage_status(StageKey::Delivery), StageStatus::Pending);
    assert_eq!(order.current_stage, Some(StageKey::Delivery));
    assert!(order.completed_at.contains_key(&StageKey::Planner));
    assert_eq!(order.planned_warehouse_id(), Some(7));
    assert_eq!(
        order.details.get("planned_solar_panel_qty"),
        Some(&serde_json::json!("10"))
    );
}

#[tokio::test]
async fn validation_failure_leaves_the_order_untouched() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::EstimatePaid).await;

    let err = tracker
        .complete_stage(&CompleteStage {
            order_id,
            payload: StagePayload::Planner {
                planned_delivery_date: Some(date("2024-05-01")),
                planned_priority: Some("High".to_string()),
                planned_warehouse_id: None,
                planned_solar_panel_qty: Some("10".to_string()),
                planned_inverter_qty: Some("1".to_string()),
            },
            actor: None,
        })
        .await
        .unwrap_err();

    match err {
        TrackerError::Validation { field, .. } => assert_eq!(field, "planned_warehouse_id"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let order = tracker
        .get_order(&Id { id: order_id })
        .await
        .expect("Failed to get order")
        .expect("Order should exist");
    assert_eq!(order.current_stage, Some(StageKey::Planner));
    assert_eq!(order.stage_status(StageKey::Planner), StageStatus::Pending);
    assert!(!order.details.contains_key("planned_delivery_date"));
}

#[tokio::test]
async fn resubmitting_a_completed_stage_updates_fields_only() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::Planner).await;

    let order = tracker
        .complete_stage(&CompleteStage {
            order_id,
            payload: StagePayload::Planner {
                planned_delivery_date: Some(date("2024-05-01")),
                planned_priority: Some("Medium".to_string()),
                planned_warehouse_id: Some(7),
                planned_solar_panel_qty: Some("10".to_string()),
                planned_inverter_qty: Some("1".to_string()),
            },
            actor: None,
        })
        .await
        .expect("Failed to re-submit planner stage");

    assert_eq!(order.current_stage, Some(StageKey::Delivery));
    assert_eq!(order.stage_status(StageKey::Planner), StageStatus::Completed);
    assert_eq!(
        order.details.get("planned_priority"),
        Some(&serde_json::json!("Medium"))
    );
}

#[tokio::test]
async fn updating_a_locked_stage_is_rejected() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;

    let err = tracker
        .update_stage_fields(&CompleteStage {
            order_id,
            payload: planner_payload(7),
            actor: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TrackerError::OutOfOrder { .. }));
}

#[tokio::test]
async fn zero_amount_estimate_skips_to_the_planner_stage() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;

    let order = tracker
        .skip_zero_amount_estimate(&Id { id: order_id })
        .await
        .expect("Failed to skip estimate stages");

    assert!(order.zero_amount_estimate);
    assert_eq!(
        order.stage_status(StageKey::EstimateGenerated),
        StageStatus::Completed
    );
    assert_eq!(
        order.stage_status(StageKey::EstimatePaid),
        StageStatus::Completed
    );
    assert_eq!(order.current_stage, Some(StageKey::Planner));
    assert!(order.completed_at.contains_key(&StageKey::EstimatePaid));
}

#[tokio::test]
async fn zero_amount_shortcut_requires_the_estimate_stage() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::EstimateGenerated).await;

    let err = tracker
        .skip_zero_amount_estimate(&Id { id: order_id })
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::OutOfOrder { .. }));
}

#[tokio::test]
async fn installation_requires_an_actor() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::Fabrication).await;

    let err = tracker
        .complete_stage(&CompleteStage {
            order_id,
            payload: payload_for(StageKey::Installation),
            actor: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Permission {
            stage: StageKey::Installation,
            ..
        }
    ));
}

#[tokio::test]
async fn assigned_installer_may_complete_installation() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::Fabrication).await;

    let order = tracker
        .complete_stage(&CompleteStage {
            order_id,
            payload: payload_for(StageKey::Installation),
            actor: Some("sunil".to_string()),
        })
        .await
        .expect("Installer should be permitted");
    assert_eq!(order.current_stage, Some(StageKey::NetmeterApply));
}

#[tokio::test]
async fn warehouse_manager_may_complete_installation() {
    let directory = StaticWarehouseDirectory::new().with_manager(7, "meera");
    let (_temp_dir, tracker) = create_test_tracker_with_directory(directory).await;
    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::Fabrication).await;

    let order = tracker
        .complete_stage(&CompleteStage {
            order_id,
            payload: payload_for(StageKey::Installation),
            actor: Some("meera".to_string()),
        })
        .await
        .expect("Warehouse manager should be permitted");
    assert_eq!(
        order.stage_status(StageKey::Installation),
        StageStatus::Completed
    );
}

#[tokio::test]
async fn unrelated_actor_may_not_complete_installation() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::Fabrication).await;

    let err = tracker
        .complete_stage(&CompleteStage {
            order_id,
            payload: payload_for(StageKey::Installation),
            actor: Some("ravi".to_string()),
        })
        .await
        .unwrap_err();
    match err {
        TrackerError::Permission { actor, stage } => {
            assert_eq!(actor, "ravi");
            assert_eq!(stage, StageKey::Installation);
        }
        other => panic!("expected permission error, got {other:?}"),
    }

    let order = tracker
        .get_order(&Id { id: order_id })
        .await
        .expect("Failed to get order")
        .expect("Order should exist");
    assert_eq!(order.current_stage, Some(StageKey::Installation));
}

#[tokio::test]
async fn registered_warehouse_manager_is_found_in_the_database() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let warehouse = tracker
        .add_warehouse(&AddWarehouse {
            name: "Central".to_string(),
            manager: "meera".to_string(),
        })
        .await
        .expect("Failed to add warehouse");

    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::EstimatePaid).await;
    for stage in [
        StageKey::Planner,
        StageKey::Delivery,
        StageKey::AssignFabricatorAndInstaller,
        StageKey::Fabrication,
    ] {
        let payload = if stage == StageKey::Planner {
            planner_payload(warehouse.id)
        } else {
            payload_for(stage)
        };
        tracker
            .complete_stage(&CompleteStage {
                order_id,
                payload,
                actor: None,
            })
            .await
            .expect("Failed to complete stage");
    }

    let order = tracker
        .complete_stage(&CompleteStage {
            order_id,
            payload: payload_for(StageKey::Installation),
            actor: Some("meera".to_string()),
        })
        .await
        .expect("Manager from the registry should be permitted");
    assert_eq!(
        order.stage_status(StageKey::Installation),
        StageStatus::Completed
    );
}

#[tokio::test]
async fn the_full_pipeline_reaches_a_terminal_state() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let order_id = create_test_order(&tracker).await;
    complete_through(&tracker, order_id, StageKey::SubsidyDisbursed).await;

    let order = tracker
        .get_order(&Id { id: order_id })
        .await
        .expect("Failed to get order")
        .expect("Order should exist");

    assert_eq!(order.current_stage, None);
    assert!(order.pipeline_complete());
    assert_eq!(order.completed_at.len(), STAGES.len());
    for descriptor in &STAGES {
        assert_eq!(order.stage_status(descriptor.key), StageStatus::Completed);
    }
}

#[tokio::test]
async fn listing_separates_completed_from_in_progress() {
    use crate::models::{CompletionFilter, OrderFilter};

    let (_temp_dir, tracker) = create_test_tracker().await;
    let done_id = create_test_order(&tracker).await;
    complete_through(&tracker, done_id, StageKey::SubsidyDisbursed).await;
    let open_id = create_test_order(&tracker).await;

    let completed = tracker
        .list_orders(&ListOrders {
            filter: OrderFilter {
                completion: Some(CompletionFilter::Completed),
            },
        })
        .await
        .expect("Failed to list completed orders");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, done_id);

    let in_progress = tracker
        .list_orders(&ListOrders {
            filter: OrderFilter {
                completion: Some(CompletionFilter::InProgress),
            },
        })
        .await
        .expect("Failed to list in-progress orders");
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].id, open_id);

    let all = tracker
        .list_orders(&ListOrders::default())
        .await
        .expect("Failed to list orders");
    assert_eq!(all.len(), 2);
}
