//! Tests for the lab module.

use jiff::civil::date;
use tempfile::TempDir;

use super::*;
use crate::{
    models::{BrewStep, RoastLevel, StepKind, TargetMode, WaterTarget},
    params::{
        CreateBean, CreateMethod, Delete, Id, InsertStep, ListBeans, LogBrew,
        SetIncrementalRatio, StepIndex, SwitchStepMode, UpdateBean, UpdateGrinder, UpdateMethod,
        WaterPlanRequest,
    },
};

/// Helper function to create a test lab
async fn create_test_lab() -> (TempDir, CoffeeLab) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let lab = CoffeeLabBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create lab");
    (temp_dir, lab)
}

fn four_six() -> CreateMethod {
    CreateMethod {
        name: "4:6".to_string(),
        steps: vec![
            BrewStep::pour("Bloom", WaterTarget::Ratio(2.0), 45),
            BrewStep::pour("Second", WaterTarget::Ratio(6.0), 45),
            BrewStep::pour("Third", WaterTarget::Ratio(12.0), 45),
            BrewStep::pour("Finish", WaterTarget::Ratio(15.0), 45),
            BrewStep::wait("Drawdown", 30),
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_and_get_method() {
    let (_temp_dir, lab) = create_test_lab().await;

    let method = lab
        .create_method(&four_six())
        .await
        .expect("Failed to create method");

    let fetched = lab
        .get_method(&Id { id: method.id })
        .await
        .expect("Failed to get method")
        .expect("Method should exist");

    assert_eq!(fetched.name, "4:6");
    assert_eq!(fetched.steps.len(), 5);
    assert_eq!(fetched.steps[3].target, WaterTarget::Ratio(15.0));
    assert_eq!(fetched.steps[4].kind, StepKind::Wait);
    assert_eq!(fetched.recommended_ratio, 15.0);
}

#[tokio::test]
async fn test_create_method_rejects_blank_name() {
    let (_temp_dir, lab) = create_test_lab().await;

    let result = lab
        .create_method(&CreateMethod {
            name: "   ".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(LabError::InvalidInput { ref field, .. }) if field == "name"));
}

#[tokio::test]
async fn test_list_method_summaries() {
    let (_temp_dir, lab) = create_test_lab().await;

    lab.create_method(&four_six()).await.unwrap();
    lab.create_method(&CreateMethod {
        name: "Empty".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    let summaries = lab.list_method_summaries().await.unwrap();
    assert_eq!(summaries.len(), 2);

    let tetsu = summaries.iter().find(|s| s.name == "4:6").unwrap();
    assert_eq!(tetsu.total_steps, 5);
    assert_eq!(tetsu.pour_steps, 4);
    assert_eq!(tetsu.total_duration, 210);
}

#[tokio::test]
async fn test_update_method() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    let updated = lab
        .update_method(&UpdateMethod {
            id: method.id,
            name: Some("Tetsu 4:6".to_string()),
            recommended_temp: Some(90.0),
            ..Default::default()
        })
        .await
        .unwrap()
        .expect("Method should exist");

    assert_eq!(updated.name, "Tetsu 4:6");
    assert_eq!(updated.recommended_temp, 90.0);
    assert_eq!(updated.steps.len(), 5);

    let missing = lab
        .update_method(&UpdateMethod {
            id: uuid::Uuid::new_v4(),
            name: Some("Ghost".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_delete_method_requires_confirmation() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    let result = lab
        .delete_method(&Delete {
            id: method.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(result, Err(LabError::InvalidInput { ref field, .. }) if field == "confirmed"));

    let deleted = lab
        .delete_method(&Delete {
            id: method.id,
            confirmed: true,
        })
        .await
        .unwrap();
    assert_eq!(deleted.map(|m| m.id), Some(method.id));
    assert!(lab.get_method(&Id { id: method.id }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_water_plan() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    let plan = lab
        .water_plan(&WaterPlanRequest {
            method_id: method.id,
            dose: 20.0,
        })
        .await
        .unwrap();

    assert_eq!(plan.total_water, 300.0);
    assert_eq!(plan.effective_ratio(), Some(15.0));
    let pours: Vec<f64> = plan.rows.iter().map(|r| r.incremental).collect();
    assert_eq!(pours, vec![40.0, 80.0, 120.0, 60.0, 0.0]);
    assert_eq!(plan.rows[4].cumulative, None);
}

#[tokio::test]
async fn test_water_plan_for_missing_method() {
    let (_temp_dir, lab) = create_test_lab().await;
    let id = uuid::Uuid::new_v4();

    let result = lab
        .water_plan(&WaterPlanRequest {
            method_id: id,
            dose: 15.0,
        })
        .await;

    assert!(matches!(result, Err(LabError::MethodNotFound { id: missing }) if missing == id));
}

#[tokio::test]
async fn test_insert_and_remove_steps() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    let method = lab
        .insert_step(&InsertStep {
            method_id: method.id,
            position: Some(1),
            step: BrewStep::wait("Swirl", 10),
        })
        .await
        .unwrap();
    assert_eq!(method.steps.len(), 6);
    assert_eq!(method.steps[1].name, "Swirl");
    assert_eq!(method.steps[2].name, "Second");

    let method = lab
        .insert_step(&InsertStep {
            method_id: method.id,
            position: None,
            step: BrewStep::wait("Serve", 5),
        })
        .await
        .unwrap();
    assert_eq!(method.steps.last().map(|s| s.name.as_str()), Some("Serve"));

    let method = lab
        .remove_step(&StepIndex {
            method_id: method.id,
            index: 1,
        })
        .await
        .unwrap();
    assert_eq!(method.steps.len(), 6);
    assert_eq!(method.steps[1].name, "Second");

    let stored = lab.require_method(&Id { id: method.id }).await.unwrap();
    assert_eq!(stored.steps, method.steps);
}

#[tokio::test]
async fn test_step_index_out_of_range() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    let result = lab
        .remove_step(&StepIndex {
            method_id: method.id,
            index: 5,
        })
        .await;
    assert!(matches!(result, Err(LabError::InvalidInput { ref field, .. }) if field == "index"));

    let result = lab
        .insert_step(&InsertStep {
            method_id: method.id,
            position: Some(9),
            step: BrewStep::wait("Late", 5),
        })
        .await;
    assert!(matches!(result, Err(LabError::InvalidInput { ref field, .. }) if field == "position"));
}

#[tokio::test]
async fn test_set_incremental_ratio_keeps_later_pours() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    let method = lab
        .set_incremental_ratio(&SetIncrementalRatio {
            method_id: method.id,
            index: 1,
            increment: 3.0,
        })
        .await
        .unwrap();

    let ratios: Vec<Option<f64>> = method.steps.iter().map(|s| s.target.ratio()).collect();
    assert_eq!(
        ratios,
        vec![Some(2.0), Some(5.0), Some(11.0), Some(14.0), None]
    );
}

#[tokio::test]
async fn test_switch_step_mode() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    let method = lab
        .switch_step_mode(&SwitchStepMode {
            method_id: method.id,
            index: 0,
            mode: TargetMode::Absolute,
            dose: 18.0,
        })
        .await
        .unwrap();
    assert_eq!(method.steps[0].target, WaterTarget::Absolute(36.0));

    let method = lab
        .switch_step_mode(&SwitchStepMode {
            method_id: method.id,
            index: 0,
            mode: TargetMode::Ratio,
            dose: 12.0,
        })
        .await
        .unwrap();
    assert_eq!(method.steps[0].target, WaterTarget::Ratio(3.0));
}

#[tokio::test]
async fn test_export_and_import_method() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    let exported = lab.export_method(&Id { id: method.id }).await.unwrap();
    assert_eq!(exported.file_name, "4:6.json");

    let imported = lab.import_method(&exported.json).await.unwrap();
    assert_ne!(imported.id, method.id);
    assert_eq!(imported.steps, method.steps);
    assert_eq!(lab.list_methods().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_share_link_round_trip() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    let link = lab
        .share_method(&Id { id: method.id }, "https://brew.example/")
        .await
        .unwrap();
    assert!(link.starts_with("https://brew.example/#/methods?import="));

    let imported = lab.import_share_link(&link).await.unwrap();
    assert_eq!(imported.name, "4:6");
    assert_eq!(imported.steps, method.steps);

    let result = lab.import_share_link("https://brew.example/#/methods").await;
    assert!(matches!(result, Err(LabError::InvalidInput { ref field, .. }) if field == "link"));
}

#[tokio::test]
async fn test_bean_catalog() {
    let (_temp_dir, lab) = create_test_lab().await;

    let bean = lab
        .create_bean(&CreateBean {
            name: "Yirgacheffe".to_string(),
            roast_level: RoastLevel::Light,
            shop: Some("Corner Roasters".to_string()),
            purchase_date: date(2024, 3, 1),
            weight: 250.0,
            flavor_notes: vec!["jasmine".to_string(), "lemon".to_string()],
        })
        .await
        .unwrap();

    lab.update_bean(&UpdateBean {
        id: bean.id,
        is_active: Some(false),
        ..Default::default()
    })
    .await
    .unwrap()
    .expect("Bean should exist");

    let all = lab.list_beans(&ListBeans { active_only: false }).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].flavor_notes, vec!["jasmine", "lemon"]);
    assert!(!all[0].is_active);

    let active = lab.list_beans(&ListBeans { active_only: true }).await.unwrap();
    assert!(active.is_empty());
}

#[tokio::test]
async fn test_default_grinder_prefers_timemore() {
    let (_temp_dir, lab) = create_test_lab().await;

    let grinders = lab.list_grinders().await.unwrap();
    assert_eq!(grinders.len(), 2);

    let default = lab.default_grinder().await.unwrap().expect("Seeded grinder");
    assert_eq!(default.name, "Timemore S3");
}

#[tokio::test]
async fn test_update_grinder_rejects_blank_name_and_zero_step() {
    let (_temp_dir, lab) = create_test_lab().await;
    let grinder = lab.default_grinder().await.unwrap().expect("Seeded grinder");

    let result = lab
        .update_grinder(&UpdateGrinder {
            id: grinder.id,
            name: Some("   ".to_string()),
            step: Some(0.0),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(LabError::InvalidInput { ref field, .. }) if field == "name"));

    let result = lab
        .update_grinder(&UpdateGrinder {
            id: grinder.id,
            step: Some(0.0),
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(LabError::InvalidInput { ref field, .. }) if field == "step"));

    let stored = lab
        .get_grinder(&Id { id: grinder.id })
        .await
        .unwrap()
        .expect("Grinder still exists");
    assert_eq!(stored.name, "Timemore S3");
    assert!(stored.step > 0.0);
}

#[tokio::test]
async fn test_log_brew_snapshots_bean_name() {
    let (_temp_dir, lab) = create_test_lab().await;

    let bean = lab
        .create_bean(&CreateBean {
            name: "Huila".to_string(),
            roast_level: RoastLevel::Medium,
            shop: None,
            purchase_date: date(2024, 5, 20),
            weight: 200.0,
            flavor_notes: vec![],
        })
        .await
        .unwrap();

    let known = lab
        .log_brew(&LogBrew {
            bean_id: Some(bean.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(known.bean_name, "Huila");

    let unknown = lab
        .log_brew(&LogBrew {
            bean_id: Some(uuid::Uuid::new_v4()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(unknown.bean_name, record_ops::UNKNOWN_BEAN);

    let records = lab.list_records(None).await.unwrap();
    assert_eq!(records.len(), 2);

    let limited = lab.list_records(Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);

    let fetched = lab.get_record(&Id { id: known.id }).await.unwrap().unwrap();
    assert_eq!(fetched.sensory, known.sensory);
}

#[tokio::test]
async fn test_sync_url_setting() {
    let (_temp_dir, lab) = create_test_lab().await;

    assert_eq!(lab.sync_url().await.unwrap(), None);

    lab.set_sync_url("  https://script.example/exec  ").await.unwrap();
    assert_eq!(
        lab.sync_url().await.unwrap().as_deref(),
        Some("https://script.example/exec")
    );

    assert!(lab.set_sync_url(" ").await.is_err());

    assert!(lab.clear_sync_url().await.unwrap());
    assert!(!lab.clear_sync_url().await.unwrap());
    assert_eq!(lab.sync_url().await.unwrap(), None);
}

#[tokio::test]
async fn test_push_without_sync_url() {
    let (_temp_dir, lab) = create_test_lab().await;
    let method = lab.create_method(&four_six()).await.unwrap();

    assert!(!lab.push_method(&method).await.unwrap());

    let result = lab.push_all().await;
    assert!(matches!(result, Err(LabError::Configuration { .. })));
    let result = lab.pull().await;
    assert!(matches!(result, Err(LabError::Configuration { .. })));
}
