mod common;

use brewlab_core::{
    CoffeeLabBuilder, PullReport,
    models::{BrewStep, StepKind, TargetMode, WaterTarget},
    params::{CreateMethod, Id, InsertStep, SetIncrementalRatio, SwitchStepMode, WaterPlanRequest},
};
use common::create_test_lab;
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;

#[tokio::test]
async fn test_authoring_workflow() {
    let (_temp_dir, lab) = create_test_lab().await;

    // Start with a single bloom, then build the recipe step by step
    let method = lab
        .create_method(&CreateMethod {
            name: "Three pour V60".to_string(),
            recommended_ratio: 16.0,
            steps: vec![BrewStep::pour("Bloom", WaterTarget::Ratio(2.0), 45)],
            ..Default::default()
        })
        .await
        .expect("Failed to create method");

    for name in ["First", "Second"] {
        lab.insert_step(&InsertStep {
            method_id: method.id,
            position: None,
            step: BrewStep::pour(name, WaterTarget::None, 30),
        })
        .await
        .expect("Failed to insert step");
    }
    lab.insert_step(&InsertStep {
        method_id: method.id,
        position: None,
        step: BrewStep::wait("Drawdown", 60),
    })
    .await
    .unwrap();

    // New pour steps start without a target; give them incremental ratios
    for (index, increment) in [(1, 7.0), (2, 7.0)] {
        lab.switch_step_mode(&SwitchStepMode {
            method_id: method.id,
            index,
            mode: TargetMode::Ratio,
            dose: 15.0,
        })
        .await
        .unwrap();
        lab.set_incremental_ratio(&SetIncrementalRatio {
            method_id: method.id,
            index,
            increment,
        })
        .await
        .unwrap();
    }

    let stored = lab.require_method(&Id { id: method.id }).await.unwrap();
    let ratios: Vec<Option<f64>> = stored.steps.iter().map(|s| s.target.ratio()).collect();
    assert_eq!(ratios, vec![Some(2.0), Some(9.0), Some(16.0), None]);
    assert_eq!(stored.steps[3].kind, StepKind::Wait);

    let plan = lab
        .water_plan(&WaterPlanRequest {
            method_id: method.id,
            dose: 15.0,
        })
        .await
        .unwrap();
    assert_eq!(plan.total_water, 240.0);
    let pours: Vec<f64> = plan.rows.iter().map(|r| r.incremental).collect();
    assert_eq!(pours, vec![30.0, 105.0, 105.0, 0.0]);

    let rendered = plan.to_string();
    assert!(rendered.contains("# Three pour V60 with 15 g coffee"));
    assert!(rendered.contains("- Total water: 240 g (1:16)"));
}

#[tokio::test]
async fn test_reopening_store_keeps_data() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("nested").join("brewlab.db");

    let id = {
        let lab = CoffeeLabBuilder::new()
            .with_database_path(Some(&db_path))
            .build()
            .await
            .expect("Failed to create lab");
        lab.create_method(&CreateMethod {
            name: "Persisted".to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
        .id
    };

    let lab = CoffeeLabBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to reopen lab");
    assert_eq!(lab.database_path(), db_path.as_path());
    assert_eq!(lab.list_grinders().await.unwrap().len(), 2);

    let method = lab.get_method(&Id { id }).await.unwrap();
    assert_eq!(method.map(|m| m.name), Some("Persisted".to_string()));
}

#[tokio::test]
async fn test_pull_merges_unknown_entities() {
    let (_temp_dir, lab) = create_test_lab().await;

    let local = lab
        .create_method(&CreateMethod {
            name: "Local name".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let remote_method = Uuid::new_v4();
    let remote_bean = Uuid::new_v4();

    let snapshot = json!({
        "data": {
            "methods": [
                {
                    "id": local.id,
                    "name": "Remote name",
                    "category": "drip",
                    "recommendedTemp": 92,
                    "recommendedRatio": 15
                },
                {
                    "id": remote_method,
                    "name": "Aeropress",
                    "category": "immersion",
                    "recommendedTemp": 85,
                    "recommendedRatio": 12,
                    "steps": [
                        {"name": "Fill", "type": "pour", "waterEndTarget": 200, "duration": 60}
                    ]
                },
                {"name": "Broken"}
            ],
            "beans": [
                {
                    "id": remote_bean,
                    "name": "Guji",
                    "roastLevel": "light",
                    "purchaseDate": "2024-04-01",
                    "weight": 200,
                    "flavorNotes": "peach, black tea"
                }
            ]
        }
    })
    .to_string();

    let server = MockServer::start();
    let get_all = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/exec")
            .query_param("action", "getAll");
        then.status(200)
            .header("content-type", "application/json")
            .body(snapshot);
    });
    lab.set_sync_url(&server.url("/exec")).await.unwrap();

    let report = lab.pull().await.unwrap().expect("Snapshot should be read");
    assert_eq!(
        report,
        PullReport {
            beans: 1,
            methods: 1,
            ..Default::default()
        }
    );

    get_all.assert();

    let kept = lab.require_method(&Id { id: local.id }).await.unwrap();
    assert_eq!(kept.name, "Local name");

    let pulled = lab.require_method(&Id { id: remote_method }).await.unwrap();
    assert_eq!(pulled.steps[0].target, WaterTarget::Absolute(200.0));

    let bean = lab.get_bean(&Id { id: remote_bean }).await.unwrap().unwrap();
    assert_eq!(bean.flavor_notes, vec!["peach", "black tea"]);
}

#[tokio::test]
async fn test_pull_from_unreachable_endpoint() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/exec", listener.local_addr().unwrap());
    drop(listener);

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let lab = CoffeeLabBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_sync_url(Some(url.clone()))
        .build()
        .await
        .unwrap();

    assert_eq!(lab.sync_url().await.unwrap(), Some(url));
    assert_eq!(lab.pull().await.unwrap(), None);
}
