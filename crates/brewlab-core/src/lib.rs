//! Core library for the Brewlab coffee companion.
//!
//! The heart of the crate is the [`calculator`]: pure functions that turn a
//! method's brew steps, each targeting a cumulative amount of water either in
//! grams or as a multiple of the dose, into concrete per-step pours for a
//! given dose. Around it sit the pieces a complete companion needs:
//!
//! - [`models`]: methods, steps, beans, grinders and brew records
//! - [`db`]: the SQLite store
//! - [`lab`]: the async [`CoffeeLab`] repository front-ends talk to
//! - [`timer`]: the guided brew timer state machine
//! - [`export`]: method documents and share links
//! - [`sync`]: the spreadsheet webhook client
//! - [`display`]: markdown formatting for the terminal
//!
//! # Quick Start
//!
//! ```rust
//! use brewlab_core::{
//!     calculator::{effective_water_target, incremental_water_amounts, total_water_weight},
//!     models::{BrewMethod, BrewStep, WaterTarget},
//! };
//!
//! let method: BrewMethod = serde_json::from_str(
//!     r#"{
//!         "id": "6f1c2a4e-8b0d-4c1e-9a57-3d2b7c9e0f11",
//!         "name": "4:6",
//!         "category": "drip",
//!         "recommendedTemp": 92,
//!         "recommendedRatio": 15,
//!         "steps": [
//!             {"name": "Bloom", "type": "pour", "waterEndTargetRatio": 2, "duration": 45},
//!             {"name": "Second", "type": "pour", "waterEndTargetRatio": 6, "duration": 45},
//!             {"name": "Third", "type": "pour", "waterEndTargetRatio": 12, "duration": 45},
//!             {"name": "Finish", "type": "pour", "waterEndTargetRatio": 15, "duration": 45}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(effective_water_target(&method.steps[0], 20.0), Some(40.0));
//! assert_eq!(
//!     incremental_water_amounts(&method.steps, 20.0),
//!     vec![40.0, 80.0, 120.0, 60.0]
//! );
//! assert_eq!(total_water_weight(&method, 20.0), 300.0);
//! ```

pub mod calculator;
pub mod db;
pub mod display;
pub mod error;
pub mod export;
pub mod lab;
pub mod models;
pub mod params;
pub mod sync;
pub mod timer;

// Re-export commonly used types
pub use calculator::{BrewParams, WaterPlan};
pub use db::Database;
pub use display::{
    Beans, CreateResult, DeleteResult, Grinders, LocalDateTime, MethodSummaries,
    OperationStatus, Records, UpdateResult,
};
pub use error::{LabError, Result};
pub use lab::{CoffeeLab, CoffeeLabBuilder, PullReport, PushReport};
pub use models::{
    BrewMethod, BrewRecord, BrewStep, CoffeeBean, GrinderProfile, MethodCategory, RoastLevel,
    SensoryProfile, StepKind, TargetMode, WaterTarget,
};
pub use timer::{BrewTimer, TimerEvent, TimerStatus};
