//! Data models for brew methods, beans, grinders and brew records.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so that the data structures stay free of
//! presentation logic.
//!
//! All models serialize with camelCase field names so that exported method
//! documents and sync payloads match the JSON the mobile app has always
//! produced.
//!
//! # Examples
//!
//! ```rust
//! use brewlab_core::models::{BrewStep, WaterTarget};
//!
//! let bloom = BrewStep::pour("Bloom", WaterTarget::Ratio(2.0), 30);
//! let json = serde_json::to_string(&bloom).unwrap();
//! assert!(json.contains("\"waterEndTargetRatio\":2.0"));
//!
//! // Legacy records may carry both fields; the ratio wins.
//! let step: BrewStep = serde_json::from_str(
//!     r#"{"name":"Pour","type":"pour","waterEndTarget":150,"waterEndTargetRatio":5,"duration":20}"#,
//! )
//! .unwrap();
//! assert_eq!(step.target, WaterTarget::Ratio(5.0));
//! ```

pub mod bean;
pub mod filters;
pub mod grinder;
pub mod method;
pub mod record;
pub mod step;
pub mod summary;


pub use bean::{CoffeeBean, RoastLevel, parse_flavor_notes};
pub use filters::BeanFilter;
pub use grinder::{BrewStyle, GrindRanges, GrinderProfile};
pub use method::{BrewMethod, MethodCategory};
pub use record::{BrewRecord, SensoryProfile};
pub use step::{BrewStep, StepKind, TargetMode, WaterTarget};
pub use summary::MethodSummary;
