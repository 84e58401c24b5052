//! Display formatting for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]),
//! producing markdown that the CLI renders through termimad. Collections and
//! operation outcomes get newtype wrappers so the same data can be shown
//! differently by context: a method in a list is a one-line summary, a method
//! on its own is a full step table.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types   │    │    Markdown     │
//! │ (Method, Bean)  │───▶│ & Result Types  │───▶│     Output      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: list wrappers (MethodSummaries, Beans, Grinders, Records)
//! - [`results`]: CreateResult, UpdateResult, DeleteResult and sync reports
//! - [`status`]: OperationStatus
//! - [`datetime`]: LocalDateTime
//! - [`models`]: Display impls for the domain models and the water plan
//!
//! ```rust
//! use brewlab_core::{
//!     display::{CreateResult, OperationStatus},
//!     models::GrinderProfile,
//! };
//!
//! let grinder = GrinderProfile::defaults().remove(0);
//! let output = CreateResult::new(grinder).to_string();
//! assert!(output.contains("Created grinder"));
//! assert!(output.contains("Timemore S3"));
//!
//! let status = OperationStatus::success("Sync URL saved");
//! assert_eq!(status.to_string(), "Success: Sync URL saved\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Beans, Grinders, MethodSummaries, Records};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;

/// Format a number without a trailing `.0` and with at most two decimals.
///
/// ```rust
/// # use brewlab_core::display::number;
/// assert_eq!(number(15.0), "15");
/// assert_eq!(number(2.5), "2.5");
/// ```
pub fn number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').to_string()
    }
}
