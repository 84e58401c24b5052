//! Result wrappers for create, update and delete operations, plus sync
//! reports.

use std::fmt;

use crate::{
    lab::{PullReport, PushReport},
    models::{BrewMethod, BrewRecord, CoffeeBean, GrinderProfile},
};

/// Names a resource for result messages.
pub trait Resource: fmt::Display {
    /// Lower-case kind, e.g. "method".
    const KIND: &'static str;

    fn label(&self) -> String;
}

impl Resource for BrewMethod {
    const KIND: &'static str = "method";

    fn label(&self) -> String {
        format!("'{}' (ID: {})", self.name, self.id)
    }
}

impl Resource for CoffeeBean {
    const KIND: &'static str = "bean";

    fn label(&self) -> String {
        format!("'{}' (ID: {})", self.name, self.id)
    }
}

impl Resource for GrinderProfile {
    const KIND: &'static str = "grinder";

    fn label(&self) -> String {
        format!("'{}' (ID: {})", self.name, self.id)
    }
}

impl Resource for BrewRecord {
    const KIND: &'static str = "brew record";

    fn label(&self) -> String {
        format!("for '{}' (ID: {})", self.bean_name, self.id)
    }
}

/// Outcome of a create operation: a confirmation line and the new resource.
///
/// ```rust
/// use brewlab_core::{display::CreateResult, models::GrinderProfile};
///
/// let grinder = GrinderProfile::defaults().remove(1);
/// let output = CreateResult::new(grinder).to_string();
/// assert!(output.starts_with("Created grinder 'Pegasus 600N'"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} {}", T::KIND, self.resource.label())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of an update, with the list of changes that were applied.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} {}", T::KIND, self.resource.label())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of a delete: one confirmation line.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for DeleteResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted {} {}", T::KIND, self.resource.label())
    }
}

impl fmt::Display for PushReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Pushed {} entities to the sync endpoint ({} rejected)",
            self.accepted, self.rejected
        )
    }
}

impl fmt::Display for PullReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pulled {} new entities", self.total())?;
        writeln!(f)?;
        writeln!(f, "- Beans: {}", self.beans)?;
        writeln!(f, "- Grinders: {}", self.grinders)?;
        writeln!(f, "- Methods: {}", self.methods)?;
        writeln!(f, "- Brew records: {}", self.records)
    }
}
