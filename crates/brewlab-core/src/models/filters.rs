//! Filter types for querying the bean catalog.

use super::RoastLevel;

/// Filter options for listing coffee beans.
#[derive(Debug, Clone, Default)]
pub struct BeanFilter {
    /// Only beans still marked active
    pub active_only: bool,

    /// Only beans of this roast level
    pub roast_level: Option<RoastLevel>,

    /// Filter by bean name (case-insensitive partial match)
    pub name_contains: Option<String>,
}

impl BeanFilter {
    /// Filter that keeps only active beans.
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Default::default()
        }
    }
}
