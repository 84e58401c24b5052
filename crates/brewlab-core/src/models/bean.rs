//! Coffee bean model definition.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Roast level of a coffee bean.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoastLevel {
    ExtraLight,
    Light,
    #[default]
    Medium,
    MediumDark,
    Dark,
}

impl FromStr for RoastLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "extralight" => Ok(RoastLevel::ExtraLight),
            "light" => Ok(RoastLevel::Light),
            "medium" => Ok(RoastLevel::Medium),
            "mediumdark" => Ok(RoastLevel::MediumDark),
            "dark" => Ok(RoastLevel::Dark),
            _ => Err(format!("Invalid roast level: {s}")),
        }
    }
}

impl RoastLevel {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::ExtraLight => "extralight",
            RoastLevel::Light => "light",
            RoastLevel::Medium => "medium",
            RoastLevel::MediumDark => "mediumdark",
            RoastLevel::Dark => "dark",
        }
    }
}

/// A bag of coffee in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeBean {
    /// Unique identifier for the bean
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Roast level
    pub roast_level: RoastLevel,

    /// Roaster or shop the bag came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<String>,

    /// Purchase date
    pub purchase_date: Date,

    /// Remaining weight in grams
    pub weight: f64,

    /// Tasting notes
    #[serde(default, deserialize_with = "deserialize_flavor_notes")]
    pub flavor_notes: Vec<String>,

    /// Whether the bag is still in use
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Split free-text flavor notes on ASCII or full-width commas.
///
/// ```rust
/// use brewlab_core::models::parse_flavor_notes;
///
/// assert_eq!(
///     parse_flavor_notes("berry, citrus，  honey ,"),
///     vec!["berry", "citrus", "honey"]
/// );
/// ```
pub fn parse_flavor_notes(input: &str) -> Vec<String> {
    input
        .split([',', '，'])
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(String::from)
        .collect()
}

/// Accepts flavor notes either as a list or as one comma-separated string,
/// which is how the spreadsheet endpoint stores them.
fn deserialize_flavor_notes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Notes {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Notes::deserialize(deserializer)? {
        Notes::List(list) => list,
        Notes::Text(text) => parse_flavor_notes(&text),
    })
}
