//! Grinder profile model definition.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Brew styles a grinder can carry a recommended setting range for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BrewStyle {
    Espresso,
    PourOver,
    FrenchPress,
}

impl FromStr for BrewStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "espresso" => Ok(BrewStyle::Espresso),
            "pourover" => Ok(BrewStyle::PourOver),
            "frenchpress" => Ok(BrewStyle::FrenchPress),
            _ => Err(format!("Invalid brew style: {s}")),
        }
    }
}

impl BrewStyle {
    /// All styles in display order.
    pub const ALL: [BrewStyle; 3] = [BrewStyle::Espresso, BrewStyle::PourOver, BrewStyle::FrenchPress];

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BrewStyle::Espresso => "Espresso",
            BrewStyle::PourOver => "Pour-over",
            BrewStyle::FrenchPress => "French press",
        }
    }
}

/// Recommended `[low, high]` setting ranges per brew style.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GrindRanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub espresso: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pour_over: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french_press: Option<(f64, f64)>,
}

impl GrindRanges {
    /// Range for a style, if one is recorded.
    pub fn get(&self, style: BrewStyle) -> Option<(f64, f64)> {
        match style {
            BrewStyle::Espresso => self.espresso,
            BrewStyle::PourOver => self.pour_over,
            BrewStyle::FrenchPress => self.french_press,
        }
    }

    /// Whether no range is recorded at all.
    pub fn is_empty(&self) -> bool {
        self.espresso.is_none() && self.pour_over.is_none() && self.french_press.is_none()
    }
}

/// A grinder and its adjustment scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrinderProfile {
    /// Unique identifier for the grinder
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Setting used when nothing else is chosen
    pub default_setting: f64,

    /// Finest setting
    pub min_setting: f64,

    /// Coarsest setting
    pub max_setting: f64,

    /// Increment between settings
    pub step: f64,

    /// Recommended ranges per brew style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<GrindRanges>,
}

impl GrinderProfile {
    /// Recommended range for a brew style, if the profile has one.
    pub fn range_for(&self, style: BrewStyle) -> Option<(f64, f64)> {
        self.ranges.and_then(|ranges| ranges.get(style))
    }

    /// Whether the name marks this as the preferred default grinder.
    pub fn is_preferred(&self) -> bool {
        self.name.contains("Timemore") || self.name.contains("泰摩")
    }

    /// Profiles seeded into a fresh store.
    pub fn defaults() -> Vec<GrinderProfile> {
        vec![
            GrinderProfile {
                id: Uuid::new_v4(),
                name: "Timemore S3".to_string(),
                default_setting: 7.0,
                min_setting: 0.0,
                max_setting: 9.0,
                step: 0.1,
                ranges: Some(GrindRanges {
                    espresso: Some((0.5, 1.5)),
                    pour_over: Some((5.5, 7.5)),
                    french_press: Some((8.0, 9.0)),
                }),
            },
            GrinderProfile {
                id: Uuid::new_v4(),
                name: "Pegasus 600N".to_string(),
                default_setting: 4.0,
                min_setting: 1.0,
                max_setting: 8.0,
                step: 0.5,
                ranges: Some(GrindRanges {
                    espresso: Some((1.5, 2.5)),
                    pour_over: Some((3.5, 4.5)),
                    french_press: Some((5.5, 6.5)),
                }),
            },
        ]
    }
}
