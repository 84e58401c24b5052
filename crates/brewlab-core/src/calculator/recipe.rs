//! Whole-brew parameters derived from a dose.

use serde::Serialize;

use crate::models::{BrewMethod, RoastLevel};

/// Water, temperature and ratio recommended for a dose.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewParams {
    /// Total water in grams
    pub water_weight: f64,
    /// Water temperature in °C
    pub temperature: f64,
    /// Grams of water per gram of coffee
    pub ratio: f64,
}

impl BrewParams {
    /// Parameters from a method's recommended ratio and temperature.
    pub fn for_method(method: &BrewMethod, dose: f64) -> Self {
        Self {
            water_weight: dose * method.recommended_ratio,
            temperature: method.recommended_temp,
            ratio: method.recommended_ratio,
        }
    }

    /// Rule-of-thumb parameters for a roast level.
    ///
    /// Light roasts brew longer and hotter, dark roasts shorter and cooler.
    /// Levels between the three anchors use the medium values.
    pub fn for_roast(dose: f64, roast: RoastLevel) -> Self {
        let (ratio, temperature) = match roast {
            RoastLevel::Light => (16.0, 92.0),
            RoastLevel::Dark => (13.0, 85.0),
            RoastLevel::Medium | RoastLevel::ExtraLight | RoastLevel::MediumDark => (15.0, 90.0),
        };

        Self {
            water_weight: dose * ratio,
            temperature,
            ratio,
        }
    }

    /// Ratio formatted as `1:N`.
    pub fn ratio_label(&self) -> String {
        format!("1:{}", self.ratio)
    }
}
