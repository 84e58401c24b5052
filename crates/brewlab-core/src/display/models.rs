//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the models stay free of
//! presentation logic. Every impl emits markdown.

use std::fmt;

use super::{datetime::LocalDateTime, number};
use crate::{
    calculator::{BrewParams, WaterPlan},
    models::{
        BrewMethod, BrewRecord, BrewStep, BrewStyle, CoffeeBean, GrinderProfile, MethodCategory,
        MethodSummary, RoastLevel, SensoryProfile, StepKind, TargetMode, WaterTarget,
    },
    timer::format_clock,
};

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetMode::Ratio => write!(f, "ratio"),
            TargetMode::Absolute => write!(f, "grams"),
        }
    }
}

impl fmt::Display for MethodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoastLevel::ExtraLight => "extra light",
            RoastLevel::Light => "light",
            RoastLevel::Medium => "medium",
            RoastLevel::MediumDark => "medium dark",
            RoastLevel::Dark => "dark",
        };
        write!(f, "{label}")
    }
}

impl fmt::Display for WaterTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaterTarget::None => write!(f, "-"),
            WaterTarget::Absolute(grams) => write!(f, "{} g", number(*grams)),
            WaterTarget::Ratio(ratio) => write!(f, "×{}", number(*ratio)),
        }
    }
}

/// `1:N` for a water-per-gram ratio.
fn ratio_label(ratio: f64) -> String {
    format!("1:{}", number(ratio))
}

impl fmt::Display for BrewStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, {})",
            self.name,
            self.kind,
            self.target,
            format_clock(self.duration)
        )
    }
}

impl fmt::Display for BrewMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Temperature: {}°C", number(self.recommended_temp))?;
        writeln!(f, "- Ratio: {}", ratio_label(self.recommended_ratio))?;
        writeln!(f, "- Total time: {}", format_clock(self.total_duration()))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this method.")?;
            return Ok(());
        }

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        writeln!(f, "| # | Step | Type | Target | Duration |")?;
        writeln!(f, "|--:|------|------|-------:|---------:|")?;
        for (index, step) in self.steps.iter().enumerate() {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} |",
                index,
                step.name,
                step.kind,
                step.target,
                format_clock(step.duration)
            )?;
        }

        let notes: Vec<_> = self
            .steps
            .iter()
            .enumerate()
            .filter_map(|(index, step)| step.description.as_ref().map(|d| (index, d)))
            .collect();
        if !notes.is_empty() {
            writeln!(f)?;
            for (index, desc) in notes {
                writeln!(f, "- **{index}. {}**: {desc}", self.steps[index].name)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for MethodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.name, self.category)?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(
            f,
            "- **Recipe**: {} at {}°C",
            ratio_label(self.recommended_ratio),
            number(self.recommended_temp)
        )?;
        writeln!(
            f,
            "- **Steps**: {} ({} pours, {})",
            self.total_steps,
            self.pour_steps,
            format_clock(self.total_duration)
        )?;
        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for CoffeeBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let retired = if self.is_active { "" } else { " (finished)" };
        writeln!(f, "## {}{retired}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(f, "- **Roast**: {}", self.roast_level)?;
        if let Some(shop) = &self.shop {
            writeln!(f, "- **Shop**: {shop}")?;
        }
        writeln!(f, "- **Purchased**: {}", self.purchase_date)?;
        writeln!(f, "- **Weight**: {} g", number(self.weight))?;
        if !self.flavor_notes.is_empty() {
            writeln!(f, "- **Notes**: {}", self.flavor_notes.join(", "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for GrinderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(
            f,
            "- **Settings**: {} to {} in steps of {} (default {})",
            number(self.min_setting),
            number(self.max_setting),
            number(self.step),
            number(self.default_setting)
        )?;
        for style in BrewStyle::ALL {
            if let Some((low, high)) = self.range_for(style) {
                writeln!(
                    f,
                    "- **{}**: {} - {}",
                    style.label(),
                    number(low),
                    number(high)
                )?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for SensoryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, score) in self.scores() {
            let filled = usize::from(score.min(Self::MAX_SCORE));
            let empty = usize::from(Self::MAX_SCORE) - filled;
            writeln!(
                f,
                "- {name:<10} {}{} {score}",
                "●".repeat(filled),
                "○".repeat(empty)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for BrewRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.bean_name, LocalDateTime(&self.date))?;
        writeln!(f)?;
        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(
            f,
            "- **Brew**: {} g coffee, {} g water at {}°C in {}",
            number(self.bean_weight),
            number(self.water_weight),
            number(self.temperature),
            self.total_time
        )?;
        writeln!(f, "- **Grind setting**: {}", number(self.setting_used))?;
        if let Some(notes) = &self.notes {
            writeln!(f, "- **Notes**: {notes}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.sensory)?;
        writeln!(f)
    }
}

impl fmt::Display for BrewParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Water: {} g", number(self.water_weight))?;
        writeln!(f, "- Temperature: {}°C", number(self.temperature))?;
        writeln!(f, "- Ratio: {}", self.ratio_label())
    }
}

impl fmt::Display for WaterPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} with {} g coffee", self.method.name, number(self.dose))?;
        writeln!(f)?;
        write!(f, "- Total water: {} g", number(self.total_water))?;
        match self.effective_ratio() {
            Some(ratio) => writeln!(f, " ({})", ratio_label(ratio))?,
            None => writeln!(f)?,
        }
        writeln!(
            f,
            "- Temperature: {}°C",
            number(self.method.recommended_temp)
        )?;
        writeln!(f, "- Total time: {}", format_clock(self.method.total_duration()))?;

        if self.rows.is_empty() {
            writeln!(f, "\nNo steps in this method.")?;
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "| # | Step | Duration | Pour | Total |")?;
        writeln!(f, "|--:|------|---------:|-----:|------:|")?;
        for (index, row) in self.rows.iter().enumerate() {
            let pour = match (row.kind, row.cumulative) {
                (StepKind::Wait, _) | (_, None) => "-".to_string(),
                _ => format!("{} g", number(row.incremental)),
            };
            let total = row
                .cumulative
                .map(|grams| format!("{} g", number(grams)))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "| {index} | {} | {} | {pour} | {total} |",
                row.name,
                format_clock(row.duration)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use uuid::Uuid;

    use super::*;

    fn method() -> BrewMethod {
        BrewMethod {
            id: Uuid::nil(),
            name: "Tetsu 4:6".to_string(),
            category: MethodCategory::Drip,
            recommended_temp: 92.0,
            recommended_ratio: 15.0,
            steps: vec![
                BrewStep::pour("First", WaterTarget::Ratio(3.0), 45),
                BrewStep::pour("Second", WaterTarget::Absolute(120.0), 45)
                    .with_description("Pour in circles"),
                BrewStep::wait("Drawdown", 60),
            ],
            description: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_water_target_display() {
        assert_eq!(WaterTarget::Ratio(2.5).to_string(), "×2.5");
        assert_eq!(WaterTarget::Absolute(150.0).to_string(), "150 g");
        assert_eq!(WaterTarget::None.to_string(), "-");
    }

    #[test]
    fn test_method_display_lists_steps() {
        let output = method().to_string();
        assert!(output.contains("# Tetsu 4:6"));
        assert!(output.contains("- Ratio: 1:15"));
        assert!(output.contains("| 0 | First | pour | ×3 | 00:45 |"));
        assert!(output.contains("| 2 | Drawdown | wait | - | 01:00 |"));
        assert!(output.contains("**1. Second**: Pour in circles"));
    }

    #[test]
    fn test_water_plan_display() {
        let output = WaterPlan::new(method(), 20.0).to_string();
        assert!(output.contains("# Tetsu 4:6 with 20 g coffee"));
        assert!(output.contains("- Total water: 120 g (1:6)"));
        assert!(output.contains("| 0 | First | 00:45 | 60 g | 60 g |"));
        assert!(output.contains("| 1 | Second | 00:45 | 60 g | 120 g |"));
        assert!(output.contains("| 2 | Drawdown | 01:00 | - | - |"));
    }

    #[test]
    fn test_sensory_profile_display() {
        let profile = SensoryProfile {
            aroma: 5,
            ..Default::default()
        };
        let output = profile.to_string();
        assert!(output.contains("aroma      ●●●●● 5"));
        assert!(output.contains("body       ●●●○○ 3"));
    }
}
