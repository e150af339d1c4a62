// Values the presentation layer renders as cards and bar charts.
use crate::calculator::PrizeCalculator;
use crate::normalizer::units::from_kg;
use serde::Serialize;
use shared::models::{PrizeProgress, Unit};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub label: String,
    pub baseline_kg: f64,
    pub actual_kg: f64,
    /// baseline + growth target
    pub target_kg: f64,
    pub progress: PrizeProgress,
}

impl ProgressSummary {
    pub fn compute(label: String, baseline_kg: f64, actual_kg: f64, calculator: &PrizeCalculator) -> Self {
        let progress = calculator.calculate(baseline_kg, actual_kg);
        Self {
            label,
            baseline_kg,
            actual_kg,
            target_kg: baseline_kg + progress.growth_target,
            progress,
        }
    }
}

/// Base / actual / target bars, already in the unit the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartBars {
    pub unit: Unit,
    pub decimals: usize,
    pub base: f64,
    pub actual: f64,
    pub target: f64,
}

impl ChartBars {
    pub fn from_summary(summary: &ProgressSummary, unit: Unit) -> Self {
        Self {
            unit,
            decimals: unit.decimals(),
            base: from_kg(summary.baseline_kg, unit),
            actual: from_kg(summary.actual_kg, unit),
            target: from_kg(summary.target_kg, unit),
        }
    }
}
