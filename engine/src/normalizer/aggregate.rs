// Period aggregation: an explicit semester total always wins over the monthly sum.
use super::units::{input_to_kg, UnitConverter};
use shared::models::{BaselineSemester, Month, Period, Unit};
use std::collections::BTreeMap;

/// Raw text the user typed for one semester. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemesterInputs {
    pub total: String,
    pub monthly: BTreeMap<Month, String>,
}

impl SemesterInputs {
    pub fn month_text(&self, month: Month) -> &str {
        self.monthly.get(&month).map(String::as_str).unwrap_or("")
    }

    pub fn has_total_override(&self) -> bool {
        !self.total.trim().is_empty()
    }

    pub fn has_any_input(&self) -> bool {
        self.has_total_override() || self.monthly.values().any(|v| !v.trim().is_empty())
    }

    pub fn month_kg(&self, month: Month, unit: Unit) -> f64 {
        input_to_kg(self.month_text(month), unit)
    }

    pub fn monthly_sum_kg(&self, months: &[Month], unit: Unit) -> f64 {
        months.iter().map(|m| self.month_kg(*m, unit)).sum()
    }

    /// The total override when present, otherwise the monthly sum.
    pub fn semester_actual_kg(&self, months: &[Month], unit: Unit) -> f64 {
        if self.has_total_override() {
            input_to_kg(&self.total, unit)
        } else {
            self.monthly_sum_kg(months, unit)
        }
    }
}

/// Baseline and actual, both in kg, for the period being looked at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSelection {
    pub period: Period,
    pub baseline_kg: f64,
    pub actual_kg: f64,
}

pub fn baseline_month_kg(semester: &BaselineSemester, month: Month, converter: &UnitConverter) -> f64 {
    converter.stored_to_kg(semester.stored(month))
}

pub fn baseline_semester_kg(semester: &BaselineSemester, converter: &UnitConverter) -> f64 {
    semester
        .months()
        .iter()
        .map(|m| baseline_month_kg(semester, *m, converter))
        .sum()
}

pub fn select_period(
    period: Period,
    semester: &BaselineSemester,
    inputs: &SemesterInputs,
    unit: Unit,
    converter: &UnitConverter,
) -> PeriodSelection {
    let (baseline_kg, actual_kg) = match period {
        Period::Total => (
            baseline_semester_kg(semester, converter),
            inputs.semester_actual_kg(&semester.months(), unit),
        ),
        Period::Month(month) => (
            baseline_month_kg(semester, month, converter),
            inputs.month_kg(month, unit),
        ),
    };
    PeriodSelection { period, baseline_kg, actual_kg }
}
