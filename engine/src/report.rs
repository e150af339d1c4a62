// Printable semester snapshot. Built from already-computed figures; rendering
// beyond plain text is left to the presentation layer.
use crate::calculator::PrizeCalculator;
use crate::normalizer::aggregate::{self, SemesterInputs};
use crate::normalizer::UnitConverter;
use crate::session::summary::ProgressSummary;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{BaselineSemester, Month, Unit};
use shared::utils::brazilian_format::{format_currency, format_mass_pair, format_percent};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub month: Month,
    pub baseline_kg: f64,
    pub actual_kg: f64,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterReport {
    pub team_name: String,
    pub semester_label: String,
    pub generated_at: DateTime<Utc>,
    pub growth_rate: f64,
    pub semester: ProgressSummary,
    /// True when the user typed a semester total; monthly rows are then omitted.
    pub total_override: bool,
    /// Months with a positive actual, in calendar order.
    pub rows: Vec<ReportRow>,
}

impl SemesterReport {
    pub fn build(
        team_name: &str,
        semester: &BaselineSemester,
        inputs: &SemesterInputs,
        unit: Unit,
        converter: &UnitConverter,
        calculator: &PrizeCalculator,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let months = semester.months();
        let summary = ProgressSummary::compute(
            semester.label(),
            aggregate::baseline_semester_kg(semester, converter),
            inputs.semester_actual_kg(&months, unit),
            calculator,
        );

        let total_override = inputs.has_total_override();
        let rows = if total_override {
            Vec::new()
        } else {
            months
                .iter()
                .map(|month| {
                    let baseline_kg = aggregate::baseline_month_kg(semester, *month, converter);
                    let actual_kg = inputs.month_kg(*month, unit);
                    ReportRow {
                        month: *month,
                        baseline_kg,
                        actual_kg,
                        progress_percent: calculator.calculate(baseline_kg, actual_kg).progress_percent,
                    }
                })
                .filter(|row| row.actual_kg > 0.0)
                .collect()
        };

        tracing::info!(
            team = %team_name,
            semester = %semester.id,
            rows = rows.len(),
            total_override,
            "Built semester report"
        );

        SemesterReport {
            team_name: team_name.to_string(),
            semester_label: semester.label(),
            generated_at,
            growth_rate: calculator.growth_rate(),
            semester: summary,
            total_override,
            rows,
        }
    }

    pub fn has_details(&self) -> bool {
        !self.rows.is_empty()
    }
}

impl fmt::Display for SemesterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.semester;
        writeln!(f, "{}", self.team_name)?;
        writeln!(f, "{} • Valores em kg e t", self.semester_label)?;
        writeln!(f, "Gerado em {}", self.generated_at.format("%d/%m/%Y %H:%M UTC"))?;
        writeln!(f)?;
        writeln!(f, "Resumo do semestre")?;
        writeln!(f, "  Real acumulado: {}", format_mass_pair(s.actual_kg))?;
        writeln!(f, "  Base: {}", format_mass_pair(s.baseline_kg))?;
        writeln!(f, "Meta de crescimento ({})", format_percent(self.growth_rate * 100.0))?;
        writeln!(f, "  Meta: {}", format_mass_pair(s.target_kg))?;
        writeln!(f, "  Precisa atingir: +{}", format_mass_pair(s.progress.growth_target))?;
        writeln!(f, "Progresso: {}", format_percent(s.progress.progress_percent))?;
        writeln!(f, "  Prêmio estimado: {}", format_currency(s.progress.dynamic_prize))?;
        writeln!(f)?;

        if self.has_details() {
            writeln!(f, "Mês | Base (kg / t) | Real informado (kg / t) | Progresso")?;
            for row in &self.rows {
                writeln!(
                    f,
                    "{} | {} | {} | {}",
                    row.month.label(),
                    format_mass_pair(row.baseline_kg),
                    format_mass_pair(row.actual_kg),
                    format_percent(row.progress_percent)
                )?;
            }
            writeln!(
                f,
                "Total semestre | {} | {} | {}",
                format_mass_pair(s.baseline_kg),
                format_mass_pair(s.actual_kg),
                format_percent(s.progress.progress_percent)
            )?;
        } else {
            writeln!(f, "Sem detalhamento mensal: foi informado apenas o total do semestre.")?;
        }
        Ok(())
    }
}
