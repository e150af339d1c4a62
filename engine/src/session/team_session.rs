use super::notice::Notice;
use super::summary::{ChartBars, ProgressSummary};
use crate::calculator::PrizeCalculator;
use crate::config::settings::PrizeSettings;
use crate::data::catalog::TeamCatalog;
use crate::error::{EngineError, EngineResult};
use crate::normalizer::aggregate::{self, PeriodSelection, SemesterInputs};
use crate::normalizer::UnitConverter;
use crate::report::SemesterReport;
use chrono::{DateTime, NaiveDate, Utc};
use shared::models::{BaselineSemester, Month, Period, SemesterId, Team, Unit};

/// Input state and derived figures for one team page.
///
/// Inputs are kept per semester, so switching semesters and back keeps what was
/// typed. Typed text is always read in the currently selected unit.
#[derive(Debug, Clone)]
pub struct TeamSession {
    team: Team,
    calculator: PrizeCalculator,
    converter: UnitConverter,
    semester_idx: usize,
    unit: Unit,
    period: Period,
    // Parallel to `team.semesters`.
    inputs: Vec<SemesterInputs>,
}

impl TeamSession {
    pub fn open(catalog: &TeamCatalog, slug: &str, settings: &PrizeSettings) -> EngineResult<Self> {
        let team = catalog.get(slug).map_err(|e| {
            tracing::warn!(team = %slug, "Team not found in catalog");
            e
        })?;
        Self::from_team(team.clone(), settings)
    }

    pub fn from_team(team: Team, settings: &PrizeSettings) -> EngineResult<Self> {
        if team.semesters.is_empty() {
            return Err(EngineError::SemesterNotFound(format!("team '{}' has no semesters", team.slug)));
        }
        tracing::info!(team = %team.slug, semesters = team.semesters.len(), "Opened team session");
        let inputs = vec![SemesterInputs::default(); team.semesters.len()];
        Ok(Self {
            team,
            calculator: PrizeCalculator::from_settings(settings),
            converter: UnitConverter::from_settings(settings),
            semester_idx: 0,
            unit: Unit::Kg,
            period: Period::Total,
            inputs,
        })
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn semesters(&self) -> &[BaselineSemester] {
        &self.team.semesters
    }

    pub fn active_semester(&self) -> &BaselineSemester {
        &self.team.semesters[self.semester_idx]
    }

    pub fn months(&self) -> [Month; 6] {
        self.active_semester().months()
    }

    /// Switches semester and resets the period to the whole semester.
    /// An id the team doesn't have falls back to its first semester.
    pub fn select_semester(&mut self, id: SemesterId) -> SemesterId {
        self.semester_idx = match self.team.semesters.iter().position(|s| s.id == id) {
            Some(idx) => idx,
            None => {
                tracing::warn!(team = %self.team.slug, semester = %id, "Unknown semester, using the first one");
                0
            }
        };
        self.period = Period::Total;
        self.active_semester().id
    }

    /// Same as `select_semester`, for ids coming from the UI as text.
    pub fn select_semester_key(&mut self, key: &str) -> SemesterId {
        match key.parse::<SemesterId>() {
            Ok(id) => self.select_semester(id),
            Err(e) => {
                tracing::warn!(team = %self.team.slug, key = %key, error = %e, "Unparsable semester id");
                self.select_semester(self.team.semesters[0].id)
            }
        }
    }

    /// Selects the semester containing `date`, if the team has a baseline for it.
    pub fn select_semester_for_date(&mut self, date: NaiveDate) -> bool {
        let id = SemesterId::containing(date);
        if self.team.semester(id).is_some() {
            self.select_semester(id);
            true
        } else {
            false
        }
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: Unit) {
        tracing::debug!(team = %self.team.slug, unit = %unit, "Unit changed");
        self.unit = unit;
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn set_period(&mut self, period: Period) -> EngineResult<()> {
        if let Period::Month(month) = period {
            if !self.months().contains(&month) {
                return Err(EngineError::InvalidPeriod {
                    period: period.to_string(),
                    semester: self.active_semester().id.to_string(),
                });
            }
        }
        self.period = period;
        Ok(())
    }

    /// Stores raw text for the selected period: the semester total, or one month.
    pub fn set_input(&mut self, text: &str) {
        tracing::debug!(
            team = %self.team.slug,
            semester = %self.active_semester().id,
            period = %self.period,
            "Input changed"
        );
        let inputs = &mut self.inputs[self.semester_idx];
        match self.period {
            Period::Total => inputs.total = text.to_string(),
            Period::Month(month) => {
                inputs.monthly.insert(month, text.to_string());
            }
        }
    }

    /// Text currently shown in the input box for the selected period.
    pub fn input_text(&self) -> &str {
        match self.period {
            Period::Total => self.total_input(),
            Period::Month(month) => self.month_input(month),
        }
    }

    pub fn total_input(&self) -> &str {
        &self.active_inputs().total
    }

    pub fn month_input(&self, month: Month) -> &str {
        self.active_inputs().month_text(month)
    }

    pub fn active_inputs(&self) -> &SemesterInputs {
        &self.inputs[self.semester_idx]
    }

    pub fn has_any_input(&self) -> bool {
        self.active_inputs().has_any_input()
    }

    pub fn baseline_kg(&self, month: Month) -> f64 {
        aggregate::baseline_month_kg(self.active_semester(), month, &self.converter)
    }

    pub fn baseline_semester_kg(&self) -> f64 {
        aggregate::baseline_semester_kg(self.active_semester(), &self.converter)
    }

    pub fn monthly_sum_kg(&self) -> f64 {
        self.active_inputs().monthly_sum_kg(&self.months(), self.unit)
    }

    pub fn actual_semester_kg(&self) -> f64 {
        self.active_inputs().semester_actual_kg(&self.months(), self.unit)
    }

    pub fn selection(&self) -> PeriodSelection {
        aggregate::select_period(
            self.period,
            self.active_semester(),
            self.active_inputs(),
            self.unit,
            &self.converter,
        )
    }

    pub fn semester_summary(&self) -> ProgressSummary {
        ProgressSummary::compute(
            self.active_semester().label(),
            self.baseline_semester_kg(),
            self.actual_semester_kg(),
            &self.calculator,
        )
    }

    pub fn selection_summary(&self) -> ProgressSummary {
        let selection = self.selection();
        let label = match self.period {
            Period::Total => self.active_semester().label(),
            Period::Month(month) => format!("Mês {}", month.code().to_uppercase()),
        };
        ProgressSummary::compute(label, selection.baseline_kg, selection.actual_kg, &self.calculator)
    }

    pub fn chart_bars(&self) -> ChartBars {
        ChartBars::from_summary(&self.selection_summary(), self.unit)
    }

    /// Notices raised by the current figures.
    pub fn notifications(&self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if self.semester_summary().progress.reached_max() {
            notices.push(Notice::MaxPrizeReached);
        }
        notices
    }

    /// Printable snapshot of the active semester. Refused until something was typed.
    pub fn report(&self, generated_at: DateTime<Utc>) -> Result<SemesterReport, Notice> {
        if !self.has_any_input() {
            tracing::warn!(team = %self.team.slug, "Report requested without any input");
            return Err(Notice::NothingToPrint);
        }
        Ok(SemesterReport::build(
            &self.team.name,
            self.active_semester(),
            self.active_inputs(),
            self.unit,
            &self.converter,
            &self.calculator,
            generated_at,
        ))
    }
}
