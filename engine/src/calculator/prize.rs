// Growth-prize progress: how far actual sales went toward baseline * (1 + growth_rate).
use crate::config::settings::PrizeSettings;
use shared::models::PrizeProgress;

pub const DEFAULT_GROWTH_RATE: f64 = 0.25;
pub const DEFAULT_PRIZE_POOL: f64 = 10000.0;

/// Maps a (baseline, actual) pair onto a share of a flat prize pool.
///
/// The pool does not scale with the baseline: hitting the growth target pays
/// the whole pool whether the team sells 10 t or 10 000 t.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrizeCalculator {
    growth_rate: f64,
    prize_pool: f64,
}

impl PrizeCalculator {
    pub fn new(growth_rate: f64, prize_pool: f64) -> Self {
        Self { growth_rate, prize_pool }
    }

    pub fn from_settings(settings: &PrizeSettings) -> Self {
        Self::new(settings.growth_rate, settings.prize_pool)
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    pub fn prize_pool(&self) -> f64 {
        self.prize_pool
    }

    pub fn calculate(&self, baseline: f64, actual: f64) -> PrizeProgress {
        let growth_target = baseline * self.growth_rate;
        let achieved_delta = actual - baseline;

        // A zero (or negative) target has no meaningful ratio: no progress.
        let raw = if growth_target > 0.0 {
            achieved_delta / growth_target
        } else {
            0.0
        };
        let ratio = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
        let dynamic_prize = ratio * self.prize_pool;

        PrizeProgress {
            growth_target,
            achieved_delta,
            progress_percent: ratio * 100.0,
            dynamic_prize,
            final_prize: dynamic_prize,
        }
    }
}

impl Default for PrizeCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_GROWTH_RATE, DEFAULT_PRIZE_POOL)
    }
}

/// Progress with the standard 25% target and 10 000 pool.
pub fn calc_prize_progress(baseline: f64, actual: f64) -> PrizeProgress {
    PrizeCalculator::default().calculate(baseline, actual)
}
