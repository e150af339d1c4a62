// Prize settings, loaded from the embedded default.json or a user-supplied file.
use crate::error::{EngineError, EngineResult};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PrizeSettings {
    /// Share of the baseline that must be added to earn the whole pool.
    pub growth_rate: f64,
    /// Currency units split proportionally to progress.
    pub prize_pool: f64,
    /// Catalog baselines are stored in thousands of kg.
    pub kg_per_stored_unit: f64,
    pub log_level: String,
}

impl Default for PrizeSettings {
    fn default() -> Self {
        PrizeSettings {
            growth_rate: 0.25,
            prize_pool: 10000.0,
            kg_per_stored_unit: 1000.0,
            log_level: "info".to_string(),
        }
    }
}

impl PrizeSettings {
    pub fn load_default() -> EngineResult<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json_str(config_str)
    }

    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let settings: PrizeSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "Loaded prize settings");
        Ok(settings)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !(self.growth_rate.is_finite() && self.growth_rate > 0.0) {
            return Err(EngineError::ConfigError(format!(
                "growth_rate must be positive, got {}",
                self.growth_rate
            )));
        }
        if !(self.prize_pool.is_finite() && self.prize_pool >= 0.0) {
            return Err(EngineError::ConfigError(format!(
                "prize_pool must not be negative, got {}",
                self.prize_pool
            )));
        }
        if !(self.kg_per_stored_unit.is_finite() && self.kg_per_stored_unit > 0.0) {
            return Err(EngineError::ConfigError(format!(
                "kg_per_stored_unit must be positive, got {}",
                self.kg_per_stored_unit
            )));
        }
        Ok(())
    }
}
