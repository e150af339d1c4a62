use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Catalog format error: {0}")]
    CatalogFormatError(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Semester not found: {0}")]
    SemesterNotFound(String),

    #[error("Invalid period '{period}' for semester {semester}")]
    InvalidPeriod { period: String, semester: String },

    // Wraps anyhow errors from parsing helpers that don't fit a category above.
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::TeamNotFound(_) | EngineError::SemesterNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(EngineError::TeamNotFound("x".to_string()).is_not_found());
        assert!(EngineError::SemesterNotFound("2025-S2".to_string()).is_not_found());
        assert!(!EngineError::ConfigError("bad".to_string()).is_not_found());
    }

    #[test]
    fn test_messages() {
        let err = EngineError::InvalidPeriod { period: "jul".to_string(), semester: "2025-S1".to_string() };
        assert_eq!(err.to_string(), "Invalid period 'jul' for semester 2025-S1");
        let err: EngineError = anyhow::anyhow!("Failed to parse decimal 'x'").into();
        assert_eq!(err.to_string(), "Failed to parse decimal 'x'");
    }
}
