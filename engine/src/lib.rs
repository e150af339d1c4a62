// Engine library root: growth-prize calculation over a static team catalog.

pub mod calculator;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod report;
pub mod session;

pub use calculator::{calc_prize_progress, PrizeCalculator};
pub use config::settings::PrizeSettings;
pub use data::catalog::TeamCatalog;
pub use error::{EngineError, EngineResult};
pub use session::TeamSession;
