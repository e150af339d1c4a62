// Tracing subscriber setup for binaries and UIs embedding the engine.
use crate::config::settings::PrizeSettings;
use tracing::Level;

/// Maps a configured level name to a `tracing::Level`; unknown names mean INFO.
pub fn parse_level(name: &str) -> Level {
    name.trim().parse::<Level>().unwrap_or(Level::INFO)
}

/// Installs a fmt subscriber at the configured level.
/// Returns false when a global subscriber was already set.
pub fn init_tracing(settings: &PrizeSettings) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(parse_level(&settings.log_level))
        .with_target(false)
        .try_init()
        .is_ok()
}
