// Prize calculation
pub mod prize;

pub use prize::{calc_prize_progress, PrizeCalculator};
