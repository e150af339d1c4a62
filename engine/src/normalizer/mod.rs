// Text → kilograms, and semester/month aggregation of normalized inputs.
pub mod aggregate;
pub mod units;

pub use aggregate::{PeriodSelection, SemesterInputs};
pub use units::UnitConverter;
