// Team reference data: the embedded catalog and CSV baseline imports.
pub mod baseline_csv;
pub mod catalog;
