// Domain models and pt-BR formatting shared by the engine and its consumers.
pub mod models;
pub mod utils;
