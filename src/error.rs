// src/error.rs

use thiserror::Error;

/// Errors surfaced at the edges of the engine: setup and export.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
