//! Compute module - Topology, transition rule and the simulation engine.

mod engine;
mod rule;
mod topology;

pub use engine::*;
pub use rule::*;
pub use topology::*;

use crate::schema::ConfigError;

/// Error type for grid construction and cell access.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Grid dimensions must be non-zero, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Grid of {rows}x{columns} cells is too large to allocate")]
    TooLarge { rows: usize, columns: usize },

    #[error("Cell ({row}, {column}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
