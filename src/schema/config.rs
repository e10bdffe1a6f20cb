//! Configuration types for Life simulation parameters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Seed;

/// Grids with at least this many cells step on the rayon pool by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 128 * 128;

/// `rows * columns` if it fits an allocation (at most `isize::MAX` cells).
pub(crate) fn checked_cell_count(rows: usize, columns: usize) -> Option<usize> {
    rows.checked_mul(columns).filter(|&count| count <= isize::MAX as usize)
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns.
    pub columns: usize,
    /// Initial grid contents.
    #[serde(default)]
    pub seed: Seed,
    /// Cell count from which both passes of a step run in parallel.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Hints for whatever host draws the grid.
    #[serde(default)]
    pub render: RenderConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 60,
            columns: 60,
            seed: Seed::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            render: RenderConfig::default(),
        }
    }
}

/// Display parameters. The engine never reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side of one cell in pixels.
    pub cell_size: u32,
    /// Upper bound on generations drawn per second.
    pub max_fps: u32,
    /// Character drawn for alive cells in text output.
    pub alive_char: char,
    /// Character drawn for dead cells in text output.
    pub dead_char: char,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            max_fps: 10,
            alive_char: 'o',
            dead_char: '.',
        }
    }
}

impl SimulationConfig {
    /// Window size in pixels as `(width, height)`, or `None` if it does not fit `u32`.
    pub fn window_size(&self) -> Option<(u32, u32)> {
        let pixels = |cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|c| c.checked_mul(self.render.cell_size))
        };
        Some((pixels(self.columns)?, pixels(self.rows)?))
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if checked_cell_count(self.rows, self.columns).is_none() {
            return Err(ConfigError::GridTooLarge {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.render.max_fps == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        if self.render.cell_size == 0 {
            return Err(ConfigError::InvalidCellSize);
        }
        self.seed.validate(self.rows, self.columns)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (rows, columns) must be non-zero")]
    InvalidDimensions,
    #[error("Grid of {rows}x{columns} cells is too large to allocate")]
    GridTooLarge { rows: usize, columns: usize },
    #[error("Frame rate must be non-zero")]
    InvalidFrameRate,
    #[error("Cell size must be non-zero")]
    InvalidCellSize,
    #[error("Alive probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("Unexpected character {ch:?} at line {row}, column {column} of pattern")]
    InvalidPatternChar { ch: char, row: usize, column: usize },
    #[error("Pattern cell ({row}, {column}) lies outside the {rows}x{columns} grid")]
    PatternOutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
