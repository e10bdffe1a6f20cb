//! Seed types for initializing Life grids.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;

fn default_probability() -> f64 {
    0.5
}

/// Complete seed specification for simulation initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Random {
                probability: default_probability(),
                seed: None,
            },
        }
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Every cell independently alive with `probability`.
    Random {
        #[serde(default = "default_probability")]
        probability: f64,
        /// Fixed RNG seed. `None` draws from the engine's generator.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// All cells dead.
    Empty,
    /// Explicit list of alive `(row, column)` cells.
    Cells { cells: Vec<(usize, usize)> },
    /// Plain-text picture. `o`, `O`, `#` and `*` are alive; `.` and space are dead.
    Text {
        lines: Vec<String>,
        /// Top-left corner of the picture on the grid.
        #[serde(default)]
        origin: (usize, usize),
    },
}

impl Seed {
    /// Seed from a text picture placed at `origin`.
    pub fn text(picture: &str, origin: (usize, usize)) -> Self {
        Self {
            pattern: Pattern::Text {
                lines: picture.lines().map(str::to_owned).collect(),
                origin,
            },
        }
    }

    /// Seed with an explicit list of alive cells.
    pub fn cells(cells: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            pattern: Pattern::Cells {
                cells: cells.into_iter().collect(),
            },
        }
    }

    /// Check the pattern fits a `rows` x `columns` grid.
    pub fn validate(&self, rows: usize, columns: usize) -> Result<(), ConfigError> {
        match &self.pattern {
            Pattern::Random { probability, .. } => check_probability(*probability),
            Pattern::Empty => Ok(()),
            Pattern::Cells { cells } => cells
                .iter()
                .try_for_each(|&(row, column)| check_bounds(row, column, rows, columns)),
            Pattern::Text { lines, origin } => parse_picture(lines)?
                .into_iter()
                .try_for_each(|cell| place(cell, *origin, rows, columns).map(|_| ())),
        }
    }

    /// Generate a row-major grid of `rows * columns` cells.
    ///
    /// `rng` is used only by [`Pattern::Random`] without a fixed seed.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rows: usize,
        columns: usize,
        rng: &mut R,
    ) -> Result<Vec<bool>, ConfigError> {
        let size = super::checked_cell_count(rows, columns)
            .ok_or(ConfigError::GridTooLarge { rows, columns })?;
        self.validate(rows, columns)?;
        let mut grid = vec![false; size];

        match &self.pattern {
            Pattern::Random {
                probability,
                seed: Some(seed),
            } => fill_random(&mut grid, *probability, &mut StdRng::seed_from_u64(*seed)),
            Pattern::Random {
                probability,
                seed: None,
            } => fill_random(&mut grid, *probability, rng),
            Pattern::Empty => {}
            Pattern::Cells { cells } => {
                for &(row, column) in cells {
                    grid[row * columns + column] = true;
                }
            }
            Pattern::Text { lines, origin } => {
                for cell in parse_picture(lines)? {
                    let (row, column) = place(cell, *origin, rows, columns)?;
                    grid[row * columns + column] = true;
                }
            }
        }

        Ok(grid)
    }
}

/// Fill `grid` with independent Bernoulli(`probability`) cells.
pub(crate) fn fill_random<R: Rng + ?Sized>(grid: &mut [bool], probability: f64, rng: &mut R) {
    for cell in grid.iter_mut() {
        *cell = rng.gen_bool(probability);
    }
}

/// Alive cells of a text picture, relative to its top-left corner.
pub(crate) fn parse_picture<S: AsRef<str>>(lines: &[S]) -> Result<Vec<(usize, usize)>, ConfigError> {
    let mut alive = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        for (column, ch) in line.as_ref().chars().enumerate() {
            match ch {
                'o' | 'O' | '#' | '*' => alive.push((row, column)),
                '.' | ' ' => {}
                _ => return Err(ConfigError::InvalidPatternChar { ch, row, column }),
            }
        }
    }
    Ok(alive)
}

pub(crate) fn check_probability(probability: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability(probability))
    }
}

/// Shift a picture cell by `origin`, rejecting anything that lands off the grid.
fn place(
    (row, column): (usize, usize),
    origin: (usize, usize),
    rows: usize,
    columns: usize,
) -> Result<(usize, usize), ConfigError> {
    match (row.checked_add(origin.0), column.checked_add(origin.1)) {
        (Some(r), Some(c)) => check_bounds(r, c, rows, columns).map(|_| (r, c)),
        _ => Err(ConfigError::PatternOutOfBounds {
            row: row.saturating_add(origin.0),
            column: column.saturating_add(origin.1),
            rows,
            columns,
        }),
    }
}

fn check_bounds(row: usize, column: usize, rows: usize, columns: usize) -> Result<(), ConfigError> {
    if row < rows && column < columns {
        Ok(())
    } else {
        Err(ConfigError::PatternOutOfBounds {
            row,
            column,
            rows,
            columns,
        })
    }
}
