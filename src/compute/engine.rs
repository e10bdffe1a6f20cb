//! Life engine - owns the grid and advances it one generation at a time.
//!
//! A step is two full passes over the lattice: a counting pass that fills the
//! neighbor-count cache from the current grid, then a rule pass that rewrites
//! every cell from that frozen cache. Neither pass reads anything the same
//! pass writes, so both may run on the rayon pool.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{DEFAULT_PARALLEL_THRESHOLD, Seed, SimulationConfig, parse_picture};

use super::{Coord, Dimensions, GridError, Topology, apply_rule, next_state};

/// Cellular-automaton engine for Conway's Game of Life on a torus.
#[derive(Debug, Clone)]
pub struct Engine {
    dimensions: Dimensions,
    topology: Arc<Topology>,
    /// Row-major cell states.
    cells: Vec<bool>,
    /// Alive-neighbor count per cell, reused across steps.
    counts: Vec<u8>,
    /// Whether `counts` reflects the current `cells`.
    counts_fresh: bool,
    rng: StdRng,
    generation: u64,
    parallel_threshold: usize,
}

impl Engine {
    /// Create an engine with an all-dead `rows` x `columns` grid.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        let dimensions = Dimensions::new(rows, columns)?;
        Ok(Self::with_topology(Arc::new(Topology::build(dimensions))))
    }

    /// Create an all-dead engine on an existing (possibly shared) topology.
    pub fn with_topology(topology: Arc<Topology>) -> Self {
        let dimensions = topology.dimensions();
        let size = dimensions.cell_count();
        Self {
            dimensions,
            topology,
            cells: vec![false; size],
            counts: vec![0; size],
            counts_fresh: false,
            rng: StdRng::from_entropy(),
            generation: 0,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Create an engine from configuration and draw its seed pattern.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, GridError> {
        config.validate()?;
        let mut engine =
            Self::new(config.rows, config.columns)?.with_parallel_threshold(config.parallel_threshold);
        engine.apply_seed(&config.seed)?;
        Ok(engine)
    }

    /// Replace the random generator with a deterministic one.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    /// Set the cell count from which steps run in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        log::debug!(
            "{}x{} grid steps {}",
            self.dimensions.rows(),
            self.dimensions.columns(),
            if self.is_parallel() { "in parallel" } else { "serially" }
        );
        self
    }

    /// Reseed the random generator used by [`Engine::generate`].
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Fill the grid with fair coin flips.
    pub fn generate(&mut self) {
        log::info!("Regenerating {} cells", self.cells.len());
        crate::schema::fill_random(&mut self.cells, 0.5, &mut self.rng);
        self.reset();
    }

    /// Fill the grid with cells alive with `probability`.
    pub fn generate_with_probability(&mut self, probability: f64) -> Result<(), GridError> {
        crate::schema::check_probability(probability)?;
        crate::schema::fill_random(&mut self.cells, probability, &mut self.rng);
        self.reset();
        Ok(())
    }

    /// Clear the grid and draw `seed` on it.
    ///
    /// The grid is left untouched if the seed does not fit.
    pub fn apply_seed(&mut self, seed: &Seed) -> Result<(), GridError> {
        let cells = seed.generate(
            self.dimensions.rows(),
            self.dimensions.columns(),
            &mut self.rng,
        )?;
        log::info!("Applied seed pattern {:?}", seed.pattern);
        self.cells = cells;
        self.reset();
        Ok(())
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.reset();
    }

    /// Recount alive neighbors of every cell against the current grid.
    pub fn count_neighbors(&mut self) {
        let cells = &self.cells;
        let table = self.topology.table();
        let count = |slots: &[usize; 8]| slots.iter().filter(|&&n| cells[n]).count() as u8;

        if self.is_parallel() {
            self.counts
                .par_iter_mut()
                .zip(table.par_iter())
                .for_each(|(c, slots)| *c = count(slots));
        } else {
            for (c, slots) in self.counts.iter_mut().zip(table.iter()) {
                *c = count(slots);
            }
        }
        self.counts_fresh = true;
    }

    /// Rewrite every cell from the cache filled by the last counting pass.
    fn step_rule(&mut self) {
        debug_assert!(self.counts_fresh, "rule applied to a stale neighbor cache");

        if self.is_parallel() {
            self.cells
                .par_iter_mut()
                .zip(self.counts.par_iter())
                .for_each(|(cell, &n)| *cell = next_state(*cell, n));
        } else {
            apply_rule(&mut self.cells, &self.counts);
        }
        self.counts_fresh = false;
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        self.count_neighbors();
        self.step_rule();
        self.generation += 1;
        log::trace!("Generation {}: {} alive", self.generation, self.population());
    }

    /// Advance `steps` generations.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Flip one cell and return its new state.
    pub fn toggle(&mut self, coord: impl Into<Coord>) -> Result<bool, GridError> {
        let index = self.dimensions.index(coord.into())?;
        self.cells[index] = !self.cells[index];
        self.counts_fresh = false;
        Ok(self.cells[index])
    }

    /// Set one cell alive or dead.
    pub fn set(&mut self, coord: impl Into<Coord>, alive: bool) -> Result<(), GridError> {
        let index = self.dimensions.index(coord.into())?;
        self.cells[index] = alive;
        self.counts_fresh = false;
        Ok(())
    }

    /// State of one cell.
    pub fn get(&self, coord: impl Into<Coord>) -> Result<bool, GridError> {
        let index = self.dimensions.index(coord.into())?;
        Ok(self.cells[index])
    }

    /// Row-major cell states, `rows * columns` long.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Cells of one row.
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        let columns = self.dimensions.columns();
        (row < self.dimensions.rows()).then(|| &self.cells[row * columns..(row + 1) * columns])
    }

    /// Iterate over rows from top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.dimensions.columns())
    }

    /// Alive cells as coordinates, row-major.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| self.dimensions.coord(i))
    }

    /// Neighbor counts from the last counting pass, or `None` if the grid has
    /// changed since.
    pub fn neighbor_counts(&self) -> Option<&[u8]> {
        self.counts_fresh.then_some(self.counts.as_slice())
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Generations stepped since the grid was last regenerated or cleared.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Shared neighbor topology.
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Render the grid as text, one line per row.
    pub fn render_text(&self, alive: char, dead: char) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.dimensions.rows());
        for (i, row) in self.rows_iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|&a| if a { alive } else { dead }));
        }
        out
    }

    #[inline]
    fn is_parallel(&self) -> bool {
        self.cells.len() >= self.parallel_threshold
    }

    fn reset(&mut self) {
        self.counts_fresh = false;
        self.generation = 0;
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text('o', '.'))
    }
}

impl FromStr for Engine {
    type Err = GridError;

    /// Parse a text picture; the grid is as tall as the line count and as
    /// wide as the longest line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        let rows = lines.len();
        let columns = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut engine = Engine::new(rows, columns)?;
        for (row, column) in parse_picture(&lines)? {
            engine.set((row, column), true)?;
        }
        Ok(engine)
    }
}

/// Simulation statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub generation: u64,
    pub population: usize,
    /// Fraction of alive cells.
    pub density: f32,
}

impl SimulationStats {
    /// Compute statistics from an engine.
    pub fn from_engine(engine: &Engine) -> Self {
        let population = engine.population();
        Self {
            generation: engine.generation(),
            population,
            density: population as f32 / engine.cells().len() as f32,
        }
    }
}
