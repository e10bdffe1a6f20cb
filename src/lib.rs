//! Toroidal Life - Conway's Game of Life on a wrap-around grid.
//!
//! This crate provides the cellular-automaton engine: a precomputed toroidal
//! neighbor topology, a neighbor-counting pass and the B3/S23 transition rule.
//! Rendering, input and frame pacing belong to the host; the engine only
//! advances when [`Engine::step`] is called.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types and seeding for simulations
//! - `compute`: Topology, transition rule and the engine
//!
//! # Example
//!
//! ```rust,no_run
//! use toroidal_life::{
//!     compute::{Engine, SimulationStats},
//!     schema::{Seed, SimulationConfig},
//! };
//!
//! // Glider in the top-left corner of a 60x60 torus
//! let config = SimulationConfig {
//!     seed: Seed::text(".o.\n..o\nooo", (0, 0)),
//!     ..SimulationConfig::default()
//! };
//!
//! let mut engine = Engine::from_config(&config).unwrap();
//! engine.run(240);
//!
//! let stats = SimulationStats::from_engine(&engine);
//! println!("{} cells alive after {} generations", stats.population, stats.generation);
//!
//! // Regenerate, then flip a cell by hand
//! engine.generate();
//! engine.toggle((10, 20)).unwrap();
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{Coord, Dimensions, Engine, GridError, SimulationStats, Topology};
pub use schema::{ConfigError, Pattern, RenderConfig, Seed, SimulationConfig};
