//! Schema module - Configuration and seeding types for Life simulations.

mod config;
mod seed;

pub use config::*;
pub use seed::*;

pub(crate) use config::checked_cell_count;
pub(crate) use seed::{check_probability, fill_random, parse_picture};
