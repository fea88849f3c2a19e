//! Core library for a bounded Conway's Game of Life.

pub mod cell;
pub mod engine;
pub mod error;
pub mod grid;
pub mod pos;
pub mod sim;

pub use cell::{CellState, NEIGHBORHOOD_SUMS, Variant};
pub use engine::{RuleEngine, parse_rulestring};
pub use error::{LifeError, Result, RuleTableError};
pub use grid::{Grid, GridView};
pub use pos::Pos2;
pub use sim::{SimConfig, Simulation};
