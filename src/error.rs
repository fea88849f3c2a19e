use thiserror::Error;

use crate::cell::CellState;

/// Result type returned by fallible grid and rule engine routines.
pub type Result<T> = std::result::Result<T, LifeError>;

/// Error produced by the simulation core.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeError {
    /// A grid dimension was zero or negative.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    /// A caller-supplied coordinate lies outside the grid.
    #[error("({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// The configured variants cannot resolve a transition.
    #[error("invalid rule table: {0}")]
    InvalidRuleTable(#[from] RuleTableError),
}

/// The specific misconfiguration behind [`LifeError::InvalidRuleTable`].
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("no variants configured")]
    Empty,
    #[error("{0:?} is listed more than once")]
    DuplicateState(CellState),
    #[error("{state:?} transitions to variant #{target}, but only {len} are configured")]
    TargetOutOfRange {
        state: CellState,
        target: usize,
        len: usize,
    },
    #[error("{0:?} has no configured variant")]
    UnknownState(CellState),
    #[error("neighbor influence {sum} at ({x}, {y}) has no transition")]
    SumOutOfRange { x: i32, y: i32, sum: u32 },
    #[error("malformed rulestring, expected B<digits>/S<digits>")]
    Rulestring,
}
