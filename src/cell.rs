//! Cell states and the variants that give them behavior.

/// Number of distinct neighbor influence sums a transition table covers
///
/// A cell has 8 neighbors, so with an influence of at most 1 per neighbor the
/// sum ranges over `0..=8`.
pub const NEIGHBORHOOD_SUMS: usize = 9;

/// The state of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    /// Every state, in the order used by [`CellState::index`]
    pub const ALL: [CellState; 2] = [CellState::Dead, CellState::Alive];

    /// Dense index of this state within [`CellState::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }
}

/// How a [`CellState`] behaves under a rule set
///
/// `influence` is added to each neighbor's accumulator every generation, and
/// `transitions[k]` is the index (into the configured variant list) of the
/// state this cell becomes when its neighbors' summed influence is `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub state: CellState,
    pub influence: u32,
    pub transitions: [usize; NEIGHBORHOOD_SUMS],
}

impl Variant {
    /// Conway's dead cell: born with exactly 3 live neighbors
    pub const CONWAY_DEAD: Variant = Variant::new(CellState::Dead, 0, [0, 0, 0, 1, 0, 0, 0, 0, 0]);
    /// Conway's live cell: survives with 2 or 3 live neighbors
    pub const CONWAY_ALIVE: Variant =
        Variant::new(CellState::Alive, 1, [0, 0, 1, 1, 0, 0, 0, 0, 0]);

    #[inline]
    pub const fn new(
        state: CellState,
        influence: u32,
        transitions: [usize; NEIGHBORHOOD_SUMS],
    ) -> Self {
        Self {
            state,
            influence,
            transitions,
        }
    }
}

/// The standard `[Dead, Alive]` variant list for B3/S23
pub fn conway() -> Vec<Variant> {
    vec![Variant::CONWAY_DEAD, Variant::CONWAY_ALIVE]
}
