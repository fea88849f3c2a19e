//! The simulation facade used by schedulers, renderers and input handlers.

use std::time::Duration;

use log::debug;

use crate::{CellState, Grid, GridView, Pos2, Result, RuleEngine, Variant, cell};

/// Cells set alive at start when no other seed is configured
pub const DEFAULT_SEED: [Pos2; 4] = [
    Pos2::new(19, 20),
    Pos2::new(20, 20),
    Pos2::new(21, 20),
    Pos2::new(20, 21),
];

/// Construction-time parameters of a [`Simulation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    /// How often the caller is expected to call [`Simulation::step`]
    pub tick: Duration,
    pub seed: Vec<Pos2>,
    pub variants: Vec<Variant>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            tick: Duration::from_millis(300),
            seed: DEFAULT_SEED.to_vec(),
            variants: cell::conway(),
        }
    }
}

/// A [`Grid`] paired with the [`RuleEngine`] that advances it
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    engine: RuleEngine,
    tick: Duration,
    generation: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self> {
        let SimConfig {
            width,
            height,
            tick,
            seed,
            variants,
        } = config;

        let grid = Grid::new(width, height)?;
        let engine = RuleEngine::new(variants)?;
        let mut sim = Self {
            grid,
            engine,
            tick,
            generation: 0,
        };
        for pos in &seed {
            sim.set_alive(pos.x, pos.y)?;
        }
        debug!(
            "simulation {}x{} seeded with {} cells",
            width,
            height,
            seed.len()
        );
        Ok(sim)
    }

    /// Advances one generation; on error the grid is left untouched
    pub fn step(&mut self) -> Result<()> {
        self.engine.step(&mut self.grid)?;
        self.generation += 1;
        Ok(())
    }

    #[inline]
    pub fn set_alive(&mut self, x: i32, y: i32) -> Result<()> {
        self.grid.set(x, y, CellState::Alive)
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Result<CellState> {
        self.grid.get(x, y)
    }

    #[inline]
    pub fn snapshot(&self) -> GridView<'_> {
        self.grid.snapshot()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.grid.width()
    }
    #[inline]
    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    #[inline]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Number of generations committed since construction
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.grid.count(CellState::Alive)
    }

    #[inline]
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LifeError, RuleTableError};

    #[test]
    fn default_config_matches_reference() {
        let sim = Simulation::new(SimConfig::default()).unwrap();

        assert_eq!(sim.width(), 100);
        assert_eq!(sim.height(), 100);
        assert_eq!(sim.tick(), Duration::from_millis(300));
        assert_eq!(sim.alive_count(), 4);
        assert_eq!(sim.get(20, 21), Ok(CellState::Alive));
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn seed_outside_grid_fails() {
        let config = SimConfig {
            width: 10,
            height: 10,
            ..SimConfig::default()
        };

        assert_eq!(
            Simulation::new(config).map(|_| ()),
            Err(LifeError::OutOfBounds {
                x: 19,
                y: 20,
                width: 10,
                height: 10,
            })
        );
    }

    #[test]
    fn generation_only_counts_committed_steps() {
        let heavy = Variant {
            influence: 3,
            ..Variant::CONWAY_ALIVE
        };
        let mut sim = Simulation::new(SimConfig {
            variants: vec![Variant::CONWAY_DEAD, heavy],
            ..SimConfig::default()
        })
        .unwrap();

        // (20, 20) has 3 live neighbors of weight 3
        assert!(matches!(
            sim.step(),
            Err(LifeError::InvalidRuleTable(RuleTableError::SumOutOfRange { .. }))
        ));
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.alive_count(), 4);
    }

    #[test]
    fn reference_seed_evolves() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.step().unwrap();

        // the T-tetromino grows a cap above and fills out its lower corners
        let alive = sim.snapshot().alive().collect::<Vec<_>>();
        let mut expected = vec![
            Pos2::new(20, 19),
            Pos2::new(19, 20),
            Pos2::new(20, 20),
            Pos2::new(21, 20),
            Pos2::new(19, 21),
            Pos2::new(20, 21),
            Pos2::new(21, 21),
        ];
        expected.sort();
        assert_eq!(alive, expected);
        assert_eq!(sim.generation(), 1);
    }
}
