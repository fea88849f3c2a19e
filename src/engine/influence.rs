use crate::{CellState, Grid, Result};

/// Scratch buffer of summed neighbor influence, one entry per grid cell
///
/// Reused between generations, but zero-filled before every accumulation so no
/// sum survives past the step it was computed for.
#[derive(Debug, Clone, Default)]
pub(super) struct Influence {
    sums: Vec<u32>,
}

impl Influence {
    /// Recomputes every cell's neighbor influence from the current states
    ///
    /// Each cell adds `influence_of(state)` to each of its 8 neighbors. Every
    /// offset is bounds-checked on its own; neighbors outside the grid are
    /// skipped without affecting the remaining offsets.
    pub(super) fn accumulate<F>(&mut self, grid: &Grid, influence_of: F) -> Result<()>
    where
        F: Fn(CellState) -> Result<u32>,
    {
        self.sums.clear();
        self.sums.resize(grid.len(), 0);

        for (idx, &state) in grid.cells().iter().enumerate() {
            let influence = influence_of(state)?;
            if influence == 0 {
                continue;
            }
            for neighbor in grid.pos(idx).neighbors() {
                if let Some(n) = grid.index(neighbor.x, neighbor.y) {
                    self.sums[n] = self.sums[n].saturating_add(influence);
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub(super) fn sums(&self) -> &[u32] {
        &self.sums
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(state: CellState) -> Result<u32> {
        Ok(state.is_alive() as u32)
    }

    fn grid_with(w: i32, h: i32, alive: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(w, h).unwrap();
        for &(x, y) in alive {
            grid.set(x, y, CellState::Alive).unwrap();
        }
        grid
    }

    #[test]
    fn interior_cell_reaches_all_eight_neighbors() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        let mut influence = Influence::default();
        influence.accumulate(&grid, unit).unwrap();

        assert_eq!(influence.sums(), &[1, 1, 1, 1, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn corner_cell_only_reaches_in_bounds_neighbors() {
        let grid = grid_with(4, 4, &[(0, 0)]);
        let mut influence = Influence::default();
        influence.accumulate(&grid, unit).unwrap();

        let sums = influence.sums();
        assert_eq!(sums.len(), 16);
        assert_eq!(sums.iter().sum::<u32>(), 3);
        assert_eq!(sums[grid.index(1, 0).unwrap()], 1);
        assert_eq!(sums[grid.index(0, 1).unwrap()], 1);
        assert_eq!(sums[grid.index(1, 1).unwrap()], 1);
    }

    #[test]
    fn sums_are_cleared_between_uses() {
        let mut influence = Influence::default();
        influence
            .accumulate(&grid_with(3, 3, &[(0, 0), (2, 2)]), unit)
            .unwrap();
        influence.accumulate(&grid_with(3, 3, &[]), unit).unwrap();

        assert!(influence.sums().iter().all(|&sum| sum == 0));
    }

    #[test]
    fn single_row_grid_has_no_vertical_neighbors() {
        let grid = grid_with(5, 1, &[(2, 0)]);
        let mut influence = Influence::default();
        influence.accumulate(&grid, unit).unwrap();

        assert_eq!(influence.sums(), &[0, 1, 0, 1, 0]);
    }
}
