use super::Grid;
use crate::{CellState, Pos2, Result};

/// Immutable view over a [`Grid`], handed to renderers
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a Grid,
}
impl<'a> GridView<'a> {
    pub(super) fn new(grid: &'a Grid) -> Self {
        Self { grid }
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
    pub fn get(&self, x: i32, y: i32) -> Result<CellState> {
        self.grid.get(x, y)
    }

    /// Each row of the grid, top (`y = 0`) first
    pub fn rows(&self) -> impl Iterator<Item = &'a [CellState]> + use<'a> {
        self.grid.cells().chunks_exact(self.grid.width() as usize)
    }

    /// Every cell together with its position, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Pos2, CellState)> + use<'a> {
        let grid = self.grid;
        grid.cells()
            .iter()
            .enumerate()
            .map(move |(idx, &state)| (grid.pos(idx), state))
    }

    /// Positions of every [`CellState::Alive`] cell, sorted
    pub fn alive(&self) -> impl Iterator<Item = Pos2> + use<'a> {
        self.cells()
            .filter(|(_, state)| state.is_alive())
            .map(|(pos, _)| pos)
    }

    /// Cells inside `top_left..bottom_right` (exclusive), clipped to the grid
    pub fn window(
        &self,
        top_left: Pos2,
        bottom_right: Pos2,
    ) -> impl Iterator<Item = (Pos2, CellState)> + use<'a> {
        let grid = self.grid;
        let rx = top_left.x.max(0)..bottom_right.x.min(grid.width());
        let ry = top_left.y.max(0)..bottom_right.y.min(grid.height());
        ry.flat_map(move |y| {
            rx.clone().filter_map(move |x| {
                let idx = grid.index(x, y)?;
                Some((Pos2::new(x, y), grid.cells()[idx]))
            })
        })
    }

    /// An owned copy of the viewed grid
    #[inline]
    pub fn to_grid(&self) -> Grid {
        self.grid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(alive: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(4, 3).unwrap();
        for &(x, y) in alive {
            grid.set(x, y, CellState::Alive).unwrap();
        }
        grid
    }

    #[test]
    fn rows_follow_grid_shape() {
        let grid = grid_with(&[(1, 2)]);
        let rows = grid.snapshot().rows().collect::<Vec<_>>();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 4));
        assert_eq!(rows[2][1], CellState::Alive);
    }

    #[test]
    fn alive_is_sorted() {
        let grid = grid_with(&[(3, 2), (0, 1), (2, 0)]);
        let alive = grid.snapshot().alive().collect::<Vec<_>>();

        assert_eq!(
            alive,
            vec![Pos2::new(2, 0), Pos2::new(0, 1), Pos2::new(3, 2)]
        );
    }

    #[test]
    fn window_is_clipped_to_grid() {
        let grid = grid_with(&[(0, 0), (3, 2)]);
        let view = grid.snapshot();

        let all = view.window(Pos2::new(-5, -5), Pos2::new(50, 50)).count();
        assert_eq!(all, 12);

        let corner = view
            .window(Pos2::new(2, 1), Pos2::new(10, 10))
            .collect::<Vec<_>>();
        assert_eq!(corner.len(), 4);
        assert!(corner.contains(&(Pos2::new(3, 2), CellState::Alive)));
        assert!(!corner.iter().any(|(pos, _)| *pos == Pos2::new(0, 0)));
    }

    #[test]
    fn to_grid_is_detached() {
        let mut grid = grid_with(&[(1, 1)]);
        let copy = grid.snapshot().to_grid();
        grid.set(1, 1, CellState::Dead).unwrap();

        assert_eq!(copy.get(1, 1), Ok(CellState::Alive));
    }
}
