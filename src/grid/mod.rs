mod view;

pub use self::view::GridView;
use crate::{CellState, LifeError, Pos2, Result};

/// Fixed-size storage of [`CellState`]s with bounds enforcement
///
/// Cells are stored row-major, `(x, y)` living at `y * width + x`. The store is
/// allocated once and never resized; it holds no simulation logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a `width` by `height` grid of [`CellState::Dead`] cells
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        let invalid = LifeError::InvalidDimensions { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(invalid)?;

        // an allocation the system cannot satisfy is reported, not aborted on
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, CellState::Dead);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<CellState> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: i32, y: i32, state: CellState) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Number of cells currently in `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// A read-only view of the whole grid
    #[inline]
    pub fn snapshot(&self) -> GridView<'_> {
        GridView::new(self)
    }

    /// Storage index of `(x, y)`, or [`None`] when it lies outside the grid
    #[inline]
    pub(crate) fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Inverse of [`Grid::index`]
    #[inline]
    pub(crate) fn pos(&self, idx: usize) -> Pos2 {
        let width = self.width as usize;
        Pos2::new((idx % width) as i32, (idx / width) as i32)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub(crate) fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Replaces every cell at once with a fully computed generation
    ///
    /// `next` receives the previous generation, so its allocation can be reused.
    pub(crate) fn commit(&mut self, next: &mut Vec<CellState>) {
        debug_assert_eq!(next.len(), self.cells.len(), "generation size mismatch");
        std::mem::swap(&mut self.cells, next);
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize> {
        self.index(x, y).ok_or(LifeError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(7, 3).expect("valid grid");

        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.count(CellState::Dead), 21);
        assert_eq!(grid.count(CellState::Alive), 0);
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        for (w, h) in [(0, 10), (10, 0), (-1, 5), (5, -3), (0, 0)] {
            assert_eq!(
                Grid::new(w, h),
                Err(LifeError::InvalidDimensions { width: w, height: h })
            );
        }
    }

    #[test]
    fn unallocatable_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(i32::MAX, i32::MAX),
            Err(LifeError::InvalidDimensions {
                width: i32::MAX,
                height: i32::MAX,
            })
        );
    }

    #[test]
    fn set_then_get() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(3, 0, CellState::Alive).unwrap();

        assert_eq!(grid.get(3, 0), Ok(CellState::Alive));
        assert_eq!(grid.get(0, 3), Ok(CellState::Dead));
        assert_eq!(grid.count(CellState::Alive), 1);
    }

    #[test]
    fn out_of_bounds_access_errors() {
        let mut grid = Grid::new(4, 3).unwrap();
        let err = |x, y| LifeError::OutOfBounds {
            x,
            y,
            width: 4,
            height: 3,
        };

        assert_eq!(grid.get(4, 0), Err(err(4, 0)));
        assert_eq!(grid.get(0, 3), Err(err(0, 3)));
        assert_eq!(grid.get(-1, 0), Err(err(-1, 0)));
        assert_eq!(grid.set(0, -1, CellState::Alive), Err(err(0, -1)));
        assert_eq!(grid.set(10, 10, CellState::Alive), Err(err(10, 10)));
        // a failed write must not touch any cell
        assert_eq!(grid.count(CellState::Alive), 0);
    }

    #[test]
    fn index_and_pos_agree() {
        let grid = Grid::new(5, 2).unwrap();
        for idx in 0..grid.len() {
            let pos = grid.pos(idx);
            assert_eq!(grid.index(pos.x, pos.y), Some(idx));
        }
        assert_eq!(grid.index(5, 0), None);
    }

    #[test]
    fn commit_swaps_generations() {
        let mut grid = Grid::new(2, 1).unwrap();
        let mut next = vec![CellState::Alive, CellState::Dead];
        grid.commit(&mut next);

        assert_eq!(grid.get(0, 0), Ok(CellState::Alive));
        assert_eq!(next, vec![CellState::Dead, CellState::Dead]);
    }
}
