use std::{
    cmp::Ordering,
    ops::{Add, Neg},
};

/// A grid coordinate, `x` being the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos2 {
    pub x: i32,
    pub y: i32,
}

/// Offsets of the 8 cells surrounding a cell (its Moore neighborhood)
pub const NEIGHBOR_OFFSETS: [Pos2; 8] = [
    Pos2::new(-1, -1),
    Pos2::new(0, -1),
    Pos2::new(1, -1),
    Pos2::new(-1, 0),
    Pos2::new(1, 0),
    Pos2::new(-1, 1),
    Pos2::new(0, 1),
    Pos2::new(1, 1),
];

impl Pos2 {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0, 0)
    }
    #[inline]
    pub const fn one() -> Self {
        Self::new(1, 1)
    }

    /// The 8 positions surrounding this one, without any bounds applied
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Pos2> {
        NEIGHBOR_OFFSETS.into_iter().map(move |offset| self + offset)
    }
}
impl Default for Pos2 {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl From<(i32, i32)> for Pos2 {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // rows first, so sorted positions follow the grid's storage order
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}
impl Neg for Pos2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}
impl Add for Pos2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}
