//! Grid coordinates, directions and the static geometry of the 6×6 board.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of points along one side of the board.
pub const LINEAR_SIZE: usize = 6;

/// Total number of points on the board.
pub const AREAL_SIZE: usize = LINEAR_SIZE * LINEAR_SIZE;

const LAST: u8 = (LINEAR_SIZE - 1) as u8;

/// One of the four orthogonal directions a long move can travel in.
///
/// Also used as the orientation of a connector endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// Returns the direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Row and column deltas of a single step.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Color of a grid line, used to paint the two circuits.
///
/// Lines 0 and 5 belong to the outer circuit, 1 and 4 to the middle ring,
/// 2 and 3 to the inner cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LineColor {
    /// Lines 2 and 3.
    Inner,
    /// Lines 1 and 4.
    Middle,
    /// Lines 0 and 5.
    Outer,
}

impl LineColor {
    const BY_LINE: [LineColor; LINEAR_SIZE] = [
        LineColor::Outer,
        LineColor::Middle,
        LineColor::Inner,
        LineColor::Inner,
        LineColor::Middle,
        LineColor::Outer,
    ];

    /// Color of the line `line` steps away from the upper-left corner.
    pub fn of(line: usize) -> Option<Self> {
        Self::BY_LINE.get(line).copied()
    }
}

/// A point on the board, always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Creates a coordinate, or `None` when it lies off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < LINEAR_SIZE && col < LINEAR_SIZE {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Creates a coordinate from signed parts, as produced by drag input.
    pub fn from_signed(row: i32, col: i32) -> Option<Self> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        Self::new(row, col)
    }

    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row index.
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Column index.
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Iterates over every point, row by row.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..LINEAR_SIZE as u8).flat_map(|row| (0..LINEAR_SIZE as u8).map(move |col| Coord::at(row, col)))
    }

    /// Whether this point lies on the edge of the board.
    pub fn is_edge(self) -> bool {
        self.row == 0 || self.row == LAST || self.col == 0 || self.col == LAST
    }

    /// Whether this point is one of the four corners.
    pub fn is_corner(self) -> bool {
        (self.row == 0 || self.row == LAST) && (self.col == 0 || self.col == LAST)
    }

    /// Whether this point lies on an edge but is not a corner.
    pub fn is_edge_non_corner(self) -> bool {
        self.is_edge() && !self.is_corner()
    }

    /// The neighbouring point one step away, or `None` past the edge.
    pub fn step(self, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.delta();
        Self::from_signed(i32::from(self.row) + i32::from(dr), i32::from(self.col) + i32::from(dc))
    }

    /// Chebyshev distance: the larger of the row and column deltas.
    pub fn chebyshev(self, other: Coord) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        usize::from(dr.max(dc))
    }

    /// Outward perpendicular of the edge this point lies on.
    ///
    /// Rows are checked before columns, so corners report their row edge.
    /// Interior points have no orientation.
    #[instrument(level = "trace")]
    pub fn outward(self) -> Option<Direction> {
        if self.row == 0 {
            Some(Direction::Up)
        } else if self.row == LAST {
            Some(Direction::Down)
        } else if self.col == 0 {
            Some(Direction::Left)
        } else if self.col == LAST {
            Some(Direction::Right)
        } else {
            None
        }
    }

    /// Inward perpendicular of the edge this point lies on.
    pub fn inward(self) -> Option<Direction> {
        self.outward().map(Direction::opposite)
    }

    /// The corner closest to this point.
    pub fn nearest_corner(self) -> Coord {
        let half = (LINEAR_SIZE / 2 - 1) as u8;
        let row = if self.row <= half { 0 } else { LAST };
        let col = if self.col <= half { 0 } else { LAST };
        Coord::at(row, col)
    }

    /// Signed distance to the nearest corner, summing the row and column
    /// differences (corner minus point).
    pub fn corner_distance(self) -> i32 {
        let corner = self.nearest_corner();
        (i32::from(corner.row) - i32::from(self.row)) + (i32::from(corner.col) - i32::from(self.col))
    }

    /// Colors of this point's row line and column line.
    pub fn colors(self) -> (LineColor, LineColor) {
        (
            LineColor::BY_LINE[self.row()],
            LineColor::BY_LINE[self.col()],
        )
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_rejected() {
        assert!(Coord::new(6, 0).is_none());
        assert!(Coord::new(0, 6).is_none());
        assert!(Coord::from_signed(-1, 2).is_none());
        assert_eq!(Coord::new(5, 5), Some(Coord::at(5, 5)));
    }

    #[test]
    fn edge_classification() {
        assert!(Coord::at(0, 0).is_corner());
        assert!(Coord::at(0, 3).is_edge_non_corner());
        assert!(!Coord::at(2, 3).is_edge());
        assert_eq!(Coord::all().filter(|c| c.is_edge()).count(), 20);
    }

    #[test]
    fn perpendiculars() {
        assert_eq!(Coord::at(0, 2).outward(), Some(Direction::Up));
        assert_eq!(Coord::at(0, 2).inward(), Some(Direction::Down));
        assert_eq!(Coord::at(3, 0).inward(), Some(Direction::Right));
        assert_eq!(Coord::at(3, 5).inward(), Some(Direction::Left));
        assert_eq!(Coord::at(5, 4).inward(), Some(Direction::Up));
        assert_eq!(Coord::at(2, 2).inward(), None);
    }

    #[test]
    fn corners_and_colors() {
        assert_eq!(Coord::at(1, 1).nearest_corner(), Coord::at(0, 0));
        assert_eq!(Coord::at(3, 2).nearest_corner(), Coord::at(5, 0));
        assert_eq!(Coord::at(1, 1).corner_distance(), -2);
        assert_eq!(Coord::at(4, 4).corner_distance(), 2);
        assert_eq!(Coord::at(0, 2).colors(), (LineColor::Outer, LineColor::Inner));
        assert_eq!(LineColor::of(6), None);
    }
}
