//! Loop connectors joining pairs of non-adjacent edge points.

use crate::board::Board;
use crate::coord::{Coord, Direction};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Which ring of loops a connector belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Circuit {
    /// Loops joining the points one step away from a corner.
    Inner,
    /// Loops joining the points two steps away from a corner.
    Outer,
}

/// Handle to one of the board's eight connectors.
///
/// Corners are indexed upper-left, upper-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct ConnectorId {
    /// Ring the connector belongs to.
    circuit: Circuit,
    /// Corner index, 0..4.
    corner: usize,
}

impl ConnectorId {
    pub(crate) const fn new(circuit: Circuit, corner: usize) -> Self {
        Self { circuit, corner }
    }
}

impl std::fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.circuit, self.corner)
    }
}

/// One end of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    coord: Coord,
    link: Option<Direction>,
}

impl Endpoint {
    /// Point this end is attached to.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Outward orientation of the loop at this end, once linked.
    pub fn link(&self) -> Option<Direction> {
        self.link
    }

    /// Direction a piece travels after arriving at this end.
    pub fn inward(&self) -> Option<Direction> {
        self.link.map(Direction::opposite)
    }

    /// Whether a drag towards `(row, col)` points into this loop.
    ///
    /// The target may lie off the board; it activates the loop when it is
    /// beyond this end along the link direction.
    pub fn activates_toward(&self, row: i32, col: i32) -> bool {
        let own_row = self.coord.row() as i32;
        let own_col = self.coord.col() as i32;
        match self.link {
            Some(Direction::Up) => row < own_row && col == own_col,
            Some(Direction::Down) => row > own_row && col == own_col,
            Some(Direction::Left) => row == own_row && col < own_col,
            Some(Direction::Right) => row == own_row && col > own_col,
            None => false,
        }
    }

    fn set_link(&mut self, link: Direction) {
        if self.link.is_none() {
            self.link = Some(link);
        }
    }
}

/// An unordered pair of edge points joined by a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    id: ConnectorId,
    ends: [Endpoint; 2],
}

impl Connector {
    pub(crate) const fn new(id: ConnectorId, first: Coord, second: Coord) -> Self {
        Self {
            id,
            ends: [
                Endpoint {
                    coord: first,
                    link: None,
                },
                Endpoint {
                    coord: second,
                    link: None,
                },
            ],
        }
    }

    /// Handle of this connector on its board.
    pub fn id(&self) -> ConnectorId {
        self.id
    }

    /// First end.
    pub fn end0(&self) -> &Endpoint {
        &self.ends[0]
    }

    /// Second end.
    pub fn end1(&self) -> &Endpoint {
        &self.ends[1]
    }

    /// Binds the orientation of the first end. Later calls are ignored.
    pub fn set_link0(&mut self, link: Direction) {
        self.ends[0].set_link(link);
    }

    /// Binds the orientation of the second end. Later calls are ignored.
    pub fn set_link1(&mut self, link: Direction) {
        self.ends[1].set_link(link);
    }

    /// The end attached to `at`, if any.
    pub fn end_at(&self, at: Coord) -> Option<&Endpoint> {
        self.ends.iter().find(|end| end.coord == at)
    }

    /// The point at the far end from `at`, or `None` if `at` is not an end.
    pub fn other_end(&self, at: Coord) -> Option<Coord> {
        if self.ends[0].coord == at {
            Some(self.ends[1].coord)
        } else if self.ends[1].coord == at {
            Some(self.ends[0].coord)
        } else {
            None
        }
    }

    /// Whether this connector joins `a` and `b`, in either order.
    pub fn joins(&self, a: Coord, b: Coord) -> bool {
        self.other_end(a) == Some(b)
    }

    /// Source and destination of a traversal: first to second end when
    /// `forward`, otherwise second to first.
    pub fn through(&self, forward: bool) -> (Coord, Coord) {
        if forward {
            (self.ends[0].coord, self.ends[1].coord)
        } else {
            (self.ends[1].coord, self.ends[0].coord)
        }
    }

    /// Moves the piece across this loop on `board`.
    ///
    /// This does not check that the destination is free; callers verify that
    /// first. Returns what [`Board::move_piece`] returns.
    pub fn move_through_connector(&self, board: &mut Board, forward: bool) -> bool {
        let (source, target) = self.through(forward);
        board.move_piece(source, target)
    }
}

impl std::fmt::Display for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} <-> {}", self.id, self.ends[0].coord, self.ends[1].coord)
    }
}
