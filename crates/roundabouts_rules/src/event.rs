//! Board change events and the listeners that receive them.

use crate::coord::Coord;
use crate::player::Piece;
use serde::{Deserialize, Serialize};

/// A change that has just been applied to a board.
///
/// Moves are domain events: each variant carries exactly the fields a
/// presentation needs to redraw the affected points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BoardChangeEvent {
    /// A piece was placed on an empty point.
    Place {
        /// Point that received the piece.
        target: Coord,
        /// The placed piece.
        piece: Piece,
    },
    /// A piece moved to an empty point.
    Move {
        /// Point the piece left.
        source: Coord,
        /// Point the piece arrived on.
        target: Coord,
        /// The moved piece.
        piece: Piece,
    },
    /// A piece moved onto an opposing piece and displaced it.
    Capture {
        /// Point the piece left.
        source: Coord,
        /// Point the piece arrived on.
        target: Coord,
        /// The moving piece.
        piece: Piece,
        /// The displaced piece, now off the board.
        victim: Piece,
    },
}

impl BoardChangeEvent {
    /// Point the change landed on.
    pub fn target(&self) -> Coord {
        match self {
            BoardChangeEvent::Place { target, .. }
            | BoardChangeEvent::Move { target, .. }
            | BoardChangeEvent::Capture { target, .. } => *target,
        }
    }

    /// The piece that was placed or moved.
    pub fn piece(&self) -> Piece {
        match self {
            BoardChangeEvent::Place { piece, .. }
            | BoardChangeEvent::Move { piece, .. }
            | BoardChangeEvent::Capture { piece, .. } => *piece,
        }
    }
}

impl std::fmt::Display for BoardChangeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardChangeEvent::Place { target, piece } => write!(f, "place {piece} at {target}"),
            BoardChangeEvent::Move {
                source,
                target,
                piece,
            } => write!(f, "move {piece} {source} -> {target}"),
            BoardChangeEvent::Capture {
                source,
                target,
                piece,
                victim,
            } => write!(f, "capture {victim} with {piece} {source} -> {target}"),
        }
    }
}

/// Receives board changes synchronously, after they are applied.
///
/// Listeners run on whichever thread mutated the board, which for long moves
/// is the stepper task.
pub trait BoardChangeListener: Send {
    /// Handles one change.
    fn handle(&mut self, event: &BoardChangeEvent);
}

impl<F> BoardChangeListener for F
where
    F: FnMut(&BoardChangeEvent) + Send,
{
    fn handle(&mut self, event: &BoardChangeEvent) {
        self(event)
    }
}

/// Handle returned on registration, used to remove a listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);
