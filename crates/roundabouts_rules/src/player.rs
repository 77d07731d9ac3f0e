//! Players and the pieces they own.

use crate::coord::LINEAR_SIZE;
use serde::{Deserialize, Serialize};

/// Number of pieces each player starts with: two full rows.
pub const PIECES_PER_PLAYER: usize = LINEAR_SIZE * 2;

/// Identity of a player.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("player {_0}")]
pub struct PlayerId(pub u8);

/// A piece on (or captured from) the board.
///
/// The owner is fixed at creation. Position is not stored here; a piece is
/// wherever a board point holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    owner: PlayerId,
    index: u8,
}

impl Piece {
    /// Player owning this piece.
    pub fn owner(self) -> PlayerId {
        self.owner
    }

    /// Position of this piece within its owner's set.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.owner, self.index)
    }
}

/// A player and the fixed set of pieces created with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    pieces: [Piece; PIECES_PER_PLAYER],
}

impl Player {
    /// Creates a player together with its pieces.
    pub fn new(id: PlayerId) -> Self {
        let pieces = std::array::from_fn(|index| Piece {
            owner: id,
            index: index as u8,
        });
        Self { id, pieces }
    }

    /// This player's identity.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// The piece at `index`, if in range.
    pub fn piece(&self, index: usize) -> Option<Piece> {
        self.pieces.get(index).copied()
    }

    /// All pieces in creation order.
    pub fn pieces(&self) -> &[Piece; PIECES_PER_PLAYER] {
        &self.pieces
    }
}
