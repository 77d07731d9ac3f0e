//! Errors raised by the rules engine.
//!
//! Illegal moves are not errors: they come back as `false`. These variants
//! cover broken board linking and misuse of the setup API.

use crate::coord::Coord;
use derive_more::{Display, Error};

/// Which registration slot of a game a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Seat {
    /// The player moving first.
    #[display("starter")]
    Starter,
    /// The player moving second.
    #[display("other")]
    Other,
}

/// Error that indicates a linking bug or a misconfigured game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// A loop was expected at an edge point but none is attached.
    #[display("No connector linked at {at}")]
    MissingConnector {
        /// The point that should carry a connector.
        at: Coord,
    },

    /// A long move was asked to start from a point off the edge.
    #[display("Point {at} is not on the board edge")]
    NotOnEdge {
        /// The offending point.
        at: Coord,
    },

    /// The far end of a loop is occupied; callers must check this first.
    #[display("Loop from {from} is blocked at {to}")]
    LoopDestinationOccupied {
        /// Point the piece would leave.
        from: Coord,
        /// Occupied far end.
        to: Coord,
    },

    /// A player slot was registered twice.
    #[display("The {seat} player is already registered")]
    PlayerAlreadySet {
        /// Slot that was already filled.
        seat: Seat,
    },

    /// Pieces were placed before both players were registered.
    #[display("Both players must be registered first")]
    PlayersNotRegistered,
}
