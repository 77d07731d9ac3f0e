//! Session error types.

use derive_more::{Display, Error};
use roundabouts_rules::{Coord, GameError};

/// Error surfaced by a [`GameSession`](crate::GameSession).
///
/// Illegal input never ends up here; it is reported as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The rules engine detected a linking bug or a caller contract breach.
    #[display("Rules error: {source}")]
    Rules {
        /// Underlying rules error.
        source: GameError,
    },

    /// A long move reached a loop but no UI adapter is registered to animate
    /// it. The long move was abandoned.
    #[display("Loop animation requested at {at} but no UI adapter is registered")]
    AdapterMissing {
        /// Edge point the long move stopped on.
        at: Coord,
    },

    /// The session was created outside a tokio runtime.
    #[display("No tokio runtime available to drive the stepper")]
    NoRuntime,

    /// A loop animation completed after its session was dropped.
    #[display("Game session has been dropped")]
    SessionClosed,
}

impl From<GameError> for SessionError {
    fn from(source: GameError) -> Self {
        Self::Rules { source }
    }
}
