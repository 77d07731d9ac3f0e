//! The boundary through which a long move asks the front-end to animate a
//! loop traversal.

use crate::error::SessionError;
use crate::session::{GameSession, Shared};
use roundabouts_rules::Coord;
use std::sync::Weak;
use tracing::instrument;

/// Front-end capability consumed by a [`GameSession`].
///
/// A session without an adapter is valid until a long move reaches a loop;
/// at that point the long move is abandoned and
/// [`SessionError::AdapterMissing`] is recorded.
pub trait UiAdapter: Send + Sync {
    /// Animates the piece at `resume.at()` going through its loop.
    ///
    /// When the animation is over the front-end **must** call
    /// [`LoopResume::complete`], otherwise the game stays locked. The call
    /// may happen synchronously from inside this method.
    fn request_loop_animation(&self, resume: LoopResume);
}

/// Token handed to a [`UiAdapter`] to resume a paused long move.
#[derive(Debug)]
pub struct LoopResume {
    session: Weak<Shared>,
    at: Coord,
}

impl LoopResume {
    pub(crate) fn new(session: Weak<Shared>, at: Coord) -> Self {
        Self { session, at }
    }

    /// Edge point in front of the loop being animated.
    pub fn at(&self) -> Coord {
        self.at
    }

    /// Resumes the long move through the loop at [`LoopResume::at`].
    ///
    /// Equivalent to `session.notify_loop_input(at)`.
    #[instrument(skip(self), fields(at = %self.at))]
    pub fn complete(self) -> Result<bool, SessionError> {
        let shared = self.session.upgrade().ok_or(SessionError::SessionClosed)?;
        GameSession::from_shared(shared).notify_loop_input(self.at)
    }
}
