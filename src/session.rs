//! A shareable game with a timed long-move stepper.
//!
//! [`GameSession`] owns a [`Game`] behind a mutex. Every input and every
//! stepper tick takes the same lock, so the stepper is the only writer while
//! the move lock is held. The stepper is a tokio task that calls
//! [`Game::step`] once per tick and hands control to the [`UiAdapter`] when a
//! long move reaches a loop.

use crate::adapter::{LoopResume, UiAdapter};
use crate::config::SessionConfig;
use crate::error::SessionError;
use roundabouts_rules::{
    BoardChangeListener, Coord, Game, ListenerId, LongMove, LongMoveEnd, Piece, PlayerId, Step,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

/// What the session is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for user input.
    #[display("idle")]
    Idle,
    /// A long move is being stepped.
    #[display("stepping")]
    Stepping,
    /// A long move is paused until the UI finishes a loop animation.
    #[display("awaiting animation")]
    AwaitingAnimation,
}

struct SessionState {
    game: Game,
    adapter: Option<Arc<dyn UiAdapter>>,
    stepper: Option<AbortHandle>,
    generation: u64,
    stepper_error: Option<SessionError>,
}

impl SessionState {
    fn phase(&self) -> Phase {
        if self.stepper.is_some() {
            Phase::Stepping
        } else if self.game.is_move_repeating() {
            Phase::AwaitingAnimation
        } else {
            Phase::Idle
        }
    }
}

pub(crate) struct Shared {
    state: Mutex<SessionState>,
    phase: watch::Sender<Phase>,
    runtime: Handle,
    tick: Duration,
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared")
            .field("phase", &*self.phase.borrow())
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &SessionState) {
        let phase = state.phase();
        self.phase.send_if_modified(|current| {
            if *current == phase {
                false
            } else {
                *current = phase;
                true
            }
        });
    }
}

/// Cloneable handle to one game and its stepper.
///
/// Board-change listeners registered here run while the session lock is
/// held and must not call back into the session.
#[derive(Debug, Clone)]
pub struct GameSession {
    shared: Arc<Shared>,
}

impl GameSession {
    /// Wraps `game`, stepping long moves every `tick`.
    ///
    /// Must be called from inside a tokio runtime.
    #[instrument(skip(game))]
    pub fn new(game: Game, tick: Duration) -> Result<Self, SessionError> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        let (phase, _) = watch::channel(Phase::Idle);
        let state = SessionState {
            game,
            adapter: None,
            stepper: None,
            generation: 0,
            stepper_error: None,
        };
        info!("Creating game session");
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                phase,
                runtime,
                tick,
            }),
        })
    }

    /// Two local players with all pieces on their starting rows.
    #[instrument(skip(config))]
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        let mut game = Game::double_user_game();
        game.place_all_pieces()?;
        Self::new(game, config.tick_interval())
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Registers the front-end that animates loop traversals.
    #[instrument(skip(self, adapter))]
    pub fn set_ui_adapter(&self, adapter: Arc<dyn UiAdapter>) {
        debug!("UI adapter registered");
        self.shared.lock().adapter = Some(adapter);
    }

    /// Removes the UI adapter.
    pub fn clear_ui_adapter(&self) {
        self.shared.lock().adapter = None;
    }

    /// A direct one-step move (or loop bypass) by the active player.
    #[instrument(skip(self))]
    pub fn notify_input(&self, source: Coord, target: Coord) -> bool {
        self.shared.lock().game.notify_input(source, target)
    }

    /// Sends the piece at `source` through its loop and starts (or resumes)
    /// the stepper.
    #[instrument(skip(self))]
    pub fn notify_loop_input(&self, source: Coord) -> Result<bool, SessionError> {
        let mut state = self.shared.lock();
        if !state.game.notify_loop_input(source)? {
            return Ok(false);
        }
        self.spawn_stepper(&mut state);
        self.shared.publish(&state);
        Ok(true)
    }

    fn spawn_stepper(&self, state: &mut SessionState) {
        if let Some(previous) = state.stepper.take() {
            warn!("Replacing a running stepper");
            previous.abort();
        }
        state.generation += 1;
        let task = self
            .shared
            .runtime
            .spawn(run_stepper(Arc::clone(&self.shared), state.generation));
        state.stepper = Some(task.abort_handle());
    }

    /// Stops the running or paused long move and passes the turn.
    #[instrument(skip(self))]
    pub fn cancel_long_move(&self) -> Option<LongMoveEnd> {
        let mut state = self.shared.lock();
        if let Some(stepper) = state.stepper.take() {
            stepper.abort();
        }
        state.generation += 1;
        let end = state.game.abort_long_move();
        self.shared.publish(&state);
        end
    }

    /// Registers a board-change listener.
    pub fn add_board_change_listener(
        &self,
        listener: impl BoardChangeListener + 'static,
    ) -> ListenerId {
        self.shared.lock().game.add_board_change_listener(listener)
    }

    /// Unregisters a board-change listener.
    pub fn remove_board_change_listener(&self, id: ListenerId) -> bool {
        self.shared.lock().game.remove_board_change_listener(id)
    }

    /// Runs `f` against the game under the session lock.
    pub fn with_game<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&self.shared.lock().game)
    }

    /// Player whose turn it is.
    pub fn active_player(&self) -> Option<PlayerId> {
        self.with_game(Game::active_player)
    }

    /// Whether a long move holds the move lock.
    pub fn is_move_locked(&self) -> bool {
        self.with_game(Game::is_move_locked)
    }

    /// Whether a long move is paused at a loop.
    pub fn is_move_repeating(&self) -> bool {
        self.with_game(Game::is_move_repeating)
    }

    /// Snapshot of the long move in progress.
    pub fn long_move(&self) -> Option<LongMove> {
        self.with_game(|game| game.long_move().copied())
    }

    /// Piece at `at`.
    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.with_game(|game| game.piece_at(at))
    }

    /// Text rendering of the board.
    pub fn render(&self) -> String {
        self.with_game(|game| game.board().render())
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        *self.shared.phase.borrow()
    }

    /// Receiver notified on every phase change.
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.shared.phase.subscribe()
    }

    /// Resolves once no long move is running or paused.
    pub async fn settled(&self) {
        let mut phase = self.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = phase.wait_for(|phase| *phase == Phase::Idle).await;
    }

    /// Takes the last error reported by the stepper.
    pub fn take_stepper_error(&self) -> Option<SessionError> {
        self.shared.lock().stepper_error.take()
    }
}

enum Pause {
    Animate(Arc<dyn UiAdapter>, Coord),
    Done,
}

#[instrument(skip(shared), fields(tick_ms = shared.tick.as_millis() as u64))]
async fn run_stepper(shared: Arc<Shared>, generation: u64) {
    let mut ticker = time::interval(shared.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let pause = loop {
        ticker.tick().await;
        let mut state = shared.lock();
        // An abort cannot interrupt a task already waiting on the lock.
        if state.generation != generation {
            debug!("Stale stepper exiting");
            break Pause::Done;
        }
        match state.game.step() {
            Ok(Step::Advanced { from, to }) => {
                debug!(%from, %to, "Long move advanced");
                continue;
            }
            Ok(Step::AwaitingLoop { at }) => {
                state.stepper = None;
                match state.adapter.clone() {
                    Some(adapter) => {
                        debug!(%at, "Waiting for loop animation");
                        shared.publish(&state);
                        break Pause::Animate(adapter, at);
                    }
                    None => {
                        error!(%at, "No UI adapter to animate the loop, abandoning long move");
                        state.game.abort_long_move();
                        state.stepper_error = Some(SessionError::AdapterMissing { at });
                        shared.publish(&state);
                        break Pause::Done;
                    }
                }
            }
            Ok(Step::Finished { end }) => {
                info!(%end, "Long move finished");
                state.stepper = None;
                shared.publish(&state);
                break Pause::Done;
            }
            Ok(Step::Idle) => {
                state.stepper = None;
                shared.publish(&state);
                break Pause::Done;
            }
            Err(e) => {
                error!(error = %e, "Stepper failed, abandoning long move");
                state.stepper = None;
                state.game.abort_long_move();
                state.stepper_error = Some(e.into());
                shared.publish(&state);
                break Pause::Done;
            }
        }
    };

    if let Pause::Animate(adapter, at) = pause {
        adapter.request_loop_animation(LoopResume::new(Arc::downgrade(&shared), at));
    }
}
