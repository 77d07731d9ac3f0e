//! Turn control and the long-move state machine.
//!
//! A [`Game`] accepts two kinds of input. A direct move ([`Game::notify_input`])
//! is resolved at once and hands the turn to the opponent. A loop move
//! ([`Game::notify_loop_input`]) sends a piece through a connector and starts
//! a *long move*: the piece then travels one point per [`Game::step`] in the
//! landing end's inward direction, capturing the opposing pieces in its way,
//! until it is blocked, breaks off its chain of captures, or comes back to its
//! starting point a second time.
//!
//! Whenever a long move runs off the edge through another loop, stepping
//! pauses ([`Step::AwaitingLoop`]) so that the front-end can animate the
//! traversal; it resumes when the front-end calls `notify_loop_input` for the
//! paused point.
//!
//! This type is synchronous. Timing and the front-end callback live in the
//! session layer that drives it.

use crate::board::Board;
use crate::connector::Connector;
use crate::coord::{Coord, Direction, LINEAR_SIZE};
use crate::error::{GameError, Seat};
use crate::event::{BoardChangeListener, ListenerId};
use crate::player::{Piece, Player, PlayerId};
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// Number of visits to the starting point that ends a long move.
const MAX_START_VISITS: u8 = 2;

/// Cursor of the long move in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct LongMove {
    /// Point the piece landed on after its first loop.
    start: Coord,
    /// Point the piece occupies now.
    current: Coord,
    /// Direction of the next step.
    direction: Direction,
    /// How many ticks found the piece on `start`.
    overlap_count: u8,
    /// Set once the piece has captured; it may no longer stop on empty points.
    tripping_opponent: bool,
    /// Owner of the travelling piece.
    mover: PlayerId,
}

/// Why a long move came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum LongMoveEnd {
    /// The piece reached its starting point a second time.
    #[display("returned to its start")]
    Revisited,
    /// The piece had been capturing and the next point was empty.
    #[display("capture chain broken")]
    ChainBroken,
    /// The next point held a piece of the same owner.
    #[display("blocked")]
    Blocked,
    /// The far end of the next loop was occupied.
    #[display("loop blocked")]
    LoopBlocked,
    /// The long move was abandoned from outside.
    #[display("aborted")]
    Aborted,
}

/// Outcome of one stepper tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No long move is in flight.
    Idle,
    /// The piece moved one point; keep ticking.
    Advanced {
        /// Point the piece left.
        from: Coord,
        /// Point the piece now holds.
        to: Coord,
    },
    /// The piece reached a loop at `at`. Stop ticking until the front-end
    /// calls [`Game::notify_loop_input`] for `at`.
    AwaitingLoop {
        /// Edge point in front of the loop.
        at: Coord,
    },
    /// The long move is over and the turn has passed.
    Finished {
        /// Reason the move ended.
        end: LongMoveEnd,
    },
}

/// Game controller: players, turn, and the long move in progress.
#[derive(Debug)]
pub struct Game {
    board: Board,
    starter_player: Option<Player>,
    other_player: Option<Player>,
    active_player: Option<PlayerId>,
    long_move: Option<LongMove>,
    move_locked: bool,
    move_repeating: bool,
}

impl Game {
    /// Creates a game with a linked board and no players.
    ///
    /// Register players with [`Game::set_starter_player`] and
    /// [`Game::set_other_player`].
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::filled(),
            starter_player: None,
            other_player: None,
            active_player: None,
            long_move: None,
            move_locked: false,
            move_repeating: false,
        }
    }

    /// Creates a game between two local players, ids 1 and 2, with player 1
    /// to move. Pieces still need [`Game::place_all_pieces`].
    #[instrument]
    pub fn double_user_game() -> Self {
        let starter = Player::new(PlayerId(1));
        let other = Player::new(PlayerId(2));
        Self {
            active_player: Some(starter.id()),
            starter_player: Some(starter),
            other_player: Some(other),
            ..Self::new()
        }
    }

    /// Registers the player that moves first. A registered player cannot be
    /// replaced.
    #[instrument(skip(self, player), fields(player = %player.id()))]
    pub fn set_starter_player(&mut self, player: Player) -> Result<(), GameError> {
        if self.starter_player.is_some() {
            warn!("Game player change attempt while already set (starter)");
            return Err(GameError::PlayerAlreadySet {
                seat: Seat::Starter,
            });
        }

        self.active_player = Some(player.id());
        self.starter_player = Some(player);
        Ok(())
    }

    /// Registers the player that moves second. A registered player cannot be
    /// replaced.
    #[instrument(skip(self, player), fields(player = %player.id()))]
    pub fn set_other_player(&mut self, player: Player) -> Result<(), GameError> {
        if self.other_player.is_some() {
            warn!("Game player change attempt while already set (other)");
            return Err(GameError::PlayerAlreadySet { seat: Seat::Other });
        }

        self.other_player = Some(player);
        Ok(())
    }

    /// Puts every piece on the board: the starter fills the first two rows,
    /// the other player the last two, left to right within each row.
    #[instrument(skip(self))]
    pub fn place_all_pieces(&mut self) -> Result<(), GameError> {
        let (Some(starter), Some(other)) = (&self.starter_player, &self.other_player) else {
            return Err(GameError::PlayersNotRegistered);
        };

        let rows = [
            (starter.pieces(), 0..2),
            (other.pieces(), LINEAR_SIZE - 2..LINEAR_SIZE),
        ];
        for (pieces, rows) in rows {
            let cells = rows.flat_map(|row| (0..LINEAR_SIZE).filter_map(move |col| Coord::new(row, col)));
            for (piece, at) in pieces.iter().zip(cells) {
                self.board.place_piece(*piece, at);
            }
        }

        info!("All pieces placed");
        Ok(())
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the board, for setting up positions.
    ///
    /// Changes made here bypass turn and lock checks.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The player that moves first.
    pub fn starter_player(&self) -> Option<&Player> {
        self.starter_player.as_ref()
    }

    /// The player that moves second.
    pub fn other_player(&self) -> Option<&Player> {
        self.other_player.as_ref()
    }

    /// The player holding the turn.
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active_player
    }

    /// Whether a long move is in flight; direct input is refused meanwhile.
    pub fn is_move_locked(&self) -> bool {
        self.move_locked
    }

    /// Whether the long move is paused in front of a loop.
    pub fn is_move_repeating(&self) -> bool {
        self.move_repeating
    }

    /// The long move in flight.
    pub fn long_move(&self) -> Option<&LongMove> {
        self.long_move.as_ref()
    }

    /// See [`Board::piece_at`].
    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.board.piece_at(at)
    }

    /// See [`Board::external_connector_at`].
    pub fn external_connector_at(&self, at: Coord) -> Option<&Connector> {
        self.board.external_connector_at(at)
    }

    /// See [`Board::inner_circuit`].
    pub fn inner_circuit(&self, index: usize) -> Option<&Connector> {
        self.board.inner_circuit(index)
    }

    /// See [`Board::outer_circuit`].
    pub fn outer_circuit(&self, index: usize) -> Option<&Connector> {
        self.board.outer_circuit(index)
    }

    /// See [`Board::add_board_change_listener`].
    pub fn add_board_change_listener(
        &mut self,
        listener: impl BoardChangeListener + 'static,
    ) -> ListenerId {
        self.board.add_board_change_listener(listener)
    }

    /// See [`Board::remove_board_change_listener`].
    pub fn remove_board_change_listener(&mut self, id: ListenerId) -> bool {
        self.board.remove_board_change_listener(id)
    }

    /// The player playing against `player`.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        let starter = self.starter_player.as_ref().map(Player::id);
        if starter == Some(player) {
            self.other_player.as_ref().map(Player::id)
        } else {
            starter
        }
    }

    /// Owner of the piece at `at`, if that is the player holding the turn.
    fn active_mover_at(&self, at: Coord) -> Option<PlayerId> {
        self.board
            .piece_at(at)
            .map(Piece::owner)
            .filter(|owner| Some(*owner) == self.active_player)
    }

    /// Moves the piece at `source` to `target` for the player holding the
    /// turn, then passes the turn.
    ///
    /// Returns `false` without changing anything while a long move is in
    /// flight, when the piece is not the active player's, or when the board
    /// refuses the move. Never starts a long move.
    #[instrument(skip(self))]
    pub fn notify_input(&mut self, source: Coord, target: Coord) -> bool {
        if self.move_locked {
            debug!("Input ignored while a long move is in flight");
            return false;
        }

        let Some(mover) = self.active_mover_at(source) else {
            debug!(active = ?self.active_player, "Piece does not belong to the active player");
            return false;
        };

        if !self.board.move_piece(source, target) {
            return false;
        }

        self.active_player = self.opponent_of(mover);
        info!(next = ?self.active_player, "Direct move resolved");
        true
    }

    /// Sends the piece at `source` through its loop and starts (or resumes)
    /// the long move from the far end.
    ///
    /// While a long move is paused, only the paused point resumes it; any
    /// other call returns `Ok(false)`. Outside a long move the piece must
    /// belong to the active player, and a point without a loop is refused.
    ///
    /// # Errors
    ///
    /// [`GameError::LoopDestinationOccupied`] when the far end is taken, and
    /// [`GameError::MissingConnector`] when a paused long move sits on a point
    /// without a loop.
    #[instrument(skip(self))]
    pub fn notify_loop_input(&mut self, source: Coord) -> Result<bool, GameError> {
        if self.move_locked && !self.move_repeating {
            debug!("Loop input ignored while a long move is in flight");
            return Ok(false);
        }

        let mover = if self.move_repeating {
            match self.long_move {
                Some(long_move) if long_move.current == source => long_move.mover,
                _ => {
                    debug!("Loop input does not match the paused point");
                    return Ok(false);
                }
            }
        } else {
            let Some(mover) = self.active_mover_at(source) else {
                debug!(active = ?self.active_player, "Piece does not belong to the active player");
                return Ok(false);
            };
            mover
        };

        let Some(loop_) = self.board.external_connector_at(source).copied() else {
            if self.move_repeating {
                return Err(GameError::MissingConnector { at: source });
            }
            debug!("No loop at source");
            return Ok(false);
        };

        let forward = loop_.end0().coord() == source;
        let (_, landing) = loop_.through(forward);
        if self.board.piece_at(landing).is_some() {
            warn!(%landing, "Loop destination occupied");
            return Err(GameError::LoopDestinationOccupied {
                from: source,
                to: landing,
            });
        }

        let direction = loop_
            .end_at(landing)
            .and_then(|end| end.inward())
            .ok_or(GameError::NotOnEdge { at: landing })?;

        if !loop_.move_through_connector(&mut self.board, forward) {
            return Ok(false);
        }

        self.start_path(landing, direction, mover);
        Ok(true)
    }

    /// Points the long-move cursor at `at`. A fresh long move records its
    /// start; a resumed one keeps start, visit count and capture state.
    fn start_path(&mut self, at: Coord, direction: Direction, mover: PlayerId) {
        debug!(%at, %direction, "Start path");

        if self.move_repeating
            && let Some(long_move) = self.long_move.as_mut()
        {
            long_move.current = at;
            long_move.direction = direction;
            self.move_repeating = false;
        } else {
            self.long_move = Some(LongMove {
                start: at,
                current: at,
                direction,
                overlap_count: 0,
                tripping_opponent: false,
                mover,
            });
        }

        self.move_locked = true;
    }

    /// Advances the long move by one point.
    ///
    /// # Errors
    ///
    /// [`GameError::MissingConnector`] when the piece runs off an edge point
    /// that has no loop. The long move is left in place; see
    /// [`Game::abort_long_move`].
    #[instrument(skip(self))]
    pub fn step(&mut self) -> Result<Step, GameError> {
        let Some(long_move) = self.long_move.as_mut() else {
            return Ok(Step::Idle);
        };

        if self.move_repeating {
            return Ok(Step::AwaitingLoop {
                at: long_move.current,
            });
        }

        if long_move.current == long_move.start {
            long_move.overlap_count += 1;
        }

        if long_move.overlap_count >= MAX_START_VISITS {
            return Ok(self.finish_long_move(LongMoveEnd::Revisited));
        }

        let from = long_move.current;
        let Some(to) = from.step(long_move.direction) else {
            return self.loop_long_move(from);
        };

        if self.board.piece_at(to).is_some() {
            long_move.tripping_opponent = true;
        } else if long_move.tripping_opponent {
            return Ok(self.finish_long_move(LongMoveEnd::ChainBroken));
        }

        if !self.board.move_piece(from, to) {
            return Ok(self.finish_long_move(LongMoveEnd::Blocked));
        }

        long_move.current = to;
        Ok(Step::Advanced { from, to })
    }

    /// Handles a long move running off the edge at `at`.
    fn loop_long_move(&mut self, at: Coord) -> Result<Step, GameError> {
        let far = self
            .board
            .external_connector_at(at)
            .and_then(|loop_| loop_.other_end(at))
            .ok_or(GameError::MissingConnector { at })?;

        if self.board.piece_at(far).is_some() {
            return Ok(self.finish_long_move(LongMoveEnd::LoopBlocked));
        }

        self.move_repeating = true;
        debug!(%at, %far, "Long move waiting for loop animation");
        Ok(Step::AwaitingLoop { at })
    }

    /// Ends the long move in flight, if any, and passes the turn.
    #[instrument(skip(self))]
    pub fn abort_long_move(&mut self) -> Option<LongMoveEnd> {
        self.long_move?;
        self.move_repeating = false;
        match self.finish_long_move(LongMoveEnd::Aborted) {
            Step::Finished { end } => Some(end),
            _ => None,
        }
    }

    fn finish_long_move(&mut self, end: LongMoveEnd) -> Step {
        let long_move = self.long_move.take();
        self.move_locked = false;

        if !self.move_repeating
            && let Some(long_move) = long_move
        {
            self.active_player = self.opponent_of(long_move.mover);
        }

        info!(%end, next = ?self.active_player, "Long move finished");
        Step::Finished { end }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
