//! Roundabouts rules - pure board and turn logic
//!
//! Roundabouts is played on a 6×6 grid. Pieces step one point in any of the
//! eight directions and may capture an adjacent opposing piece. Eight loops
//! join pairs of edge points; a piece sent through a loop keeps travelling
//! from the far end, capturing as it goes, in a *long move*.
//!
//! # Architecture
//!
//! - **Coord / Direction**: in-bounds grid coordinates and edge geometry
//! - **Connector**: the loops, with set-once orientation per end
//! - **Board**: points, connectors, movement rules, change events
//! - **Game**: players, turn arbitration and the long-move state machine
//!
//! Everything here is synchronous; the timed stepper lives in the
//! `roundabouts` crate.
//!
//! # Example
//!
//! ```
//! use roundabouts_rules::{Coord, Game, PlayerId};
//!
//! let mut game = Game::double_user_game();
//! game.place_all_pieces().unwrap();
//!
//! let from = Coord::new(1, 2).unwrap();
//! let to = Coord::new(2, 2).unwrap();
//! assert!(game.notify_input(from, to));
//! assert_eq!(game.active_player(), Some(PlayerId(2)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod connector;
mod coord;
mod error;
mod event;
mod game;
mod player;
mod point;

pub use board::{Board, CIRCUIT_SIZE};
pub use connector::{Circuit, Connector, ConnectorId, Endpoint};
pub use coord::{AREAL_SIZE, Coord, Direction, LINEAR_SIZE, LineColor};
pub use error::{GameError, Seat};
pub use event::{BoardChangeEvent, BoardChangeListener, ListenerId};
pub use game::{Game, LongMove, LongMoveEnd, Step};
pub use player::{PIECES_PER_PLAYER, Piece, Player, PlayerId};
pub use point::Point;
