//! Roundabouts - a session layer around the roundabouts rules engine
//!
//! # Architecture
//!
//! - **roundabouts_rules**: board, connectors, turns and the long-move
//!   state machine, all synchronous
//! - **GameSession**: shares a game between input and a timed stepper task
//! - **UiAdapter**: the front-end hook that animates loop traversals
//! - **terminal**: a stdout event printer and a delay-based animator
//! - **PlayCommand**: the line commands of the `play` prompt
//!
//! # Example
//!
//! ```no_run
//! use roundabouts::{DelayedAnimator, GameSession, SessionConfig};
//! use roundabouts_rules::Coord;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SessionConfig::default();
//! let session = GameSession::from_config(&config)?;
//! session.set_ui_adapter(Arc::new(DelayedAnimator::new(config.animation_delay())));
//!
//! let edge = Coord::new(1, 0).ok_or("off board")?;
//! if session.notify_loop_input(edge)? {
//!     session.settled().await;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapter;
mod command;
mod config;
mod error;
mod session;
mod terminal;

pub use adapter::{LoopResume, UiAdapter};
pub use command::{CommandError, PlayCommand};
pub use config::{ConfigError, EventFormat, SessionConfig, TICK_ENV};
pub use error::SessionError;
pub use session::{GameSession, Phase};
pub use terminal::{DelayedAnimator, EventPrinter};
