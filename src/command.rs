//! Commands typed at the `play` prompt.

use derive_more::{Display, Error};
use roundabouts_rules::Coord;
use std::str::FromStr;

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// `move r c r c`: a direct move or loop bypass.
    Move {
        /// Point the piece leaves.
        source: Coord,
        /// Point the piece lands on.
        target: Coord,
    },
    /// `loop r c`: send the piece through its loop.
    Loop {
        /// Edge point in front of the loop.
        source: Coord,
    },
    /// `board`: print the board.
    Board,
    /// `turn`: print whose turn it is.
    Turn,
    /// `quit`: leave the game.
    Quit,
}

/// Why a command line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// Nothing was typed.
    #[display("Empty command")]
    Empty,
    /// The first word is not a command.
    #[display("Unknown command '{_0}'")]
    Unknown(#[error(not(source))] String),
    /// Wrong number of arguments.
    #[display("'{command}' takes {expected} arguments")]
    Arity {
        /// Command name.
        command: &'static str,
        /// Expected argument count.
        expected: usize,
    },
    /// An argument is not a board coordinate.
    #[display("'{_0}' is not a row or column between 0 and 5")]
    BadCoordinate(#[error(not(source))] String),
}

fn coordinate(row: &str, col: &str) -> Result<Coord, CommandError> {
    let parse = |raw: &str| {
        raw.parse::<usize>()
            .map_err(|_| CommandError::BadCoordinate(raw.to_string()))
    };
    let (r, c) = (parse(row)?, parse(col)?);
    Coord::new(r, c).ok_or_else(|| CommandError::BadCoordinate(format!("{} {}", row, col)))
}

impl FromStr for PlayCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Err(CommandError::Empty);
        };
        let arity = |command: &'static str, expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(CommandError::Arity { command, expected })
            }
        };

        match command.to_ascii_lowercase().as_str() {
            "move" | "m" => {
                arity("move", 4)?;
                Ok(Self::Move {
                    source: coordinate(args[0], args[1])?,
                    target: coordinate(args[2], args[3])?,
                })
            }
            "loop" | "l" => {
                arity("loop", 2)?;
                Ok(Self::Loop {
                    source: coordinate(args[0], args[1])?,
                })
            }
            "board" | "b" => arity("board", 0).map(|_| Self::Board),
            "turn" | "t" => arity("turn", 0).map(|_| Self::Turn),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
