//! A single point of the grid.

use crate::connector::ConnectorId;
use crate::player::Piece;

/// A point on the board that can hold one piece.
///
/// Edge points may also be attached to a loop connector. The attachment is a
/// handle into the board's connector table, set at most once and never
/// cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    piece: Option<Piece>,
    connector: Option<ConnectorId>,
}

impl Point {
    /// Whether no piece holds this point.
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// The piece holding this point.
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// The connector attached to this point.
    pub fn connector(&self) -> Option<ConnectorId> {
        self.connector
    }

    pub(crate) fn set_piece(&mut self, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.piece, piece)
    }

    /// Attaches `connector`, unless one is already attached.
    pub(crate) fn set_connector(&mut self, connector: ConnectorId) {
        if self.connector.is_none() {
            self.connector = Some(connector);
        }
    }
}
