//! The 6×6 board: points, loop connectors, movement rules and change events.

use crate::connector::{Circuit, Connector, ConnectorId};
use crate::coord::{Coord, LINEAR_SIZE};
use crate::event::{BoardChangeEvent, BoardChangeListener, ListenerId};
use crate::player::{Piece, PlayerId};
use crate::point::Point;
use tracing::{debug, instrument, trace};

/// Number of connectors in each circuit, one per corner.
pub const CIRCUIT_SIZE: usize = 4;

const INNER_CIRCUITS: [Connector; CIRCUIT_SIZE] = [
    Connector::new(ConnectorId::new(Circuit::Inner, 0), Coord::at(1, 0), Coord::at(0, 1)),
    Connector::new(ConnectorId::new(Circuit::Inner, 1), Coord::at(0, 4), Coord::at(1, 5)),
    Connector::new(ConnectorId::new(Circuit::Inner, 2), Coord::at(4, 5), Coord::at(5, 4)),
    Connector::new(ConnectorId::new(Circuit::Inner, 3), Coord::at(5, 1), Coord::at(4, 0)),
];

const OUTER_CIRCUITS: [Connector; CIRCUIT_SIZE] = [
    Connector::new(ConnectorId::new(Circuit::Outer, 0), Coord::at(2, 0), Coord::at(0, 2)),
    Connector::new(ConnectorId::new(Circuit::Outer, 1), Coord::at(0, 3), Coord::at(2, 5)),
    Connector::new(ConnectorId::new(Circuit::Outer, 2), Coord::at(3, 5), Coord::at(5, 3)),
    Connector::new(ConnectorId::new(Circuit::Outer, 3), Coord::at(5, 2), Coord::at(3, 0)),
];

/// Board state: which piece holds each point, and the eight loops.
///
/// Corners are indexed upper-left, upper-right, bottom-right and bottom-left
/// (0 to 3) when looking up circuits.
pub struct Board {
    grid: [[Point; LINEAR_SIZE]; LINEAR_SIZE],
    inner_circuits: [Connector; CIRCUIT_SIZE],
    outer_circuits: [Connector; CIRCUIT_SIZE],
    listeners: Vec<(ListenerId, Box<dyn BoardChangeListener>)>,
    next_listener: u64,
}

impl Board {
    /// Creates an empty board with every connector linked to its points.
    ///
    /// Placing the initial pieces is left to the game.
    #[instrument]
    pub fn filled() -> Self {
        let mut board = Self {
            grid: [[Point::default(); LINEAR_SIZE]; LINEAR_SIZE],
            inner_circuits: INNER_CIRCUITS,
            outer_circuits: OUTER_CIRCUITS,
            listeners: Vec::new(),
            next_listener: 0,
        };

        for corner in 0..CIRCUIT_SIZE {
            board.link_connector(ConnectorId::new(Circuit::Inner, corner));
            board.link_connector(ConnectorId::new(Circuit::Outer, corner));
        }

        board
    }

    /// Attaches the connector to both of its points and binds the outward
    /// orientation at each end.
    fn link_connector(&mut self, id: ConnectorId) {
        let (first, second) = self.connector(id).through(true);

        self.point_mut(first).set_connector(id);
        self.point_mut(second).set_connector(id);

        let connector = self.connector_mut(id);
        if let Some(link) = first.outward() {
            connector.set_link0(link);
        }
        if let Some(link) = second.outward() {
            connector.set_link1(link);
        }
        trace!(connector = %connector, "Linked connector");
    }

    /// The point at `at`.
    pub fn point(&self, at: Coord) -> &Point {
        &self.grid[at.row()][at.col()]
    }

    fn point_mut(&mut self, at: Coord) -> &mut Point {
        &mut self.grid[at.row()][at.col()]
    }

    fn connector_mut(&mut self, id: ConnectorId) -> &mut Connector {
        match id.circuit() {
            Circuit::Inner => &mut self.inner_circuits[*id.corner()],
            Circuit::Outer => &mut self.outer_circuits[*id.corner()],
        }
    }

    /// The connector behind a handle.
    pub fn connector(&self, id: ConnectorId) -> &Connector {
        match id.circuit() {
            Circuit::Inner => &self.inner_circuits[*id.corner()],
            Circuit::Outer => &self.outer_circuits[*id.corner()],
        }
    }

    /// The connector attached to the point at `at`, if any.
    pub fn external_connector_at(&self, at: Coord) -> Option<&Connector> {
        self.point(at).connector().map(|id| self.connector(id))
    }

    /// Inner-circuit connector for the corner at `index`.
    ///
    /// It joins the edge points one step away from that corner.
    pub fn inner_circuit(&self, index: usize) -> Option<&Connector> {
        self.inner_circuits.get(index)
    }

    /// Outer-circuit connector for the corner at `index`.
    ///
    /// It joins the edge points two steps away from that corner.
    pub fn outer_circuit(&self, index: usize) -> Option<&Connector> {
        self.outer_circuits.get(index)
    }

    /// All eight connectors, inner circuit first.
    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.inner_circuits.iter().chain(self.outer_circuits.iter())
    }

    /// The piece holding `at`.
    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.point(at).piece()
    }

    /// Every point with its occupant, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Option<Piece>)> + '_ {
        Coord::all().map(|at| (at, self.piece_at(at)))
    }

    /// Number of pieces `owner` still has on the board.
    pub fn piece_count(&self, owner: PlayerId) -> usize {
        self.cells()
            .filter(|(_, piece)| piece.is_some_and(|p| p.owner() == owner))
            .count()
    }

    /// Places `piece` on the empty point `at`.
    ///
    /// An occupied point is left untouched. The caller must make sure the
    /// piece is not already on the board.
    #[instrument(skip(self))]
    pub fn place_piece(&mut self, piece: Piece, at: Coord) -> bool {
        if !self.point(at).is_empty() {
            debug!("Target occupied, piece not placed");
            return false;
        }

        self.point_mut(at).set_piece(Some(piece));
        self.fire_event(BoardChangeEvent::Place { target: at, piece });
        true
    }

    /// Moves the piece at `source` to `target`, capturing an opposing piece
    /// found there.
    ///
    /// The move must be one step in any of the eight directions, unless the
    /// two points are joined by a loop. Landing on a piece of the same owner
    /// is never allowed. Capturing by an adjacent step is permitted here;
    /// front-ends that want to forbid it must do so themselves.
    #[instrument(skip(self))]
    pub fn move_piece(&mut self, source: Coord, target: Coord) -> bool {
        let Some(piece) = self.piece_at(source) else {
            debug!("No piece at source");
            return false;
        };

        let victim = self.piece_at(target);
        if victim.is_some_and(|v| v.owner() == piece.owner()) {
            debug!("Target held by the same owner");
            return false;
        }

        let through_loop = self
            .external_connector_at(source)
            .is_some_and(|loop_| loop_.joins(source, target));

        if !through_loop && source.chebyshev(target) != 1 {
            debug!("Target not adjacent and not joined by a loop");
            return false;
        }

        self.point_mut(target).set_piece(Some(piece));
        self.point_mut(source).set_piece(None);

        let event = match victim {
            None => BoardChangeEvent::Move {
                source,
                target,
                piece,
            },
            Some(victim) => BoardChangeEvent::Capture {
                source,
                target,
                piece,
                victim,
            },
        };
        self.fire_event(event);
        true
    }

    /// Moves a piece across the connector `id`; see
    /// [`Connector::move_through_connector`].
    pub fn move_through_connector(&mut self, id: ConnectorId, forward: bool) -> bool {
        let connector = *self.connector(id);
        connector.move_through_connector(self, forward)
    }

    /// Registers a listener, called after every change in registration order.
    pub fn add_board_change_listener(
        &mut self,
        listener: impl BoardChangeListener + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        debug!(listener = id.0, "Registered board change listener");
        id
    }

    /// Removes a registered listener. Returns whether it was registered.
    pub fn remove_board_change_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    fn fire_event(&mut self, event: BoardChangeEvent) {
        trace!(%event, listeners = self.listeners.len(), "Firing board change");
        for (_, listener) in &mut self.listeners {
            listener.handle(&event);
        }
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty points are `.`, pieces show their owner number.
    pub fn render(&self) -> String {
        let mut result = String::from("   0 1 2 3 4 5\n");
        for row in 0..LINEAR_SIZE {
            result.push_str(&format!("{row} "));
            for col in 0..LINEAR_SIZE {
                let symbol = match self.grid[row][col].piece() {
                    None => ".".to_string(),
                    Some(piece) => piece.owner().0.to_string(),
                };
                result.push(' ');
                result.push_str(&symbol);
            }
            result.push('\n');
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::filled()
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("grid", &self.grid)
            .field("inner_circuits", &self.inner_circuits)
            .field("outer_circuits", &self.outer_circuits)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
