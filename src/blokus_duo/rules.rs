use crate::blokus_duo::prelude::*;

/// Why a placement or move request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// A cell of the placement lies off the board.
    OutOfBounds(OffsetCoord),
    /// A cell of the placement is already owned.
    Overlap(Coord),
    /// A cell of the placement shares an edge with the mover's own piece.
    EdgeContact(Coord),
    /// No cell of the placement touches the mover's pieces by a corner (or covers the start corner on a first move).
    NoCornerContact,
    UnknownPiece(usize),
    UnknownOrientation(usize, usize),
    PieceNotInPool(usize),
    NotYourTurn(Player),
    GameOver,
    /// A pass was requested while the mover still has a legal placement.
    MustPlay,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfBounds(c)             => write!(f, "cell ({}, {}) is off the board", c.rows, c.cols),
            MoveError::Overlap(c)                 => write!(f, "cell {} is already occupied", c.notate()),
            MoveError::EdgeContact(c)             => write!(f, "cell {} shares an edge with an own piece", c.notate()),
            MoveError::NoCornerContact            => write!(f, "placement touches no own piece by a corner"),
            MoveError::UnknownPiece(id)           => write!(f, "no piece with id {id}"),
            MoveError::UnknownOrientation(id, o)  => write!(f, "piece {id} has no orientation {o}"),
            MoveError::PieceNotInPool(id)         => write!(f, "piece {id} has already been placed"),
            MoveError::NotYourTurn(p)             => write!(f, "it is not {p}'s turn"),
            MoveError::GameOver                   => write!(f, "the game is over"),
            MoveError::MustPlay                   => write!(f, "cannot pass while a legal placement exists"),
        }
    }
}

impl std::error::Error for MoveError {}

/// The masks a player's placements are checked against, computed once per board and reused for every
/// candidate placement.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frontier {
    occupied: Bitboard,
    /// Cells orthogonally adjacent to the mover's own cells.
    edges: Bitboard,
    /// Cells diagonally adjacent to the mover's own cells.
    corners: Bitboard,
    first_move: bool,
    start_corner: Coord,
}

impl Frontier {
    pub(crate) fn new(player: Player, board: &Board, player_state: &PlayerState) -> Frontier {
        let own = board.owned(player);
        Frontier {
            occupied: board.occupied(),
            edges: own.orthogonal_neighbours(),
            corners: own.diagonal_neighbours(),
            first_move: !player_state.has_placed(),
            start_corner: player_state.start_corner(),
        }
    }

    /// Checks every target cell for bounds, overlap and edge contact, and the placement as a whole for
    /// corner contact. Reports the first violation found.
    pub(crate) fn check(&self, orientation: &Shape, anchor: Coord) -> std::result::Result<(), MoveError> {
        let mut touches_corner = false;
        for target in orientation.at(anchor) {
            let Some(cell) = target.checked() else {
                return Err(MoveError::OutOfBounds(target));
            };
            if self.occupied.contains(&cell) {
                return Err(MoveError::Overlap(cell));
            }
            if self.edges.contains(&cell) {
                return Err(MoveError::EdgeContact(cell));
            }
            touches_corner |= match self.first_move {
                true  => cell == self.start_corner,
                false => self.corners.contains(&cell),
            };
        }

        match touches_corner {
            true  => Ok(()),
            false => Err(MoveError::NoCornerContact),
        }
    }

    /// Determines whether or not the placement is legal.
    pub(crate) fn allows(&self, orientation: &Shape, anchor: Coord) -> bool {
        self.check(orientation, anchor).is_ok()
    }
}

/// Checks a placement of one orientation at an anchor against the board and the mover's history,
/// reporting the first rule it breaks.
pub fn legality(
    player: Player, orientation: &Shape, anchor: Coord, board: &Board, player_state: &PlayerState,
) -> std::result::Result<(), MoveError> {
    Frontier::new(player, board, player_state).check(orientation, anchor)
}

/// Determines whether a placement of one orientation at an anchor is legal for the player.
pub fn is_legal(player: Player, orientation: &Shape, anchor: Coord, board: &Board, player_state: &PlayerState) -> bool {
    legality(player, orientation, anchor, board, player_state).is_ok()
}
