use crate::blokus_duo::{prelude::*, rules::Frontier};

/// A placement: one orientation of one unplaced piece, with its (0, 0) offset on the anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub piece: usize,
    pub orientation: usize,
    pub anchor: Coord,
}

impl Move {
    pub fn new(piece: usize, orientation: usize, anchor: Coord) -> Move {
        Move { piece, orientation, anchor }
    }

    /// The canonical notation for the move, `piece:orientation@row,col`.
    pub fn notate(&self) -> String {
        format!("{}:{}@{}", self.piece, self.orientation, self.anchor.notate())
    }

    /// The board cells this move covers. Only meaningful for moves that passed the legality check.
    pub fn cells<'c>(&self, catalog: &'c PieceCatalog) -> impl Iterator<Item = Coord> + 'c {
        catalog.get_orientation(self.piece, self.orientation).at(self.anchor).map(|c| c.coerce())
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notate())
    }
}

/// Lazily yields every legal placement for the player, in pool order, then orientation order, then
/// candidate order.
///
/// Anchors are derived from the candidate set rather than drawn from it: a shape's (0, 0) offset need not be
/// one of its cells, but its pivot always is, so every legal placement is found exactly once by pinning the
/// pivot to each empty candidate cell. Each candidate is still put through the full legality check.
pub(crate) fn legal_moves_iter<'c>(
    player: Player, board: &Board, player_state: &'c PlayerState, candidates: &'c CoordSet, catalog: &'c PieceCatalog,
) -> impl Iterator<Item = Move> + 'c {
    let frontier = Frontier::new(player, board, player_state);
    player_state.pool().iter().flat_map(move |&piece| {
        catalog.get_piece(piece).orientations.iter().enumerate().flat_map(move |(orientation, shape)| {
            let pivot = shape.pivot();
            candidates.iter().filter_map(move |cell| {
                let anchor = (cell - &pivot).checked()?;
                frontier.allows(shape, anchor).then_some(Move { piece, orientation, anchor })
            })
        })
    })
}

/// Produces all legal placements for the player given a board, the player's pool, and the cells still open.
pub fn legal_moves(
    player: Player, board: &Board, player_state: &PlayerState, candidates: &CoordSet, catalog: &PieceCatalog,
) -> Vec<Move> {
    legal_moves_iter(player, board, player_state, candidates, catalog).collect()
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

    use super::*;

    /// Every (piece, orientation, anchor) over the whole board, put through the oracle one by one.
    fn brute_force(player: Player, position: &Position) -> Vec<Move> {
        let catalog = position.catalog;
        let state = position.player(player);
        let mut moves = vec![];
        for &piece in state.pool() {
            for (orientation, shape) in catalog.get_piece(piece).orientations.iter().enumerate() {
                for (row, col) in (0..BOARD_SIZE).cartesian_product(0..BOARD_SIZE) {
                    let anchor = Coord::new(row, col);
                    if is_legal(player, shape, anchor, position.board(), state) {
                        moves.push(Move { piece, orientation, anchor });
                    }
                }
            }
        }
        moves.sort();
        moves
    }

    fn enumerated(player: Player, position: &Position) -> Vec<Move> {
        let mut moves = legal_moves(player, position.board(), position.player(player), position.candidates(), position.catalog);
        moves.sort();
        moves
    }

    #[test]
    fn opening_moves_cover_the_corner() {
        let catalog = PieceCatalog::new();
        let position = Position::new(&catalog);
        let moves = enumerated(Player::One, &position);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert!(mv.cells(&catalog).contains(&Coord::new(0, 0)), "{mv}");
        }
        // the monomino has exactly one opening placement
        assert_eq!(moves.iter().filter(|mv| mv.piece == 0).count(), 1);
    }

    #[test]
    fn matches_brute_force_on_a_small_subset() {
        let catalog = PieceCatalog::new();
        let pools = [vec![0, 5, 9, 20], vec![1, 10, 16]];
        let mut position = Position::with_pools(&catalog, pools);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..6 {
            let player = position.player_to_move();
            let moves = enumerated(player, &position);
            assert_eq!(moves, brute_force(player, &position));
            match moves.choose(&mut rng) {
                Some(mv) => position.play(*mv).unwrap(),
                None     => {
                    if position.is_terminal() { break; }
                    position.pass().unwrap();
                }
            }
        }
    }

    #[test]
    fn finds_placements_anchored_on_an_occupied_cell() {
        let catalog = PieceCatalog::new();
        // the V3r turned a quarter: cells (0, 1), (1, 0), (1, 1), so its (0, 0) offset is not covered
        let orientation = catalog.get_piece(6).orientations.iter()
            .position(|s| s.pivot() != OffsetCoord::new(0, 0))
            .unwrap();

        let mut board = Board::new();
        board.set_cell(&Coord::new(3, 3), Some(Player::One)).unwrap();
        board.set_cell(&Coord::new(3, 4), Some(Player::Two)).unwrap();
        let position = Position::from_setup(&catalog, board, [vec![6], vec![]]);

        let moves = enumerated(Player::One, &position);
        assert!(moves.contains(&Move::new(6, orientation, Coord::new(3, 4))));
        assert_eq!(moves, brute_force(Player::One, &position));
    }
}
