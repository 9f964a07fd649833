use crate::blokus_duo::{movegen::legal_moves_iter, prelude::*, rules::Frontier};

/// One player's side of the game: the unplaced pool, the placement history, and the start corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    player: Player,
    /// Unplaced piece ids, in catalog order unless constructed otherwise.
    pool: Vec<usize>,
    /// Placements made by this player, oldest first.
    placed: Vec<Move>,
    has_placed: bool,
    start_corner: Coord,
}

impl PlayerState {
    /// A fresh player holding the given pool.
    pub fn new(player: Player, pool: Vec<usize>) -> PlayerState {
        PlayerState {
            player,
            pool,
            placed: vec![],
            has_placed: false,
            start_corner: player.start_corner(),
        }
    }

    /// Whether the player has put at least one piece on the board.
    pub fn has_placed(&self) -> bool {
        self.has_placed
    }

    pub fn has_piece(&self, id: usize) -> bool {
        self.pool.contains(&id)
    }

    pub fn placed(&self) -> &[Move] {
        &self.placed
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn pool(&self) -> &[usize] {
        &self.pool
    }

    /// The sum of cell counts over the unplaced pool.
    pub fn remaining_squares(&self, catalog: &PieceCatalog) -> usize {
        catalog.squares(&self.pool)
    }

    pub fn start_corner(&self) -> Coord {
        self.start_corner
    }

    /// Appends a placement to the history.
    pub(crate) fn record(&mut self, mv: Move) {
        self.placed.push(mv);
        self.has_placed = true;
    }

    /// Removes a piece from the pool.
    pub(crate) fn take(&mut self, id: usize) -> std::result::Result<(), MoveError> {
        let Some(i) = self.pool.iter().position(|&p| p == id) else {
            return Err(MoveError::PieceNotInPool(id));
        };
        self.pool.remove(i);
        Ok(())
    }
}

/// A full game state: board, both players, the player to move, and the consecutive pass count.
///
/// The authoritative game and every simulated search node are values of this type; cloning one yields a fully
/// independent snapshot (the board and candidate set are plain bit arrays, the pools and histories are short).
#[derive(Clone, Debug)]
pub struct Position<'a> {
    board: Board,

    players: [PlayerState; 2],

    player_to_move: Player,

    /// Consecutive passes; the game ends at two.
    passes: u8,

    /// Cells no piece covers yet. Only ever shrinks, and only narrows where move generation looks;
    /// legality is always decided by the full check.
    candidates: CoordSet,

    /// A reference to the built catalog, shared by every snapshot.
    pub catalog: &'a PieceCatalog,
}

impl<'a> Position<'a> {
    /// Returns the opening position: an empty board and both players holding the full catalog.
    pub fn new(catalog: &'a PieceCatalog) -> Position<'a> {
        let pool = (0..catalog.len()).collect::<Vec<_>>();
        Position::with_pools(catalog, [pool.clone(), pool])
    }

    /// Returns an empty board where each player holds only the given pieces.
    pub fn with_pools(catalog: &'a PieceCatalog, pools: [Vec<usize>; 2]) -> Position<'a> {
        Position::from_setup(catalog, Board::new(), pools)
    }

    /// Returns a position from a pre-filled board. A player owning any cell counts as having placed
    /// their first piece.
    pub fn from_setup(catalog: &'a PieceCatalog, board: Board, pools: [Vec<usize>; 2]) -> Position<'a> {
        let [one, two] = pools;
        let mut players = [PlayerState::new(Player::One, one), PlayerState::new(Player::Two, two)];
        for state in players.iter_mut() {
            state.has_placed = !board.owned(state.player).is_empty();
        }

        let candidates = CoordSet::full().difference(&board.occupied().iter().collect());
        Position {
            board,
            players,
            player_to_move: Player::One,
            passes: 0,
            candidates,
            catalog,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The cells not yet covered by any piece.
    pub fn candidates(&self) -> &CoordSet {
        &self.candidates
    }

    /// Whether the player has at least one legal placement.
    pub fn has_legal_move(&self, player: Player) -> bool {
        legal_moves_iter(player, &self.board, self.player(player), &self.candidates, self.catalog).next().is_some()
    }

    /// Whether both players have passed in a row.
    pub fn is_terminal(&self) -> bool {
        self.passes >= PASSES_TO_END
    }

    /// All legal placements for the player to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.legal_moves_for(self.player_to_move)
    }

    /// All legal placements for the given player.
    pub fn legal_moves_for(&self, player: Player) -> Vec<Move> {
        legal_moves_iter(player, &self.board, self.player(player), &self.candidates, self.catalog).collect()
    }

    /// Checks a move request for the given player: the piece must be known and unplaced, the orientation must
    /// exist, and the placement must pass the rules.
    pub fn legality(&self, player: Player, mv: &Move) -> std::result::Result<(), MoveError> {
        let shape = self.catalog.try_orientation(mv.piece, mv.orientation)?;
        let state = self.player(player);
        if !state.has_piece(mv.piece) {
            return Err(MoveError::PieceNotInPool(mv.piece));
        }
        Frontier::new(player, &self.board, state).check(shape, mv.anchor)
    }

    pub fn passes(&self) -> u8 {
        self.passes
    }

    /// Passes the turn, if the player to move has nothing to play.
    pub fn pass(&mut self) -> std::result::Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.has_legal_move(self.player_to_move) {
            return Err(MoveError::MustPlay);
        }
        self.pass_unchecked_engine();
        Ok(())
    }

    /// Passes unchecked; engine use only.
    pub fn pass_unchecked_engine(&mut self) {
        self.passes += 1;
        self.next_player();
    }

    /// Plays a move for the player to move, if legal.
    pub fn play(&mut self, mv: Move) -> std::result::Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        self.legality(self.player_to_move, &mv)?;
        self.play_unchecked_engine(self.player_to_move, mv);
        Ok(())
    }

    /// Places a move for the given player with no legality checks; engine use only. The move must come from the
    /// enumerator for this very position.
    ///
    /// # Panics
    ///
    /// Panics if the piece is not in the player's pool, which means the move is stale.
    pub fn play_unchecked_engine(&mut self, player: Player, mv: Move) {
        let state = &mut self.players[player.index()];
        if let Err(e) = state.take(mv.piece) {
            panic!("stale move {mv} for {player}: {e}");
        }
        state.record(mv);

        let cells = mv.cells(self.catalog).collect::<CoordSet>();
        self.board.fill(player, cells.iter());
        self.candidates.difference_inplace(&cells);

        self.passes = 0;
        self.player_to_move = -player;
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player.index()]
    }

    pub fn player_to_move(&self) -> Player {
        self.player_to_move
    }

    /// The sum of cell counts over the player's unplaced pieces; lower is better.
    pub fn remaining_squares(&self, player: Player) -> usize {
        self.player(player).remaining_squares(self.catalog)
    }

    /// Gets the material balance from Player 1's perspective.
    pub fn score(&self) -> i32 {
        self.remaining_squares(Player::Two) as i32 - self.remaining_squares(Player::One) as i32
    }

    pub(super) fn next_player(&mut self) {
        self.player_to_move = -self.player_to_move;
    }
}
