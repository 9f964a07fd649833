use std::{fs::OpenOptions, io::Write, path::Path};

use crate::{blokus_duo::prelude::*, utils::prelude::*};

use super::Strategy;

/// The final tally of a game: remaining squares per player, and the winner if one has strictly fewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub remaining: [usize; 2],
    pub winner: Option<Player>,
}

impl Outcome {
    fn of(position: &Position) -> Outcome {
        let remaining = Player::all().map(|p| position.remaining_squares(p));
        let winner = match remaining[0].cmp(&remaining[1]) {
            std::cmp::Ordering::Less    => Some(Player::One),
            std::cmp::Ordering::Greater => Some(Player::Two),
            std::cmp::Ordering::Equal   => None,
        };
        Outcome { remaining, winner }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [one, two] = self.remaining;
        match self.winner {
            Some(p) => write!(f, "{p} wins ({one} to {two} squares remaining)"),
            None    => write!(f, "tie ({one} to {two} squares remaining)"),
        }
    }
}

/// What happened on one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Placed(Player, Move),
    Passed(Player),
    GameOver(Outcome),
}

/// An append-only log of board snapshots, one per completed ply, for offline replay.
pub struct ReplayLog {
    sink: Box<dyn Write>,
}

impl ReplayLog {
    /// Appends to the file at the path, creating it if needed.
    pub fn open(path: &Path) -> Result<ReplayLog> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("could not open replay log {}", path.display()))?;
        Ok(ReplayLog::new(Box::new(std::io::BufWriter::new(file))))
    }

    pub fn new(sink: Box<dyn Write>) -> ReplayLog {
        ReplayLog { sink }
    }

    /// Writes the board as rows of marks, followed by a blank line.
    pub fn record(&mut self, board: &Board) -> Result<()> {
        write!(self.sink, "{}\n\n", board.pretty())?;
        self.sink.flush()?;
        Ok(())
    }
}

/// Drives the authoritative game: asks the active policy for a move, applies it, and detects the end.
pub struct GameController<'a> {
    catalog: &'a PieceCatalog,
    position: Position<'a>,
    past_positions: Vec<Position<'a>>,
    policies: [Option<Box<dyn Strategy>>; 2],
    replay: Option<ReplayLog>,
}

impl<'a> GameController<'a> {
    /// A controller over a fresh game. A side without a policy is played through `apply_move` and `pass`.
    pub fn new(catalog: &'a PieceCatalog, policies: [Option<Box<dyn Strategy>>; 2]) -> GameController<'a> {
        GameController {
            catalog,
            position: Position::new(catalog),
            past_positions: vec![],
            policies,
            replay: None,
        }
    }

    /// Logs a board snapshot after every completed ply.
    pub fn with_replay(mut self, replay: ReplayLog) -> GameController<'a> {
        self.replay = Some(replay);
        self
    }

    /// Starts over from the opening position.
    pub fn reset(&mut self) {
        self.load_position(Position::new(self.catalog));
    }

    /// Starts over from an arbitrary position.
    pub fn load_position(&mut self, position: Position<'a>) {
        self.position = position;
        self.past_positions.clear();
    }

    /// Starts over from a gamestring, trying each of its moves in turn.
    pub fn load(&mut self, game: &GameString) -> Result<()> {
        let position = match &game.setup {
            Some(setup) => {
                let pool = (0..self.catalog.len()).collect::<Vec<_>>();
                Position::from_setup(self.catalog, setup.board, [pool.clone(), pool])
            },
            None => Position::new(self.catalog),
        };
        self.load_position(position);

        for mv in &game.moves {
            let player = self.position.player_to_move();
            let result = match mv.request {
                Some(request) => self.try_apply(player, request).map(|_| ()),
                None          => self.pass(),
            };
            result.with_context(|| format!("could not replay {}", mv.repr))?;
        }
        Ok(())
    }

    /// A read-only view of the game: the board, both players, and the player to move.
    pub fn snapshot(&self) -> &Position<'a> {
        &self.position
    }

    pub fn catalog(&self) -> &'a PieceCatalog {
        self.catalog
    }

    /// Whether the player to move has no policy and is waiting on a move from outside.
    pub fn awaiting_human(&self) -> bool {
        self.policies[self.position.player_to_move().index()].is_none()
    }

    /// Applies a placement request for the player, reporting whether it was legal.
    pub fn apply_move(&mut self, player: Player, piece: usize, orientation: Option<usize>, anchor: Coord) -> bool {
        match self.try_apply(player, MoveRequest { piece, orientation, anchor }) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("rejected move {piece}@{} for {player}: {e}", anchor.notate());
                false
            },
        }
    }

    /// Applies a placement request for the player, resolving a missing orientation to the first one that is
    /// legal at the anchor.
    pub fn try_apply(&mut self, player: Player, request: MoveRequest) -> std::result::Result<Move, MoveError> {
        if self.position.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if player != self.position.player_to_move() {
            return Err(MoveError::NotYourTurn(player));
        }

        let mv = match request.orientation {
            Some(orientation) => Move::new(request.piece, orientation, request.anchor),
            None              => self.resolve_orientation(player, request.piece, request.anchor)?,
        };
        self.commit(|position| position.play(mv))?;
        Ok(mv)
    }

    /// Passes for the player to move, if they have nothing to play.
    pub fn pass(&mut self) -> std::result::Result<(), MoveError> {
        self.commit(|position| position.pass())
    }

    /// Plays one turn with the active policy.
    pub fn step(&mut self) -> Result<Turn> {
        if self.position.is_terminal() {
            return Ok(Turn::GameOver(self.outcome()));
        }

        let player = self.position.player_to_move();
        let Some(policy) = self.policies[player.index()].as_mut() else {
            return Err(anyhow!("{player} is a human player; waiting for their move"));
        };

        let turn = match policy.choose_move(&self.position) {
            Some(mv) => {
                log::debug!("{player} ({}) plays {mv}", policy.name());
                self.commit(|position| position.play(mv))?;
                Turn::Placed(player, mv)
            },
            None => {
                log::debug!("{player} ({}) passes", policy.name());
                self.pass()?;
                Turn::Passed(player)
            },
        };

        if self.position.is_terminal() {
            log::info!("game over: {}", self.outcome());
        }
        Ok(turn)
    }

    /// Plays turns until the game ends.
    pub fn run(&mut self) -> Result<Outcome> {
        loop {
            if let Turn::GameOver(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// Steps back one ply.
    pub fn undo(&mut self) -> Result<()> {
        let Some(previous) = self.past_positions.pop() else {
            return Err(anyhow!("no move to undo"));
        };
        self.position = previous;
        Ok(())
    }

    /// The final scores, or the scores as they stand if the game is still running.
    pub fn outcome(&self) -> Outcome {
        Outcome::of(&self.position)
    }

    /// Whether both players have passed in a row.
    pub fn is_over(&self) -> bool {
        self.position.is_terminal()
    }

    fn resolve_orientation(&self, player: Player, piece: usize, anchor: Coord) -> std::result::Result<Move, MoveError> {
        let count = self.catalog.try_by_id(piece)?.orientations.len();
        let mut first_error = None;
        for orientation in 0..count {
            let mv = Move::new(piece, orientation, anchor);
            match self.position.legality(player, &mv) {
                Ok(()) => return Ok(mv),
                Err(e) => {
                    first_error.get_or_insert(e);
                },
            }
        }
        Err(first_error.unwrap_or(MoveError::UnknownOrientation(piece, 0)))
    }

    /// Runs a checked transition on a copy of the position, keeping it and the history only if it succeeds.
    fn commit(
        &mut self, transition: impl FnOnce(&mut Position<'a>) -> std::result::Result<(), MoveError>,
    ) -> std::result::Result<(), MoveError> {
        let mut next = self.position.clone();
        transition(&mut next)?;
        self.past_positions.push(std::mem::replace(&mut self.position, next));

        if let Some(replay) = self.replay.as_mut() {
            if let Err(e) = replay.record(self.position.board()) {
                log::warn!("could not write replay snapshot: {e}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::agent::{AgentConfig, MobilityStrategy, RandomStrategy, WhichStrategy};

    /// A sink that shares what was written with the test.
    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn humans(catalog: &PieceCatalog) -> GameController<'_> {
        GameController::new(catalog, [None, None])
    }

    #[test]
    fn corner_openings_then_two_passes_end_the_game() {
        let catalog = PieceCatalog::new();
        let mut game = humans(&catalog);
        game.load_position(Position::with_pools(&catalog, [vec![0], vec![0]]));

        assert!(game.apply_move(Player::One, 0, None, Coord::new(0, 0)));
        assert!(!game.apply_move(Player::Two, 0, None, Coord::new(12, 12)));
        assert_eq!(
            game.try_apply(Player::Two, MoveRequest { piece: 0, orientation: None, anchor: Coord::new(12, 12) }),
            Err(MoveError::NoCornerContact)
        );
        assert!(game.apply_move(Player::Two, 0, Some(0), Coord::new(13, 13)));

        game.pass().unwrap();
        assert!(!game.is_over());
        game.pass().unwrap();
        assert!(game.is_over());
        assert_eq!(game.outcome(), Outcome { remaining: [0, 0], winner: None });
    }

    #[test]
    fn fewer_remaining_squares_wins() {
        let catalog = PieceCatalog::new();
        let mut board = Board::new();
        // player two walls in the corner, so the domino never fits after the monomino
        for c in [(2, 0), (2, 1), (2, 2), (0, 2), (1, 2)] {
            board.set_cell(&Coord::new(c.0, c.1), Some(Player::Two)).unwrap();
        }
        let mut game = humans(&catalog);
        game.load_position(Position::from_setup(&catalog, board, [vec![0, 1], vec![0]]));

        assert!(game.apply_move(Player::One, 0, None, Coord::new(0, 0)));
        assert!(game.apply_move(Player::Two, 0, None, Coord::new(3, 3)));
        assert_eq!(game.pass(), Ok(()));
        assert_eq!(game.pass(), Ok(()));

        let outcome = game.outcome();
        assert_eq!(outcome.remaining, [2, 0]);
        assert_eq!(outcome.winner, Some(Player::Two));
    }

    #[test]
    fn resolves_the_first_legal_orientation() {
        let catalog = PieceCatalog::new();
        let mut game = humans(&catalog);
        assert!(game.apply_move(Player::One, 0, None, Coord::new(0, 0)));
        assert_eq!(
            game.try_apply(Player::One, MoveRequest { piece: 0, orientation: None, anchor: Coord::new(1, 1) }),
            Err(MoveError::NotYourTurn(Player::One))
        );

        // upright, the domino would hang off the bottom edge
        let mv = game.try_apply(Player::Two, MoveRequest { piece: 1, orientation: None, anchor: Coord::new(13, 12) }).unwrap();
        assert_eq!(mv.orientation, 1);
        assert!(mv.cells(&catalog).any(|c| c == Coord::new(13, 13)));
    }

    #[test]
    fn undo_restores_the_previous_position() {
        let catalog = PieceCatalog::new();
        let mut game = humans(&catalog);
        assert!(game.undo().is_err());

        assert!(game.apply_move(Player::One, 10, None, Coord::new(0, 0)));
        assert_eq!(game.snapshot().board().occupied_count(), 4);
        game.undo().unwrap();
        assert_eq!(game.snapshot().board().occupied_count(), 0);
        assert_eq!(game.snapshot().player_to_move(), Player::One);
        assert_eq!(game.snapshot().player(Player::One).pool().len(), NUM_PIECES);
    }

    #[test]
    fn rejected_moves_leave_no_trace() {
        let catalog = PieceCatalog::new();
        let mut game = humans(&catalog);
        assert!(!game.apply_move(Player::One, 10, Some(0), Coord::new(5, 5)));
        assert!(!game.apply_move(Player::One, 99, None, Coord::new(0, 0)));
        assert!(game.undo().is_err());
        assert_eq!(game.pass(), Err(MoveError::MustPlay));
        assert!(game.undo().is_err());
    }

    #[test]
    fn step_waits_for_humans() {
        let catalog = PieceCatalog::new();
        let mut game = GameController::new(&catalog, [None, Some(Box::new(MobilityStrategy) as Box<dyn Strategy>)]);
        assert!(game.awaiting_human());
        assert!(game.step().is_err());

        assert!(game.apply_move(Player::One, 0, None, Coord::new(0, 0)));
        assert!(matches!(game.step().unwrap(), Turn::Placed(Player::Two, _)));
    }

    #[test]
    fn self_play_runs_to_completion_and_logs_every_ply() {
        let catalog = PieceCatalog::new();
        let sink = SharedSink::default();
        let policies: [Option<Box<dyn Strategy>>; 2] = [
            Some(Box::new(RandomStrategy::new(Some(11)))),
            Some(Box::new(RandomStrategy::new(Some(12)))),
        ];
        let mut game = GameController::new(&catalog, policies).with_replay(ReplayLog::new(Box::new(sink.clone())));

        let mut plies = 0;
        let outcome = loop {
            match game.step().unwrap() {
                Turn::GameOver(outcome) => break outcome,
                _ => plies += 1,
            }
        };
        assert!(game.is_over());
        assert_eq!(outcome, game.outcome());
        assert_eq!(outcome.remaining, [game.snapshot().remaining_squares(Player::One), game.snapshot().remaining_squares(Player::Two)]);

        let log = String::from_utf8(sink.0.borrow().clone()).unwrap();
        let frames = log.split("\n\n").filter(|f| !f.is_empty()).collect::<Vec<_>>();
        assert_eq!(frames.len(), plies);
        assert!(frames.iter().all(|f| f.lines().count() == BOARD_SIZE));
    }

    #[test]
    fn loads_gamestrings() {
        let catalog = PieceCatalog::new();
        let config = AgentConfig { players: [WhichStrategy::Human, WhichStrategy::Human], ..AgentConfig::default() };
        let mut game = GameController::new(&catalog, config.get_policies());

        game.load(&"0@0,0; 0@13,13; 1:1@1,1".parse::<GameString>().unwrap()).unwrap();
        assert_eq!(game.snapshot().board().occupied_count(), 4);
        assert_eq!(game.snapshot().player_to_move(), Player::Two);

        assert!(game.load(&"0@0,0; 0@0,0".parse::<GameString>().unwrap()).is_err());
    }
}
