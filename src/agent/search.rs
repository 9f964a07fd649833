use std::time::{Duration, Instant};

use crate::blokus_duo::prelude::*;

use super::{Evaluator, MaterialEvaluator};

const INFINITY: i32 = i32::MAX;

/// How node values are oriented during the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Every node is valued for the player who moved at the root; a node maximizes when that player is to act
    /// and minimizes otherwise.
    #[default]
    FixedReference,
    /// Every node is valued for its own mover and negated on the way up.
    Negamax,
}

/// The resource bounds on one search.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    /// The deepest iteration, in plies. Passes consume a ply. A limit of 0 still runs the one-ply iteration;
    /// the command line and the text protocol reject it.
    pub depth: u8,
    /// The wall-clock budget, checked at every ply boundary.
    pub timeout: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits { depth: 2, timeout: None }
    }
}

/// The result of the last completed iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The best move for the player to move, or None if they must pass.
    pub best: Option<Move>,
    /// The value of the best move for the player to move.
    pub score: i32,
    /// The depth of the iteration that produced this result.
    pub depth: u8,
    /// The number of nodes visited over all iterations.
    pub nodes: u64,
}

/// Depth-bounded minimax with alpha-beta pruning over cloned positions, deepened iteratively.
///
/// Moves are tried in enumeration order. A player with no placement passes, which consumes a ply without
/// touching the position; a node where neither player can place is evaluated as it stands.
#[derive(Clone, Debug)]
pub struct AlphaBeta<E: Evaluator = MaterialEvaluator> {
    evaluator: E,
    mode: SearchMode,
    limits: SearchLimits,

    reference: Player,
    deadline: Option<Instant>,
    nodes: u64,
}

impl AlphaBeta<MaterialEvaluator> {
    /// A material-evaluating search with the given formulation and bounds.
    pub fn new(mode: SearchMode, limits: SearchLimits) -> AlphaBeta<MaterialEvaluator> {
        AlphaBeta::with_evaluator(MaterialEvaluator, mode, limits)
    }
}

impl<E: Evaluator> AlphaBeta<E> {
    pub fn with_evaluator(evaluator: E, mode: SearchMode, limits: SearchLimits) -> AlphaBeta<E> {
        AlphaBeta { evaluator, mode, limits, reference: Player::One, deadline: None, nodes: 0 }
    }

    pub fn set_max_depth(&mut self, depth: u8) {
        self.limits.depth = depth;
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.limits.timeout = timeout;
    }

    /// Searches the position for the player to move, deepening from one ply to the depth limit and keeping the
    /// last iteration that finished before the deadline. The first iteration always runs to completion
    /// if there is no deadline; with one, an unfinished first iteration falls back to the first legal move.
    pub fn search(&mut self, position: &Position) -> SearchOutcome {
        let started = Instant::now();
        self.reference = position.player_to_move();
        self.deadline = self.limits.timeout.map(|t| started + t);
        self.nodes = 0;

        let mut outcome = SearchOutcome {
            best: position.legal_moves().first().copied(),
            score: self.evaluator.evaluate(position, self.reference),
            depth: 0,
            nodes: 0,
        };

        for depth in 1..=self.limits.depth.max(1) {
            let Some((best, score)) = self.search_root(position, depth) else {
                log::debug!("search: deadline reached during depth {depth}, keeping depth {}", outcome.depth);
                break;
            };
            outcome = SearchOutcome { best, score, depth, nodes: self.nodes };
            log::debug!(
                "search: depth {depth} best {} score {score} nodes {} in {:?}",
                best.map_or("pass".into(), |mv| mv.notate()),
                self.nodes,
                started.elapsed()
            );
        }

        outcome.nodes = self.nodes;
        outcome
    }

    /// Runs one iteration at the root, returning the best move and its value for the mover, or None if the
    /// deadline passed.
    fn search_root(&mut self, position: &Position, depth: u8) -> Option<(Option<Move>, i32)> {
        let active = position.player_to_move();
        let moves = position.legal_moves();
        if moves.is_empty() {
            let value = match self.mode {
                SearchMode::FixedReference => self.minimax(position, active, depth, -INFINITY, INFINITY)?,
                SearchMode::Negamax        => self.negamax(position, active, depth, -INFINITY, INFINITY)?,
            };
            return Some((None, value));
        }

        let mut alpha = -INFINITY;
        let mut best = None;
        let mut best_value = -INFINITY;
        for mv in moves {
            let mut child = position.clone();
            child.play_unchecked_engine(active, mv);
            let value = match self.mode {
                SearchMode::FixedReference => self.minimax(&child, -active, depth - 1, alpha, INFINITY)?,
                SearchMode::Negamax        => -self.negamax(&child, -active, depth - 1, -INFINITY, -alpha)?,
            };
            if best.is_none() || value > best_value {
                best = Some(mv);
                best_value = value;
            }
            alpha = alpha.max(value);
        }
        Some((best, best_value))
    }

    /// Counts the node and reports whether the deadline has passed.
    fn expired(&mut self) -> bool {
        self.nodes += 1;
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// A node valued for the root mover.
    fn minimax(&mut self, position: &Position, active: Player, depth: u8, mut alpha: i32, mut beta: i32) -> Option<i32> {
        if self.expired() {
            return None;
        }
        if depth == 0 || position.is_terminal() {
            return Some(self.evaluator.evaluate(position, self.reference));
        }

        let moves = position.legal_moves_for(active);
        if moves.is_empty() {
            if !position.has_legal_move(-active) {
                return Some(self.evaluator.evaluate(position, self.reference));
            }
            return self.minimax(position, -active, depth - 1, alpha, beta);
        }

        let maximizing = active == self.reference;
        let mut value = if maximizing { -INFINITY } else { INFINITY };
        for mv in moves {
            let mut child = position.clone();
            child.play_unchecked_engine(active, mv);
            let score = self.minimax(&child, -active, depth - 1, alpha, beta)?;
            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }
        Some(value)
    }

    /// A node valued for its own mover.
    fn negamax(&mut self, position: &Position, active: Player, depth: u8, mut alpha: i32, beta: i32) -> Option<i32> {
        if self.expired() {
            return None;
        }
        if depth == 0 || position.is_terminal() {
            return Some(self.evaluator.evaluate(position, active));
        }

        let moves = position.legal_moves_for(active);
        if moves.is_empty() {
            if !position.has_legal_move(-active) {
                return Some(self.evaluator.evaluate(position, active));
            }
            return Some(-self.negamax(position, -active, depth - 1, -beta, -alpha)?);
        }

        let mut value = -INFINITY;
        for mv in moves {
            let mut child = position.clone();
            child.play_unchecked_engine(active, mv);
            value = value.max(-self.negamax(&child, -active, depth - 1, -beta, -alpha)?);
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain minimax with no pruning, valued for the reference player.
    fn unpruned(position: &Position, active: Player, reference: Player, depth: u8) -> i32 {
        let evaluate = |p: &Position| p.score() * reference.perspective();
        if depth == 0 || position.is_terminal() {
            return evaluate(position);
        }

        let moves = position.legal_moves_for(active);
        if moves.is_empty() {
            if !position.has_legal_move(-active) {
                return evaluate(position);
            }
            return unpruned(position, -active, reference, depth - 1);
        }

        let scores = moves.into_iter().map(|mv| {
            let mut child = position.clone();
            child.play_unchecked_engine(active, mv);
            unpruned(&child, -active, reference, depth - 1)
        });
        match active == reference {
            true  => scores.max().unwrap(),
            false => scores.min().unwrap(),
        }
    }

    fn small_game(catalog: &PieceCatalog) -> Position<'_> {
        let mut position = Position::with_pools(catalog, [vec![0, 1, 5, 10], vec![0, 3, 6, 9]]);
        position.play(Move::new(5, 0, Coord::new(0, 0))).unwrap();
        position.play(Move::new(6, 0, Coord::new(12, 12))).unwrap();
        position
    }

    #[test]
    fn pruning_keeps_the_minimax_value() {
        let catalog = PieceCatalog::new();
        let position = small_game(&catalog);

        for depth in 1..=3 {
            let limits = SearchLimits { depth, timeout: None };
            let outcome = AlphaBeta::new(SearchMode::FixedReference, limits).search(&position);
            assert_eq!(outcome.score, unpruned(&position, Player::One, Player::One, depth), "depth {depth}");
            assert_eq!(outcome.depth, depth);
            assert!(outcome.best.is_some());
        }
    }

    #[test]
    fn negamax_agrees_with_the_fixed_reference() {
        let catalog = PieceCatalog::new();
        let mut position = small_game(&catalog);
        position.play(Move::new(0, 0, Coord::new(2, 2))).unwrap();

        let limits = SearchLimits { depth: 3, timeout: None };
        let fixed = AlphaBeta::new(SearchMode::FixedReference, limits).search(&position);
        let negamax = AlphaBeta::new(SearchMode::Negamax, limits).search(&position);
        assert_eq!(fixed.score, negamax.score);
        assert_eq!(fixed.best, negamax.best);
        assert_eq!(fixed.score, unpruned(&position, Player::Two, Player::Two, 3));
    }

    #[test]
    fn a_stuck_mover_is_told_to_pass() {
        let catalog = PieceCatalog::new();
        let mut position = Position::with_pools(&catalog, [vec![0], vec![0, 1]]);
        position.play(Move::new(0, 0, Coord::new(0, 0))).unwrap();
        position.play(Move::new(0, 0, Coord::new(13, 13))).unwrap();

        let outcome = AlphaBeta::new(SearchMode::FixedReference, SearchLimits::default()).search(&position);
        assert_eq!(outcome.best, None);
        // player two still places the domino after the pass, evening the material
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.depth, 2);
    }

    #[test]
    fn an_expired_deadline_keeps_a_legal_fallback() {
        let catalog = PieceCatalog::new();
        let position = Position::new(&catalog);
        let limits = SearchLimits { depth: 4, timeout: Some(Duration::ZERO) };
        let outcome = AlphaBeta::new(SearchMode::FixedReference, limits).search(&position);

        assert_eq!(outcome.depth, 0);
        assert_eq!(outcome.best, position.legal_moves().first().copied());
    }

    #[test]
    fn a_deadline_mid_iteration_keeps_the_previous_depth() {
        let catalog = PieceCatalog::new();
        let position = Position::new(&catalog);
        let limits = SearchLimits { depth: 8, timeout: Some(Duration::from_millis(200)) };
        let timed = AlphaBeta::new(SearchMode::FixedReference, limits).search(&position);
        assert!((1..8).contains(&timed.depth), "stopped at depth {}", timed.depth);

        let untimed = SearchLimits { depth: timed.depth, timeout: None };
        let fixed = AlphaBeta::new(SearchMode::FixedReference, untimed).search(&position);
        assert_eq!(timed.best, fixed.best);
        assert_eq!(timed.score, fixed.score);
    }
}
