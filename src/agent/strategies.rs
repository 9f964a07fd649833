use std::time::Duration;

use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

use crate::blokus_duo::prelude::*;

use super::{mobility, AlphaBeta, Evaluator, Strategy};

/// Picks uniformly among all legal placements.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// A random player; seeded games are reproducible.
    pub fn new(seed: Option<u64>) -> RandomStrategy {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_os_rng(),
        };
        RandomStrategy { rng }
    }
}

impl Strategy for RandomStrategy {
    fn choose_move(&mut self, position: &Position) -> Option<Move> {
        position.legal_moves().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Greedily prefers the placement that leaves the mover the most placements afterwards.
/// Ties go to the first such placement in enumeration order.
#[derive(Clone, Copy, Debug, Default)]
pub struct MobilityStrategy;

impl Strategy for MobilityStrategy {
    fn choose_move(&mut self, position: &Position) -> Option<Move> {
        let player = position.player_to_move();
        let mut best: Option<(Move, usize)> = None;
        for mv in position.legal_moves() {
            let score = mobility(position, player, mv);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((mv, score));
            }
        }
        best.map(|(mv, _)| mv)
    }

    fn name(&self) -> &'static str {
        "mobility"
    }
}

impl<E: Evaluator> Strategy for AlphaBeta<E> {
    fn choose_move(&mut self, position: &Position) -> Option<Move> {
        self.search(position).best
    }

    fn name(&self) -> &'static str {
        "alpha-beta"
    }

    fn set_max_depth(&mut self, depth: u8) {
        AlphaBeta::set_max_depth(self, depth);
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) {
        AlphaBeta::set_timeout(self, timeout);
    }
}
