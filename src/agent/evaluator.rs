use crate::blokus_duo::prelude::*;

/// Scores a cutoff or terminal position for one side; larger is better for that side.
pub trait Evaluator {
    fn evaluate(&self, position: &Position, side: Player) -> i32;
}

#[derive(Clone, Copy, Debug, Default)]
/// The material evaluator: the opponent's remaining squares less the side's own.
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, position: &Position, side: Player) -> i32 {
        position.score() * side.perspective()
    }
}

/// The number of placements the mover still has after hypothetically committing the move.
pub fn mobility(position: &Position, player: Player, mv: Move) -> usize {
    let mut next = position.clone();
    next.play_unchecked_engine(player, mv);
    next.legal_moves_for(player).len()
}
