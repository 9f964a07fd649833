mod controller;
mod evaluator;
mod search;
mod strategies;

use std::time::Duration;

use crate::blokus_duo::prelude::*;

pub use controller::{GameController, Outcome, ReplayLog, Turn};
pub use evaluator::{mobility, Evaluator, MaterialEvaluator};
pub use search::{AlphaBeta, SearchLimits, SearchMode, SearchOutcome};
pub use strategies::{MobilityStrategy, RandomStrategy};

/// A move-selection policy for a non-human player.
pub trait Strategy {
    /// Picks a placement for the player to move, or None to pass.
    fn choose_move(&mut self, position: &Position) -> Option<Move>;

    fn name(&self) -> &'static str;

    /// Configures the max depth on the search, for strategies that search.
    fn set_max_depth(&mut self, _depth: u8) {}

    /// Configures the timeout on the search, for strategies that search.
    fn set_timeout(&mut self, _timeout: Option<Duration>) {}
}

/// Who picks the moves for one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum WhichStrategy {
    /// Moves arrive from outside, through the controller's move interface.
    Human,
    Random,
    Mobility,
    #[default]
    AlphaBeta,
}

#[derive(Clone, Copy, Debug)]
pub struct AgentConfig {
    pub limits: SearchLimits,
    pub mode: SearchMode,
    /// Seeds the random players; each side derives its own stream from it.
    pub seed: Option<u64>,
    pub players: [WhichStrategy; 2],
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            limits: SearchLimits::default(),
            mode: SearchMode::default(),
            seed: None,
            players: [WhichStrategy::Random, WhichStrategy::AlphaBeta],
        }
    }
}

impl AgentConfig {
    /// Gets the default configuration.
    pub fn new() -> AgentConfig {
        AgentConfig::default()
    }

    /// Produces the search engine used to answer move queries.
    pub fn get_engine(&self) -> Box<dyn Strategy> {
        Box::new(AlphaBeta::new(self.mode, self.limits))
    }

    /// Produces the policy for one side; humans have none.
    pub fn get_strategy(&self, player: Player) -> Option<Box<dyn Strategy>> {
        match self.players[player.index()] {
            WhichStrategy::Human     => None,
            WhichStrategy::Random    => Some(Box::new(RandomStrategy::new(self.seed.map(|s| s.wrapping_add(player.index() as u64))))),
            WhichStrategy::Mobility  => Some(Box::new(MobilityStrategy)),
            WhichStrategy::AlphaBeta => Some(self.get_engine()),
        }
    }

    /// Produces the policies for both sides.
    pub fn get_policies(&self) -> [Option<Box<dyn Strategy>>; 2] {
        Player::all().map(|p| self.get_strategy(p))
    }
}
