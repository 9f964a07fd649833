use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::prelude::*;

#[derive(Clone, Debug, Parser)]
#[command(version, about = "A Blokus Duo engine speaking a line-based text protocol")]
pub struct DuoServerOptions {
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// The deepest search iteration, in plies.
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..))]
    pub depth: u8,

    /// The search budget per move, in seconds.
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Value every search node for its own mover instead of the root mover.
    #[arg(short, long, default_value_t = false)]
    pub negamax: bool,

    #[arg(short, long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = WhichStrategy::Random)]
    pub player_one: WhichStrategy,

    #[arg(long, value_enum, default_value_t = WhichStrategy::AlphaBeta)]
    pub player_two: WhichStrategy,

    /// Play one game between the two configured players and exit.
    #[arg(long, default_value_t = false)]
    pub selfplay: bool,

    /// Append a board snapshot to this file after every ply.
    #[arg(short, long)]
    pub replay: Option<PathBuf>,
}

impl DuoServerOptions {
    pub fn agent_config(&self) -> AgentConfig {
        let mut config = AgentConfig::default();

        config.limits = SearchLimits { depth: self.depth, timeout: self.timeout.map(Duration::from_secs) };
        if self.negamax {
            config.mode = SearchMode::Negamax;
        }
        config.seed = self.seed;
        config.players = [self.player_one, self.player_two];

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_search_two_plies() {
        let options = DuoServerOptions::parse_from(["blokus"]);
        let config = options.agent_config();
        assert_eq!(config.limits.depth, 2);
        assert!(config.limits.timeout.is_none());
        assert_eq!(config.mode, SearchMode::FixedReference);
        assert_eq!(config.players, [WhichStrategy::Random, WhichStrategy::AlphaBeta]);
    }

    #[test]
    fn parses_players_and_limits() {
        let options = DuoServerOptions::parse_from([
            "blokus", "--depth", "3", "--timeout", "5", "--negamax", "--player-one", "mobility", "--player-two", "human",
            "--seed", "9",
        ]);
        let config = options.agent_config();
        assert_eq!(config.limits.depth, 3);
        assert_eq!(config.limits.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.mode, SearchMode::Negamax);
        assert_eq!(config.players, [WhichStrategy::Mobility, WhichStrategy::Human]);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn rejects_a_zero_depth() {
        assert!(DuoServerOptions::try_parse_from(["blokus", "--depth", "0"]).is_err());
    }
}
