use std::ops::Neg;
use crate::utils::prelude::*;

use super::coords::Coord;

pub const BOARD_SIZE: usize = 14;
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
pub const NUM_PIECES: usize = 21;
pub const MAX_ORIENTATIONS: usize = 4;

/// Two consecutive passes end the game.
pub const PASSES_TO_END: u8 = 2;

// A cell owner.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    /// Both players in turn order.
    pub fn all() -> [Player; 2] {
        [Player::One, Player::Two]
    }

    /// The index of this player into per-player arrays.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Notates the player by the mark its cells carry on the board.
    pub fn notate(&self) -> String {
        match self {
            Player::One => "X",
            Player::Two => "O"
        }.into()
    }

    /// The player's scoring factor.
    /// Choosing 1 and -1 allows for branchless negamax.
    pub fn perspective(&self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => -1
        }
    }

    /// The fixed corner every first piece of this player must cover.
    pub fn start_corner(&self) -> Coord {
        match self {
            Player::One => Coord::new(0, 0),
            Player::Two => Coord::new(BOARD_SIZE - 1, BOARD_SIZE - 1),
        }
    }

    /// Parses into a player, where an empty marker parses to None.
    pub fn parse(s: &str) -> Result<Option<Player>> {
        match s {
            "x" | "X" | "1" => Ok(Some(Player::One)),
            "o" | "O" | "2" => Ok(Some(Player::Two)),
            "_" | "-" | "." => Ok(None),
            _               => Err(anyhow!("invalid notation {s} for player"))
        }
    }

    /// Renders an optional owner the way the board prints it.
    pub fn repr(player: Option<Player>) -> String {
        player.map_or(".".into(), |p| p.notate())
    }
}

impl Neg for Player {
    type Output = Player;
    fn neg(self) -> Self::Output {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}
