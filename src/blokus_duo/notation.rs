use regex::Regex;

use crate::blokus_duo::prelude::*;

/// A segment of a gamestring that represents the board setup: one '.', 'X' or 'O' per cell, row-major.
#[derive(Clone, Debug)]
pub struct SetupString {
    pub repr: String,
    pub board: Board,
}

impl std::str::FromStr for SetupString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.chars().count() != NUM_CELLS {
            return Err(anyhow!("setup string must have {NUM_CELLS} cells, received {}", s.chars().count()));
        }

        let mut board = Board::new();
        for (i, ch) in s.chars().enumerate() {
            let player = Player::parse(&ch.to_string())?;
            board.set_cell(&Coord::from_index(i), player)?;
        }
        Ok(SetupString { repr: s.to_owned(), board })
    }
}

/// A placement request as a human or a front end writes it. The orientation may be left out, in which case
/// it is resolved against the position it is played in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub piece: usize,
    pub orientation: Option<usize>,
    pub anchor: Coord,
}

impl From<Move> for MoveRequest {
    fn from(mv: Move) -> Self {
        MoveRequest { piece: mv.piece, orientation: Some(mv.orientation), anchor: mv.anchor }
    }
}

/// A segment of a gamestring that represents a move, `piece[:orientation]@row,col`. If the move represents
/// a pass, then it contains no request.
#[derive(Clone, Debug)]
pub struct MoveString {
    pub repr: String,
    pub request: Option<MoveRequest>,
}

impl std::str::FromStr for MoveString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "pass" {
            return Ok(MoveString { repr: s.to_owned(), request: None });
        }

        let pattern = Regex::new("^(?<piece>[0-9]{1,2})(:(?<orientation>[0-9]))?@(?<anchor>[0-9]{1,2},[0-9]{1,2})$")?;
        let Some(matches) = pattern.captures(s) else {
            return Err(anyhow!("could not parse movestring {s}"));
        };

        let piece = matches["piece"].parse::<usize>()?;
        let orientation = matches.name("orientation").map(|m| m.as_str().parse::<usize>()).transpose()?;
        let anchor = matches["anchor"].parse::<Coord>()?;

        Ok(MoveString { repr: s.to_owned(), request: Some(MoveRequest { piece, orientation, anchor }) })
    }
}

/// A parsed gamestring: an optional setup followed by a `;`-separated move list.
///
/// Caveat: the game need not actually be semantically valid, only syntactically; each move should be tried
/// in turn against the position reached by the moves before it.
#[derive(Clone, Debug)]
pub struct GameString {
    pub setup: Option<SetupString>,
    pub moves: Vec<MoveString>,
}

impl std::str::FromStr for GameString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = s.split(';').map(str::trim).filter(|p| !p.is_empty()).collect::<Vec<&str>>();

        let (setup, movelist) = match parts.split_first() {
            Some((first, rest)) if first.chars().count() == NUM_CELLS => (Some(first.parse::<SetupString>()?), rest),
            _ => (None, parts.as_slice()),
        };

        let mut moves = vec![];
        for move_str in movelist {
            moves.push(move_str.parse::<MoveString>()?);
        }
        Ok(GameString { setup, moves })
    }
}
