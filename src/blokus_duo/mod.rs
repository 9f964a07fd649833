/*
 *  The rules of Blokus Duo: pieces, board, legality and move generation.
 */

pub(crate) mod board;
pub(crate) mod consts;
pub mod coords;
pub(crate) mod movegen;
pub mod notation;
pub(crate) mod polyomino;
pub(crate) mod position;
pub(crate) mod rules;
pub mod sets;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        board::{Bitboard, Board},
        consts::*,
        coords::{self, *},
        movegen::{legal_moves, Move},
        notation::*,
        polyomino::{orientations, Piece, PieceCatalog, Rotation, Shape},
        position::{PlayerState, Position},
        rules::{is_legal, legality, MoveError},
        sets::*,
    };

    pub use super::sets::SetOps;
}
