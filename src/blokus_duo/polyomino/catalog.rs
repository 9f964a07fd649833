use itertools::Itertools;

use crate::blokus_duo::prelude::*;

use super::{orientations, Shape};

/// The starting pieces of each player, by catalog index. Identity is positional: a few entries share a shape
/// (e.g. the vertical and horizontal dominoes), and they remain distinct inventory items.
const BASE_SHAPES: [(&str, &[(isize, isize)]); NUM_PIECES] = [
    ("I1",   &[(0, 0)]),
    ("I2",   &[(0, 0), (1, 0)]),
    ("I2h",  &[(0, 0), (0, 1)]),
    ("I3",   &[(0, 0), (1, 0), (2, 0)]),
    ("I3h",  &[(0, 0), (0, 1), (0, 2)]),
    ("V3",   &[(0, 0), (1, 0), (1, 1)]),
    ("V3r",  &[(0, 0), (0, 1), (1, 1)]),
    ("I4",   &[(0, 0), (1, 0), (2, 0), (3, 0)]),
    ("I4h",  &[(0, 0), (0, 1), (0, 2), (0, 3)]),
    ("L4",   &[(0, 0), (1, 0), (2, 0), (2, 1)]),
    ("O4",   &[(0, 0), (0, 1), (1, 0), (1, 1)]),
    ("S4",   &[(0, 0), (1, 0), (1, 1), (2, 1)]),
    ("Z4",   &[(0, 0), (0, 1), (1, 1), (1, 2)]),
    ("I5",   &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
    ("I5h",  &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
    ("V5",   &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]),
    ("L5",   &[(0, 0), (1, 0), (1, 1), (1, 2), (1, 3)]),
    ("P5",   &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2)]),
    ("P5v",  &[(0, 0), (1, 0), (1, 1), (2, 0), (2, 1)]),
    ("P5r",  &[(0, 0), (0, 1), (1, 0), (1, 1), (1, 2)]),
    ("U5",   &[(0, 0), (0, 1), (1, 1), (2, 1), (2, 0)]),
];

/// A catalog entry: a base shape and its precomputed distinct rotations.
#[derive(Clone, Debug)]
pub struct Piece {
    pub id: usize,
    pub name: &'static str,
    pub shape: Shape,
    pub orientations: Vec<Shape>,
}

impl Piece {
    /// The number of squares in this piece.
    pub fn size(&self) -> usize {
        self.shape.len()
    }
}

/// Precomputed shapes and orientations for the 21-piece set both players start with.
#[derive(Clone, Debug)]
pub struct PieceCatalog {
    pieces: Vec<Piece>,
}

impl Default for PieceCatalog {
    fn default() -> Self {
        PieceCatalog::new()
    }
}

impl PieceCatalog {
    /// Creates a new PieceCatalog.
    pub fn new() -> PieceCatalog {
        let pieces = BASE_SHAPES.iter().enumerate().map(|(id, &(name, pairs))| {
            let shape = Shape::from_pairs(pairs);
            let orientations = orientations(&shape);
            Piece { id, name, shape, orientations }
        }).collect();
        PieceCatalog { pieces }
    }

    /// Gets a piece by ID.
    pub fn get_piece(&self, id: usize) -> &Piece {
        &self.pieces[id]
    }

    /// Gets one orientation of a piece by ID.
    pub fn get_orientation(&self, id: usize, orientation: usize) -> &Shape {
        &self.pieces[id].orientations[orientation]
    }

    /// Iterates the catalog in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Notates a piece by ID, along with its orientations.
    pub fn notate(&self, id: usize) -> String {
        let piece = self.get_piece(id);
        let drawings = piece.orientations.iter().enumerate()
            .map(|(i, shape)| format!("{}:{}\n{}", id, i, shape.pretty()))
            .join("\n\n");
        format!("{} {} ({} squares)\n{}", id, piece.name, piece.size(), drawings)
    }

    /// The sum of cell counts over the given pieces.
    pub fn squares(&self, pool: &[usize]) -> usize {
        pool.iter().map(|&id| self.get_piece(id).size()).sum()
    }

    /// Tries to map the ID to a piece.
    pub fn try_by_id(&self, id: usize) -> std::result::Result<&Piece, MoveError> {
        self.pieces.get(id).ok_or(MoveError::UnknownPiece(id))
    }

    /// Tries to map an (ID, orientation) pair to a shape.
    pub fn try_orientation(&self, id: usize, orientation: usize) -> std::result::Result<&Shape, MoveError> {
        self.try_by_id(id)?.orientations.get(orientation).ok_or(MoveError::UnknownOrientation(id, orientation))
    }
}
