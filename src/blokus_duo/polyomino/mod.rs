pub mod catalog;
pub mod transform;

use super::prelude::*;

use itertools::Itertools;
pub use catalog::{Piece, PieceCatalog};
pub use transform::Rotation;

/// An immutable polyomino: a set of offsets whose bounding box touches (0, 0).
///
/// Cells are kept sorted, so two shapes compare equal exactly when they cover the same offsets.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Shape {
    cells: Vec<OffsetCoord>,
}

impl Shape {
    /// Builds a shape from arbitrary offsets by:
    /// 1. subtracting the minimum row and the minimum column from every offset
    /// 2. sorting and deduplicating the result
    pub fn new(cells: impl IntoIterator<Item = OffsetCoord>) -> Shape {
        let cells = cells.into_iter().collect::<Vec<_>>();
        let min_row = cells.iter().map(|c| c.rows).min().unwrap_or(0);
        let min_col = cells.iter().map(|c| c.cols).min().unwrap_or(0);
        let origin = OffsetCoord::new(min_row, min_col);

        let cells = cells.into_iter().map(|c| c - origin).sorted().dedup().collect();
        Shape { cells }
    }

    /// Builds a shape from (row, col) pairs.
    pub fn from_pairs(pairs: &[(isize, isize)]) -> Shape {
        Shape::new(pairs.iter().map(|&(r, c)| OffsetCoord::new(r, c)))
    }

    /// Produces the real board offsets of this shape when its (0, 0) offset lands on the anchor.
    pub fn at(&self, anchor: Coord) -> impl Iterator<Item = OffsetCoord> + '_ {
        let anchor = OffsetCoord::from(anchor);
        self.cells.iter().map(move |c| anchor + *c)
    }

    /// The offsets covered by this shape, sorted.
    pub fn cells(&self) -> &[OffsetCoord] {
        &self.cells
    }

    /// The number of rows spanned by the shape.
    pub fn height(&self) -> usize {
        self.cells.iter().map(|c| c.rows).max().map_or(0, |r| r as usize + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The number of squares in the shape.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The first covered offset in row-major order. Every placement covers the cell under its pivot,
    /// so anchors can be derived from empty cells without losing any placement.
    pub fn pivot(&self) -> OffsetCoord {
        self.cells[0]
    }

    /// Draws the shape as rows of '#' and '.'.
    pub fn pretty(&self) -> String {
        (0..self.height()).map(|r| {
            (0..self.width()).map(|c| {
                if self.cells.contains(&OffsetCoord::new(r as isize, c as isize)) { '#' } else { '.' }
            }).collect::<String>()
        }).join("\n")
    }

    /// Rotates the shape and renormalizes it.
    pub fn rotate(&self, rotation: &Rotation) -> Shape {
        Shape::new(self.cells.iter().map(|c| rotation.apply_one(c)))
    }

    /// The number of columns spanned by the shape.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.cols).max().map_or(0, |c| c as usize + 1)
    }
}

/// Gives back the distinct rotations of a shape. Symmetric rotations collapse, so the result holds 1, 2 or 4 shapes;
/// the first one is always the shape itself.
pub fn orientations(shape: &Shape) -> Vec<Shape> {
    let mut seen: BTreeSet<Shape> = BTreeSet::new();
    Rotation::all().iter()
        .map(|rotation| shape.rotate(rotation))
        .filter(|rotated| seen.insert(rotated.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_the_origin() {
        let shape = Shape::from_pairs(&[(3, 5), (4, 5), (4, 4)]);
        assert_eq!(shape.cells(), &[OffsetCoord::new(0, 1), OffsetCoord::new(1, 0), OffsetCoord::new(1, 1)]);
        assert_eq!(shape.pivot(), OffsetCoord::new(0, 1));
        assert_eq!((shape.height(), shape.width()), (2, 2));
    }

    #[test]
    fn symmetric_shapes_collapse() {
        let monomino = Shape::from_pairs(&[(0, 0)]);
        let domino = Shape::from_pairs(&[(0, 0), (1, 0)]);
        let square = Shape::from_pairs(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        let ell = Shape::from_pairs(&[(0, 0), (1, 0), (2, 0), (2, 1)]);
        let zigzag = Shape::from_pairs(&[(0, 0), (1, 0), (1, 1), (2, 1)]);

        assert_eq!(orientations(&monomino).len(), 1);
        assert_eq!(orientations(&domino).len(), 2);
        assert_eq!(orientations(&square).len(), 1);
        assert_eq!(orientations(&ell).len(), 4);
        assert_eq!(orientations(&zigzag).len(), 2);
    }

    #[test]
    fn first_orientation_is_the_shape_itself() {
        let ell = Shape::from_pairs(&[(0, 0), (1, 0), (2, 0), (2, 1)]);
        assert_eq!(orientations(&ell)[0], ell);
    }

    #[test]
    fn rotation_of_a_vertical_bar_is_horizontal() {
        let bar = Shape::from_pairs(&[(0, 0), (1, 0), (2, 0)]);
        let turned = bar.rotate(&Rotation::Rot90);
        assert_eq!(turned, Shape::from_pairs(&[(0, 0), (0, 1), (0, 2)]));
        assert!(orientations(&bar).contains(&turned));
    }

    #[test]
    fn pretty_prints_the_bounding_box() {
        let ell = Shape::from_pairs(&[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(ell.pretty(), "#.\n##");
    }
}
