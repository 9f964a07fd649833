use std::sync::OnceLock;

use crate::blokus_duo::prelude::*;

/// Precomputed masks that keep shifted boards from wrapping across rows or falling off the end.
struct EdgeMasks {
    board: U256,
    not_first_col: U256,
    not_last_col: U256,
}

static EDGE_MASKS: OnceLock<EdgeMasks> = OnceLock::new();

fn edge_masks() -> &'static EdgeMasks {
    EDGE_MASKS.get_or_init(|| {
        let [mut board, mut not_first_col, mut not_last_col] = [U256::zero(); 3];
        for index in 0..NUM_CELLS {
            let bit = U256::one() << index;
            board = board | bit;
            match index % BOARD_SIZE {
                0                       => not_last_col = not_last_col | bit,
                c if c == BOARD_SIZE - 1 => not_first_col = not_first_col | bit,
                _                       => {
                    not_first_col = not_first_col | bit;
                    not_last_col = not_last_col | bit;
                }
            }
        }
        EdgeMasks { board, not_first_col, not_last_col }
    })
}

/// A bitboard for a 14x14 board: bit `row * 14 + col` is set when the cell is in the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bitboard(U256);

impl Default for Bitboard {
    fn default() -> Self {
        Bitboard(U256::zero())
    }
}

impl Bitboard {
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.in_bounds() && self.0.bit(coord.index())
    }

    /// The number of cells in the set.
    pub fn count(&self) -> usize {
        let U256(limbs) = self.0;
        limbs.iter().map(|limb| limb.count_ones() as usize).sum()
    }

    /// The cells diagonally adjacent to any cell of this set, clipped to the board.
    pub fn diagonal_neighbours(&self) -> Bitboard {
        let masks = edge_masks();
        let sideways = ((self.0 & masks.not_first_col) >> 1usize) | ((self.0 & masks.not_last_col) << 1usize);
        Bitboard(((sideways >> BOARD_SIZE) | (sideways << BOARD_SIZE)) & masks.board)
    }

    pub fn insert(&mut self, coord: &Coord) -> &mut Self {
        self.0 = self.0 | (U256::one() << coord.index());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_zero()
    }

    /// Iterates the cells of the set in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> {
        let U256(limbs) = self.0;
        limbs.into_iter().enumerate().flat_map(|(i, mut limb)| {
            std::iter::from_fn(move || {
                if limb == 0 {
                    return None;
                }
                let tz = limb.trailing_zeros() as usize;
                limb &= limb - 1;
                Some(i * 64 + tz)
            })
        }).map(Coord::from_index)
    }

    /// The cells orthogonally adjacent to any cell of this set, clipped to the board.
    pub fn orthogonal_neighbours(&self) -> Bitboard {
        let masks = edge_masks();
        let vertical = (self.0 >> BOARD_SIZE) | (self.0 << BOARD_SIZE);
        let horizontal = ((self.0 & masks.not_first_col) >> 1usize) | ((self.0 & masks.not_last_col) << 1usize);
        Bitboard((vertical | horizontal) & masks.board)
    }

    pub fn remove(&mut self, coord: &Coord) -> &mut Self {
        self.0 = self.0 & !(U256::one() << coord.index());
        self
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Bitboard;
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl FromIterator<Coord> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        let mut b = Bitboard::default();
        iter.into_iter().for_each(|c| {
            b.insert(&c);
        });
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_of(coords: &[(usize, usize)]) -> Bitboard {
        coords.iter().map(|&(r, c)| Coord::new(r, c)).collect()
    }

    #[test]
    fn neighbours_do_not_wrap_rows() {
        let edge = board_of(&[(3, 13)]);
        let orth = edge.orthogonal_neighbours();
        assert_eq!(orth.iter().collect::<Vec<_>>(), vec![Coord::new(2, 13), Coord::new(3, 12), Coord::new(4, 13)]);
        assert!(!orth.contains(&Coord::new(4, 0)));

        let diag = board_of(&[(5, 0)]).diagonal_neighbours();
        assert_eq!(diag.iter().collect::<Vec<_>>(), vec![Coord::new(4, 1), Coord::new(6, 1)]);
    }

    #[test]
    fn neighbours_stay_on_the_board() {
        let corner = board_of(&[(13, 13)]);
        assert_eq!(corner.orthogonal_neighbours().count(), 2);
        assert_eq!(corner.diagonal_neighbours().iter().collect::<Vec<_>>(), vec![Coord::new(12, 12)]);
    }

    #[test]
    fn neighbours_match_a_cell_by_cell_scan() {
        let cells = [(0, 0), (0, 13), (6, 6), (6, 7), (13, 0), (12, 13)];
        let b = board_of(&cells);
        let scan = |offsets: &[OffsetCoord]| -> Bitboard {
            b.iter().flat_map(move |c| offsets.iter().filter_map(move |o| (c + o).checked())).collect()
        };
        assert_eq!(b.orthogonal_neighbours(), scan(&ORTHOGONAL_OFFSETS));
        assert_eq!(b.diagonal_neighbours(), scan(&DIAGONAL_OFFSETS));
    }

    #[test]
    fn counts_and_iterates_across_limbs() {
        let mut b = board_of(&[(0, 0), (4, 8), (9, 3), (13, 13)]);
        assert_eq!(b.count(), 4);
        b.remove(&Coord::new(4, 8));
        assert_eq!(b.iter().collect::<Vec<_>>(), vec![Coord::new(0, 0), Coord::new(9, 3), Coord::new(13, 13)]);
    }
}
