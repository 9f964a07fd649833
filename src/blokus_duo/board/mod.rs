pub(crate) mod bitboard;
pub(crate) mod pretty;

use super::prelude::*;

pub use bitboard::Bitboard;

/// The 14x14 grid, stored as one occupancy bitboard per player.
///
/// A cell is empty when neither bitboard holds it. The two boards are disjoint, and cells are only ever
/// added, so copying a board is a copy of 64 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    occupancy: [Bitboard; 2],
}

impl Board {
    /// Returns a new, empty board.
    pub fn new() -> Board {
        Board::default()
    }

    /// Determines the owner of the cell at a given coordinate, if any.
    pub fn cell(&self, coord: &Coord) -> Result<Option<Player>> {
        if coord.in_bounds() {
            Ok(self.cell_unchecked(coord))
        } else {
            Err(anyhow!(
                "invalid coordinate ({:02}, {:02})",
                coord.row,
                coord.col
            ))
        }
    }

    /// Unchecked owner lookup; off-board coordinates read as empty.
    pub fn cell_unchecked(&self, coord: &Coord) -> Option<Player> {
        Player::all().into_iter().find(|p| self.occupancy[p.index()].contains(coord))
    }

    /// Marks every given cell as owned by the player; engine use only.
    pub(crate) fn fill(&mut self, player: Player, coords: impl Iterator<Item = Coord>) -> &mut Self {
        let owned = &mut self.occupancy[player.index()];
        coords.for_each(|c| {
            owned.insert(&c);
        });
        self
    }

    pub fn is_empty(&self, coord: &Coord) -> bool {
        !self.occupied().contains(coord)
    }

    /// The cells owned by either player.
    pub fn occupied(&self) -> Bitboard {
        self.occupancy[0] | self.occupancy[1]
    }

    /// The number of cells owned by either player.
    pub fn occupied_count(&self) -> usize {
        self.occupancy.iter().map(|b| b.count()).sum()
    }

    /// The cells owned by one player.
    pub fn owned(&self, player: Player) -> Bitboard {
        self.occupancy[player.index()]
    }

    /// Sets the owner of the cell at a given coordinate on the board.
    pub fn set_cell(&mut self, coord: &Coord, cell: Option<Player>) -> Result<&mut Self> {
        if !coord.in_bounds() {
            return Err(anyhow!("invalid coordinate ({:02}, {:02})", coord.row, coord.col));
        }
        self.occupancy.iter_mut().for_each(|b| {
            b.remove(coord);
        });
        if let Some(player) = cell {
            self.occupancy[player.index()].insert(coord);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_claims_cells_for_one_player() {
        let mut board = Board::new();
        board.fill(Player::Two, [Coord::new(13, 13), Coord::new(12, 13)].into_iter());
        assert_eq!(board.cell(&Coord::new(12, 13)).unwrap(), Some(Player::Two));
        assert_eq!(board.cell(&Coord::new(0, 0)).unwrap(), None);
        assert_eq!(board.occupied_count(), 2);
        assert!(board.owned(Player::One).is_empty());
        assert!(board.cell(&Coord::new(14, 0)).is_err());
    }

    #[test]
    fn set_cell_reassigns_ownership() {
        let mut board = Board::new();
        let c = Coord::new(4, 4);
        board.set_cell(&c, Some(Player::One)).unwrap();
        board.set_cell(&c, Some(Player::Two)).unwrap();
        assert_eq!(board.cell_unchecked(&c), Some(Player::Two));
        assert_eq!(board.occupied_count(), 1);
        board.set_cell(&c, None).unwrap();
        assert!(board.is_empty(&c));
    }
}
