use itertools::Itertools;

use crate::blokus_duo::prelude::*;

impl Board {
    /// The compact setup string: 196 characters of '.', 'X' and 'O' in row-major order.
    pub fn notate(&self) -> String {
        (0..NUM_CELLS).map(|i| Player::repr(self.cell_unchecked(&Coord::from_index(i)))).join("")
    }

    /// Pretty-prints the board as rows of space-separated marks; this is also the replay log frame format.
    pub fn pretty(&self) -> String {
        (0..BOARD_SIZE).map(|row| {
            (0..BOARD_SIZE).map(|col| {
                Player::repr(self.cell_unchecked(&Coord::new(row, col)))
            }).join(" ")
        }).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_marks_each_owner() {
        let mut board = Board::new();
        board.set_cell(&Coord::new(0, 0), Some(Player::One)).unwrap();
        board.set_cell(&Coord::new(13, 13), Some(Player::Two)).unwrap();

        let s = board.notate();
        assert_eq!(s.len(), NUM_CELLS);
        assert!(s.starts_with("X."));
        assert!(s.ends_with(".O"));
    }

    #[test]
    fn pretty_rows_are_space_separated() {
        let mut board = Board::new();
        board.set_cell(&Coord::new(0, 1), Some(Player::Two)).unwrap();
        let pretty = board.pretty();
        let rows = pretty.lines().collect::<Vec<_>>();
        assert_eq!(rows.len(), BOARD_SIZE);
        assert!(rows[0].starts_with(". O ."));
        assert_eq!(rows[0].split(' ').count(), BOARD_SIZE);
    }
}
