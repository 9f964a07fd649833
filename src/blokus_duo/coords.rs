use crate::blokus_duo::prelude::*;

/// Simple board coordinate; realistically bounded to 14x14.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl std::str::FromStr for Coord {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some((row, col)) = s.split_once(',') else {
            return Err(anyhow!("expected a row,col pair for Coord; received {s}"));
        };
        let [row, col] = [row, col].map(|x| x.trim().parse::<usize>());
        let coord = Coord { row: row?, col: col? };
        if !coord.in_bounds() {
            return Err(anyhow!("coordinate {s} is off the board"));
        }
        Ok(coord)
    }
}

impl Coord {
    /// Recovers a coordinate from its linear offset in the grid.
    pub fn from_index(index: usize) -> Coord {
        Coord { row: index / BOARD_SIZE, col: index % BOARD_SIZE }
    }

    /// Determines whether or not the coord is in bounds.
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// The linear offset of the coord in the grid, row-major.
    pub fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Constructs a new coord.
    pub fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// The canonical notation of the coord.
    pub fn notate(&self) -> String {
        format!("{},{}", self.row, self.col)
    }
}

// Simple offset pair that can be used to calculate neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetCoord {
    pub rows: isize,
    pub cols: isize,
}

/// Offsets that turn a coordinate into one of its orthogonal neighbours.
pub static ORTHOGONAL_OFFSETS: [OffsetCoord; 4] = [
    OffsetCoord { rows: -1, cols: 0 },
    OffsetCoord { rows: 0, cols: -1 },
    OffsetCoord { rows: 0, cols: 1 },
    OffsetCoord { rows: 1, cols: 0 },
];

/// Offsets that turn a coordinate into one of its diagonal neighbours.
pub static DIAGONAL_OFFSETS: [OffsetCoord; 4] = [
    OffsetCoord { rows: -1, cols: -1 },
    OffsetCoord { rows: -1, cols: 1 },
    OffsetCoord { rows: 1, cols: -1 },
    OffsetCoord { rows: 1, cols: 1 },
];

impl OffsetCoord {
    /// Converts the offset into a coordinate if it lies on the board.
    pub fn checked(&self) -> Option<Coord> {
        if self.in_bounds_signed() {
            Some(self.coerce())
        } else {
            None
        }
    }

    /// Coerces the offset into a coordinate unchecked.
    pub fn coerce(&self) -> Coord {
        Coord {
            row: self.rows as usize,
            col: self.cols as usize,
        }
    }

    /// Determines whether or not the coord is in bounds.
    pub fn in_bounds_signed(&self) -> bool {
        0 <= self.rows && self.rows < BOARD_SIZE as isize && 0 <= self.cols && self.cols < BOARD_SIZE as isize
    }

    /// Constructs a new offset coord.
    pub fn new(rows: isize, cols: isize) -> OffsetCoord {
        OffsetCoord { rows, cols }
    }
}

// C -> OC

impl From<Coord> for OffsetCoord {
    fn from(value: Coord) -> Self {
        OffsetCoord {
            rows: value.row as isize,
            cols: value.col as isize,
        }
    }
}

impl From<&Coord> for OffsetCoord {
    fn from(value: &Coord) -> Self {
        OffsetCoord {
            rows: value.row as isize,
            cols: value.col as isize,
        }
    }
}

// OC + OC

impl Add<&OffsetCoord> for &OffsetCoord {
    type Output = OffsetCoord;
    fn add(self, rhs: &OffsetCoord) -> Self::Output {
        OffsetCoord {
            rows: self.rows + rhs.rows,
            cols: self.cols + rhs.cols,
        }
    }
}

impl Add<OffsetCoord> for OffsetCoord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        &self + &rhs
    }
}

// C + OC

impl Add<&OffsetCoord> for &Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: &OffsetCoord) -> Self::Output {
        &OffsetCoord::from(self) + rhs
    }
}

impl Add<&OffsetCoord> for Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: &OffsetCoord) -> Self::Output {
        &self + rhs
    }
}

impl Add<OffsetCoord> for Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        &self + &rhs
    }
}

// OC - OC

impl Sub<&OffsetCoord> for &OffsetCoord {
    type Output = OffsetCoord;
    fn sub(self, rhs: &OffsetCoord) -> Self::Output {
        OffsetCoord {
            rows: self.rows - rhs.rows,
            cols: self.cols - rhs.cols,
        }
    }
}

impl Sub<OffsetCoord> for OffsetCoord {
    type Output = OffsetCoord;
    fn sub(self, rhs: OffsetCoord) -> Self::Output {
        &self - &rhs
    }
}

// C - OC

impl Sub<&OffsetCoord> for Coord {
    type Output = OffsetCoord;
    fn sub(self, rhs: &OffsetCoord) -> Self::Output {
        &OffsetCoord::from(self) - rhs
    }
}
