use crate::blokus_duo::prelude::*;

type SubSet = u16;
const SUBSET_SIZE: usize = BOARD_SIZE;
const NUM_SUBSETS: usize = BOARD_SIZE;

const EXTENT_MASK: SubSet = (1 << SUBSET_SIZE) - 1;

/// A set of board cells, one row per subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordSet([SubSet; NUM_SUBSETS]);

impl CoordSet {
    #[inline]
    fn _index(coord: &Coord) -> (usize, usize) {
        (coord.row, coord.col)
    }

    /// The set of every cell on the board.
    pub fn full() -> CoordSet {
        CoordSet([EXTENT_MASK; NUM_SUBSETS])
    }
}

impl Default for CoordSet {
    fn default() -> Self {
        CoordSet([SubSet::default(); NUM_SUBSETS])
    }
}

impl SetOps<Coord> for CoordSet {
    fn contains(&self, value: &Coord) -> bool {
        let (ia, ib) = CoordSet::_index(value);
        ia < NUM_SUBSETS && ib < SUBSET_SIZE && (self.0[ia] >> ib) & 1 == 1
    }

    fn len(&self) -> usize {
        self.0.iter().map(|sub| sub.count_ones() as usize).sum()
    }

    fn iter(&self) -> impl Iterator<Item = Coord> {
        CoordSetIterator::new(&self.0)
    }

    fn insert(&mut self, value: &Coord) -> &mut Self {
        let (ia, ib) = CoordSet::_index(value);
        self.0[ia] |= (1 as SubSet) << ib;
        self
    }

    fn remove(&mut self, value: &Coord) -> &mut Self {
        let (ia, ib) = CoordSet::_index(value);
        self.0[ia] &= !((1 as SubSet) << ib);
        self
    }

    fn difference(&self, other: &Self) -> Self {
        let mut s = *self;
        s.difference_inplace(other);
        s
    }

    fn difference_inplace(&mut self, other: &Self) -> &mut Self {
        self.0.iter_mut().zip(other.0.iter()).for_each(|(l, r)| {
            *l &= !r;
        });
        self
    }
}

impl<'a> FromIterator<&'a Coord> for CoordSet {
    fn from_iter<T: IntoIterator<Item = &'a Coord>>(iter: T) -> Self {
        let mut s = CoordSet::default();
        iter.into_iter().for_each(|i| {
            s.insert(i);
        });
        s
    }
}

impl FromIterator<Coord> for CoordSet {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        let mut s = CoordSet::default();
        iter.into_iter().for_each(|i| {
            s.insert(&i);
        });
        s
    }
}

pub struct CoordSetIterator<'a> {
    data: &'a [SubSet; NUM_SUBSETS],
    mask: SubSet,
    current_subset: usize,
}

impl<'a> CoordSetIterator<'a> {
    pub fn new(data: &'a [SubSet; NUM_SUBSETS]) -> CoordSetIterator<'a> {
        CoordSetIterator { data, mask: SubSet::MAX, current_subset: 0 }
    }
}

impl Iterator for CoordSetIterator<'_> {
    type Item = Coord;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_subset >= NUM_SUBSETS {
                return None;
            }

            let subject = self.data[self.current_subset] & self.mask;
            let tz = subject.trailing_zeros() as usize;

            if tz >= SUBSET_SIZE {
                self.current_subset += 1;
                self.mask = SubSet::MAX;
                continue;
            } else {
                let value = Coord::new(self.current_subset, tz);
                self.mask ^= (1 as SubSet) << tz;
                return Some(value);
            }
        }
    }
}

impl<'a> IntoIterator for &'a CoordSet {
    type IntoIter = CoordSetIterator<'a>;
    type Item = Coord;
    fn into_iter(self) -> Self::IntoIter {
        CoordSetIterator::new(&self.0)
    }
}
