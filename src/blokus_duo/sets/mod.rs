mod coordset;

pub use coordset::CoordSet;

pub trait SetOps<T: Clone + Copy + std::fmt::Debug> {
    fn contains(&self, value: &T) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> impl Iterator<Item = T>;

    fn insert(&mut self, value: &T) -> &mut Self;
    fn remove(&mut self, value: &T) -> &mut Self;

    fn difference(&self, other: &Self) -> Self;
    fn difference_inplace(&mut self, other: &Self) -> &mut Self;
}
