use crate::blokus_duo::prelude::*;

/// The four quarter-turn rotations of a polyomino. Reflections are not part of Blokus Duo here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rotation {
    Identity,
    Rot90,
    Rot180,
    Rot270,
}

impl Rotation {
    /// Gets all rotations in canonical order.
    pub fn all() -> [Rotation; 4] {
        [
            Rotation::Identity,
            Rotation::Rot90,
            Rotation::Rot180,
            Rotation::Rot270,
        ]
    }

    /// Applies the rotation to an offset point; a quarter turn maps (r, c) to (c, -r).
    pub fn apply_one(&self, offset: &OffsetCoord) -> OffsetCoord {
        let OffsetCoord { rows: r, cols: c } = *offset;
        match self {
            Rotation::Identity => OffsetCoord::new(r, c),
            Rotation::Rot90    => OffsetCoord::new(c, -r),
            Rotation::Rot180   => OffsetCoord::new(-r, -c),
            Rotation::Rot270   => OffsetCoord::new(-c, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_quarter_turns_are_the_identity() {
        let p = OffsetCoord::new(2, -1);
        let turned = (0..4).fold(p, |acc, _| Rotation::Rot90.apply_one(&acc));
        assert_eq!(turned, p);
    }

    #[test]
    fn half_turn_is_two_quarter_turns() {
        let p = OffsetCoord::new(3, 1);
        let stepwise = Rotation::Rot90.apply_one(&Rotation::Rot90.apply_one(&p));
        assert_eq!(Rotation::Rot180.apply_one(&p), stepwise);
    }
}
