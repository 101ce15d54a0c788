use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign, Sub};

/// A set of interned attributes, one bit per attribute position.
///
/// Positions are assigned by [`Relation`](super::Relation): schema attributes
/// occupy `0..schema_len` in sorted order, attributes that only appear in
/// dependencies follow. Subset tests and unions are single word operations.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrSet(pub u64);

impl AttrSet {
    /// Number of distinct positions an [`AttrSet`] can hold.
    pub const CAPACITY: usize = u64::BITS as usize;

    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// The set containing only `position`.
    ///
    /// `position` must be below [`AttrSet::CAPACITY`].
    #[must_use]
    pub const fn singleton(position: u32) -> Self {
        Self(1 << position)
    }

    /// The set of the first `len` positions.
    #[must_use]
    pub const fn full(len: u32) -> Self {
        if len >= u64::BITS {
            Self(u64::MAX)
        } else {
            Self((1 << len) - 1)
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of attributes in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn contains(self, position: u32) -> bool {
        position < u64::BITS && self.0 & (1 << position) != 0
    }

    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0
    }

    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        other.is_subset(self)
    }

    /// Subset that is not equal to `other`.
    #[must_use]
    pub const fn is_proper_subset(self, other: Self) -> bool {
        self.is_subset(other) && self.0 != other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn insert(&mut self, position: u32) {
        self.0 |= 1 << position;
    }

    /// Iterate over the positions in the set, lowest first.
    pub fn positions(self) -> impl Iterator<Item = u32> {
        let mut bits = self.0;
        core::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let position = bits.trailing_zeros();
            bits &= bits - 1;
            Some(position)
        })
    }
}

impl BitOr for AttrSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for AttrSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for AttrSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl Sub for AttrSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.difference(rhs)
    }
}

impl FromIterator<u32> for AttrSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for position in iter {
            set.insert(position);
        }
        set
    }
}

impl fmt::Debug for AttrSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.positions()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn test_full_and_len() {
        assert_eq!(AttrSet::full(0), AttrSet::EMPTY);
        assert_eq!(AttrSet::full(3).0, 0b111);
        assert_eq!(AttrSet::full(64).0, u64::MAX);
        assert_eq!(AttrSet::full(64).len(), 64);
    }

    #[test]
    fn test_subset_relations() {
        let ab: AttrSet = [0, 1].into_iter().collect();
        let abc: AttrSet = [0, 1, 2].into_iter().collect();

        assert!(ab.is_subset(abc));
        assert!(ab.is_proper_subset(abc));
        assert!(!abc.is_proper_subset(abc));
        assert!(abc.is_superset(ab));
        assert!(AttrSet::EMPTY.is_subset(ab));
    }

    #[test]
    fn test_set_operations() {
        let ab: AttrSet = [0, 1].into_iter().collect();
        let bc: AttrSet = [1, 2].into_iter().collect();

        assert_eq!((ab | bc).0, 0b111);
        assert_eq!((ab & bc).0, 0b010);
        assert_eq!((ab - bc).0, 0b001);
    }

    #[test]
    fn test_positions_in_order() {
        let set: AttrSet = [5, 0, 63].into_iter().collect();
        let positions: Vec<u32> = set.positions().collect();
        assert_eq!(positions, [0, 5, 63]);
        assert!(set.contains(63));
        assert!(!set.contains(64));
    }
}
