//! Enumeration of candidate keys (minimal superkeys).
//!
//! Subsets of the schema are visited by increasing cardinality. Within one
//! cardinality the masks come out in increasing numeric order (Gosper's
//! hack). A subset containing an already accepted key is skipped without
//! computing its closure: it is a superkey, but not a minimal one. Since
//! every smaller subset has been visited before, any superkey that survives
//! the skip test is minimal, and the accepted keys form an antichain.
//!
//! The search visits `O(2^n)` subsets for `n` schema attributes. Schemas much
//! beyond twenty attributes are impractical.

use alloc::vec::Vec;

use super::closure::closure;
use crate::relation::{AttrSet, Dependency};

/// Iterator over all subsets of the first `universe` positions that have
/// exactly `size` elements, in increasing numeric order.
#[derive(Debug, Clone)]
pub struct SubsetsOfSize {
    universe: u32,
    next: Option<u64>,
}

impl SubsetsOfSize {
    #[must_use]
    pub const fn new(universe: u32, size: u32) -> Self {
        let next = if size >= 1 && size <= universe && universe <= u64::BITS {
            Some(AttrSet::full(size).0)
        } else {
            None
        };
        Self { universe, next }
    }

    /// Next integer with the same population count, or `None` on overflow.
    fn successor(bits: u64) -> Option<u64> {
        let lowest = bits & bits.wrapping_neg();
        let ripple = bits.checked_add(lowest)?;
        Some((((ripple ^ bits) >> 2) / lowest) | ripple)
    }

    const fn fits(&self, bits: u64) -> bool {
        self.universe >= u64::BITS || bits >> self.universe == 0
    }
}

impl Iterator for SubsetsOfSize {
    type Item = AttrSet;

    fn next(&mut self) -> Option<AttrSet> {
        let current = self.next?;
        self.next = Self::successor(current).filter(|&bits| self.fits(bits));
        Some(AttrSet(current))
    }
}

/// Returns every minimal superkey of `schema` under `dependencies`.
///
/// `schema` must be the mask of the first `schema.len()` positions, which is
/// how [`Relation`](crate::relation::Relation) interns attributes. A subset is
/// a superkey only if its closure equals `schema` exactly, so dependencies
/// that derive attributes outside the schema leave the relation without
/// keys.
///
/// Keys are returned smallest first. An empty dependency list yields the
/// whole schema as the only key; an empty schema yields no keys.
#[must_use]
pub fn find_candidate_keys(schema: AttrSet, dependencies: &[Dependency]) -> Vec<AttrSet> {
    #[allow(clippy::cast_possible_truncation)]
    let universe = schema.len() as u32;
    debug_assert_eq!(schema, AttrSet::full(universe));

    let mut keys: Vec<AttrSet> = Vec::new();
    let mut visited: u64 = 0;

    for size in 1..=universe {
        for subset in SubsetsOfSize::new(universe, size) {
            if keys.iter().any(|key| key.is_subset(subset)) {
                continue;
            }
            visited += 1;
            if closure(subset, dependencies) == schema {
                tracing::trace!(key = ?subset, "accepted candidate key");
                keys.push(subset);
            }
        }
    }

    tracing::debug!(
        schema = universe,
        keys = keys.len(),
        closures = visited,
        "candidate key search finished"
    );

    keys
}
