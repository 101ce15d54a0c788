//! Attribute closure under a list of functional dependencies.

use crate::relation::{AttrSet, Dependency};

/// Computes the closure of `attrs` under `dependencies`.
///
/// Each round scans every dependency and collects the right-hand sides of
/// those whose left-hand side is already contained in the result. The loop
/// stops at the first round that adds nothing new. Every other round grows
/// the result by at least one attribute, so there are at most
/// `|attributes| + 1` rounds.
///
/// The result always contains `attrs`, and with no dependencies it is `attrs`
/// itself.
#[must_use]
pub fn closure(attrs: AttrSet, dependencies: &[Dependency]) -> AttrSet {
    let mut result = attrs;
    loop {
        let added = dependencies
            .iter()
            .filter(|dependency| dependency.lhs.is_subset(result))
            .fold(AttrSet::EMPTY, |acc, dependency| acc | dependency.rhs);

        if added.is_subset(result) {
            return result;
        }
        result |= added;
    }
}
