//! Per-level violation rules.
//!
//! Each rule returns the indices of the offending dependencies in input
//! order. The rules are simpler than the textbook definitions;
//! see the crate documentation for the exact predicates.

use alloc::vec::Vec;

use super::NormalForm;
use crate::relation::{AttrSet, Dependency};

/// 2NF: `L` is a proper subset of some key `K` and `R` is not contained in
/// that `K`. The first key satisfying both conditions is enough.
#[must_use]
pub fn is_partial_dependency(dependency: Dependency, keys: &[AttrSet]) -> bool {
    keys.iter()
        .any(|&key| dependency.lhs.is_proper_subset(key) && !dependency.rhs.is_subset(key))
}

/// 3NF: no key contains all of `R`.
#[must_use]
pub fn has_non_prime_dependent(dependency: Dependency, keys: &[AttrSet]) -> bool {
    !keys.iter().any(|&key| dependency.rhs.is_subset(key))
}

/// BCNF: `L` contains no key, i.e. it is not a superkey.
#[must_use]
pub fn has_non_superkey_determinant(dependency: Dependency, keys: &[AttrSet]) -> bool {
    !keys.iter().any(|&key| dependency.lhs.is_superset(key))
}

/// Indices of the dependencies that break `level`.
///
/// 1NF is assumed for every relation and never has violations.
#[must_use]
pub fn violations(level: NormalForm, dependencies: &[Dependency], keys: &[AttrSet]) -> Vec<usize> {
    let rule: fn(Dependency, &[AttrSet]) -> bool = match level {
        NormalForm::First => return Vec::new(),
        NormalForm::Second => is_partial_dependency,
        NormalForm::Third => has_non_prime_dependent,
        NormalForm::BoyceCodd => has_non_superkey_determinant,
    };

    dependencies
        .iter()
        .enumerate()
        .filter(|&(_, &dependency)| rule(dependency, keys))
        .map(|(index, _)| index)
        .collect()
}
