use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use super::error::Warning;
use super::{DecompositionTarget, NormalForm};
use crate::relation::FunctionalDependency;

/// Outcome of evaluating one normal-form level.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "A: ::serde::Deserialize<'de> + Ord"))
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelResult<A> {
    pub level: NormalForm,
    /// `true` iff `violations` is empty.
    pub satisfied: bool,
    /// Offending dependencies, in input order.
    pub violations: Vec<FunctionalDependency<A>>,
}

/// Fragments produced for the decomposition target.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "A: ::serde::Deserialize<'de> + Ord"))
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition<A> {
    pub level: DecompositionTarget,
    pub fragments: Vec<BTreeSet<A>>,
}

/// Result of a complete analysis.
///
/// `level_results` always starts with 1NF and follows the fixed order 1NF,
/// 2NF, 3NF, BCNF. It ends early, at the target level, when that level was
/// violated and `decomposition` is set.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "A: ::serde::Deserialize<'de> + Ord"))
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<A> {
    /// Candidate keys, smallest first.
    pub candidate_keys: Vec<BTreeSet<A>>,
    pub level_results: Vec<LevelResult<A>>,
    pub decomposition: Option<Decomposition<A>>,
    pub warnings: Vec<Warning>,
}

impl<A> Report<A> {
    /// Result for `level`, if it was evaluated.
    #[must_use]
    pub fn level(&self, level: NormalForm) -> Option<&LevelResult<A>> {
        self.level_results.iter().find(|result| result.level == level)
    }

    /// Whether `level` holds, or `None` if evaluation stopped before it.
    #[must_use]
    pub fn is_satisfied(&self, level: NormalForm) -> Option<bool> {
        self.level(level).map(|result| result.satisfied)
    }

    /// Highest level reached without a violation, counting up from 1NF.
    #[must_use]
    pub fn highest_satisfied(&self) -> NormalForm {
        self.level_results
            .iter()
            .take_while(|result| result.satisfied)
            .last()
            .map_or(NormalForm::First, |result| result.level)
    }
}
