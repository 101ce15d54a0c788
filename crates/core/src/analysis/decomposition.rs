use alloc::vec::Vec;
use core::hash::Hash;

use super::report::Decomposition;
use super::DecompositionTarget;
use crate::relation::{AttrSet, Dependency, Relation};

/// Splits `schema` along the violating dependencies.
///
/// Every violation `L -> R` becomes a fragment `L ∪ R`, in order. Schema
/// attributes not covered by any of those fragments are collected into one
/// trailing fragment. This is a single pass: fragments are not checked again,
/// and neither lossless join nor dependency preservation is guaranteed.
#[must_use]
pub fn fragments(schema: AttrSet, violations: &[Dependency]) -> Vec<AttrSet> {
    let mut fragments: Vec<AttrSet> = violations
        .iter()
        .map(|dependency| dependency.attributes())
        .collect();

    let covered = fragments
        .iter()
        .fold(AttrSet::EMPTY, |acc, &fragment| acc | fragment);
    let leftover = schema - covered;
    if !leftover.is_empty() {
        fragments.push(leftover);
    }
    fragments
}

/// Decomposes `relation` for `level` using the dependencies at `violations`
/// (indices into [`Relation::dependencies`]).
#[must_use]
pub fn decompose<A>(
    level: DecompositionTarget,
    relation: &Relation<A>,
    violations: &[usize],
) -> Decomposition<A>
where
    A: Ord + Hash + Clone,
{
    let dependencies: Vec<Dependency> = violations
        .iter()
        .map(|&index| relation.dependencies()[index])
        .collect();
    let masks = fragments(relation.schema(), &dependencies);

    tracing::debug!(%level, fragments = masks.len(), "decomposed relation");

    Decomposition {
        level,
        fragments: masks
            .into_iter()
            .map(|fragment| relation.to_attributes(fragment))
            .collect(),
    }
}
