use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use self::decomposition::decompose;
use self::error::{Error, Warning};
use self::normal_form::violations;
use self::report::{LevelResult, Report};
use crate::relation::{AttrSet, Problem, Relation};

pub mod candidate_keys;
pub mod closure;
pub mod decomposition;
pub mod error;
pub mod normal_form;
pub mod report;

/// Default schema size above which [`Warning::OversizedSchema`] is raised.
pub const DEFAULT_WARN_THRESHOLD: usize = 20;

/// Normal forms, ordered from weakest to strongest.
///
/// Levels are always evaluated in this order; a relation reported as
/// satisfying a level may still have been flagged at a weaker one, since
/// every level is judged by its own rule.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NormalForm {
    /// First normal form: attribute values are atomic. Assumed, never checked.
    First,
    /// Second normal form: no partial dependency on a candidate key.
    Second,
    /// Third normal form: every dependent set lies inside a candidate key.
    Third,
    /// Boyce-Codd normal form: every determinant is a superkey.
    BoyceCodd,
}

impl NormalForm {
    /// All levels in evaluation order.
    pub const ALL: [Self; 4] = [Self::First, Self::Second, Self::Third, Self::BoyceCodd];

    /// Conventional short name (`1NF`, `2NF`, `3NF`, `BCNF`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::First => "1NF",
            Self::Second => "2NF",
            Self::Third => "3NF",
            Self::BoyceCodd => "BCNF",
        }
    }
}

impl fmt::Display for NormalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Levels a decomposition can be requested for.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecompositionTarget {
    #[default]
    Second,
    Third,
    BoyceCodd,
}

impl From<DecompositionTarget> for NormalForm {
    fn from(target: DecompositionTarget) -> Self {
        match target {
            DecompositionTarget::Second => Self::Second,
            DecompositionTarget::Third => Self::Third,
            DecompositionTarget::BoyceCodd => Self::BoyceCodd,
        }
    }
}

impl fmt::Display for DecompositionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        NormalForm::from(*self).fmt(f)
    }
}

/// Tuning knobs for [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Schemas with more attributes than this raise
    /// [`Warning::OversizedSchema`] before the key search starts.
    pub warn_threshold: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            warn_threshold: DEFAULT_WARN_THRESHOLD,
        }
    }
}

impl AnalysisOptions {
    #[must_use]
    pub const fn with_warn_threshold(mut self, warn_threshold: usize) -> Self {
        self.warn_threshold = warn_threshold;
        self
    }
}

/// Run the full analysis on a compiled relation.
///
/// Candidate keys are computed first. Levels are then evaluated in order
/// 1NF, 2NF, 3NF, BCNF. A level whose violation list is empty is satisfied.
/// When the level equal to `target` is violated, the relation is decomposed
/// along the violating dependencies and no further level is evaluated.
/// Violations at any other level are only reported.
///
/// The key search costs `O(2^n)` closures for `n` schema attributes. Above
/// [`AnalysisOptions::warn_threshold`] a [`Warning::OversizedSchema`] is
/// logged and recorded in the report; the search still runs.
#[must_use]
pub fn analyze<A>(
    relation: &Relation<A>,
    target: DecompositionTarget,
    options: &AnalysisOptions,
) -> Report<A>
where
    A: Ord + Hash + Clone,
{
    let mut warnings = Vec::new();
    if relation.schema_len() > options.warn_threshold {
        let warning = Warning::OversizedSchema {
            attributes: relation.schema_len(),
            threshold: options.warn_threshold,
        };
        tracing::warn!(%warning, "oversized schema");
        warnings.push(warning);
    }

    let keys = candidate_keys::find_candidate_keys(relation.schema(), relation.dependencies());
    tracing::debug!(keys = keys.len(), "candidate keys computed");

    let mut report = evaluate(relation, &keys, target);
    report.warnings = warnings;
    report
}

/// Evaluate the normal-form levels against precomputed candidate keys.
///
/// `keys` are masks over the positions of `relation`, as returned by
/// [`candidate_keys::find_candidate_keys`].
#[must_use]
pub fn evaluate<A>(relation: &Relation<A>, keys: &[AttrSet], target: DecompositionTarget) -> Report<A>
where
    A: Ord + Hash + Clone,
{
    let target_level = NormalForm::from(target);
    let mut level_results = Vec::with_capacity(NormalForm::ALL.len());
    let mut decomposition = None;

    for level in NormalForm::ALL {
        let offending = violations(level, relation.dependencies(), keys);
        tracing::debug!(%level, violations = offending.len(), "checked level");

        level_results.push(LevelResult {
            level,
            satisfied: offending.is_empty(),
            violations: offending
                .iter()
                .map(|&index| relation.functional_dependencies()[index].clone())
                .collect(),
        });

        if level == target_level && !offending.is_empty() {
            decomposition = Some(decompose(target, relation, &offending));
            break;
        }
    }

    Report {
        candidate_keys: keys
            .iter()
            .map(|&key| relation.to_attributes(key))
            .collect(),
        level_results,
        decomposition,
        warnings: Vec::new(),
    }
}

/// Compile `problem` and run [`analyze`] on it.
///
/// # Errors
///
/// Returns an [`Error`] if a dependency has an empty side or the problem
/// mentions more distinct attributes than [`AttrSet::CAPACITY`].
pub fn analyze_problem<A>(
    problem: &Problem<A>,
    target: DecompositionTarget,
    options: &AnalysisOptions,
) -> Result<Report<A>, Error>
where
    A: Ord + Hash + Clone,
{
    tracing::debug!(
        attributes = problem.relation.len(),
        dependencies = problem.dependencies.len(),
        %target,
        "analyzing problem"
    );
    let relation = Relation::from_problem(problem)?;
    Ok(analyze(&relation, target, options))
}
