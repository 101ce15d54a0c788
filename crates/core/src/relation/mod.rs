//! Relation schemas, functional dependencies, and their compiled form.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::analysis::candidate_keys::find_candidate_keys;
use crate::analysis::closure::closure;
use crate::analysis::error::Error;

pub mod attr_set;
pub mod display;

pub use attr_set::AttrSet;
pub use display::{format_attributes, format_problem};

/// A functional dependency `lhs -> rhs`.
///
/// Both sides are expected to be non-empty. [`FunctionalDependency::new`]
/// enforces this; values built field by field (or deserialized) are checked
/// again when compiled into a [`Relation`].
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "A: ::serde::Deserialize<'de> + Ord"))
)]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionalDependency<A> {
    /// Determinant attributes.
    pub lhs: BTreeSet<A>,
    /// Dependent attributes.
    pub rhs: BTreeSet<A>,
}

impl<A: Ord> FunctionalDependency<A> {
    /// Build a dependency from its two sides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLhs`] or [`Error::EmptyRhs`] (with index `0`) if
    /// either side is empty.
    pub fn new<L, R>(lhs: L, rhs: R) -> Result<Self, Error>
    where
        L: IntoIterator<Item = A>,
        R: IntoIterator<Item = A>,
    {
        let dependency = Self {
            lhs: lhs.into_iter().collect(),
            rhs: rhs.into_iter().collect(),
        };
        dependency.validate(0)?;
        Ok(dependency)
    }

    fn validate(&self, index: usize) -> Result<(), Error> {
        if self.lhs.is_empty() {
            return Err(Error::EmptyLhs { index });
        }
        if self.rhs.is_empty() {
            return Err(Error::EmptyRhs { index });
        }
        Ok(())
    }
}

/// An analysis input: a relation schema and its dependencies.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "A: ::serde::Deserialize<'de> + Ord"))
)]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem<A> {
    /// Attributes of the relation schema.
    pub relation: BTreeSet<A>,
    /// Functional dependencies, in the order they should be reported.
    pub dependencies: Vec<FunctionalDependency<A>>,
}

impl<A> Problem<A> {
    #[must_use]
    pub const fn new(relation: BTreeSet<A>, dependencies: Vec<FunctionalDependency<A>>) -> Self {
        Self {
            relation,
            dependencies,
        }
    }
}

/// A functional dependency over interned attribute positions.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub lhs: AttrSet,
    pub rhs: AttrSet,
}

impl Dependency {
    #[must_use]
    pub const fn new(lhs: AttrSet, rhs: AttrSet) -> Self {
        Self { lhs, rhs }
    }

    /// `lhs ∪ rhs`
    #[must_use]
    pub const fn attributes(self) -> AttrSet {
        self.lhs.union(self.rhs)
    }
}

/// A schema and its dependencies compiled to bit masks.
///
/// Schema attributes are interned first, in sorted order, so the schema is
/// always the mask of the first `schema_len` positions. Attributes that only
/// appear in dependencies are interned after them; they take part in closures
/// but are never enumerated as key candidates.
#[derive(Debug, Clone)]
pub struct Relation<A> {
    attributes: Vec<A>,
    positions: HashMap<A, u32>,
    schema: AttrSet,
    dependencies: Vec<Dependency>,
    source: Vec<FunctionalDependency<A>>,
}

impl<A> Relation<A>
where
    A: Ord + Hash + Clone,
{
    /// Compile a schema and its dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLhs`] / [`Error::EmptyRhs`] for the first
    /// dependency with an empty side, and [`Error::TooManyAttributes`] when
    /// the schema and dependencies mention more than [`AttrSet::CAPACITY`]
    /// distinct attributes.
    pub fn new<S, D>(schema: S, dependencies: D) -> Result<Self, Error>
    where
        S: IntoIterator<Item = A>,
        D: IntoIterator<Item = FunctionalDependency<A>>,
    {
        let schema: BTreeSet<A> = schema.into_iter().collect();
        let source: Vec<FunctionalDependency<A>> = dependencies.into_iter().collect();

        for (index, dependency) in source.iter().enumerate() {
            dependency.validate(index)?;
        }

        let mut attributes: Vec<A> = schema.into_iter().collect();
        let schema_len = attributes.len();
        for dependency in &source {
            for attribute in dependency.lhs.iter().chain(&dependency.rhs) {
                if attributes[..schema_len].binary_search(attribute).is_err()
                    && !attributes[schema_len..].contains(attribute)
                {
                    attributes.push(attribute.clone());
                }
            }
        }

        if attributes.len() > AttrSet::CAPACITY {
            return Err(Error::TooManyAttributes {
                count: attributes.len(),
                max: AttrSet::CAPACITY,
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        let positions: HashMap<A, u32> = attributes
            .iter()
            .cloned()
            .zip(0..attributes.len() as u32)
            .collect();

        let mask = |side: &BTreeSet<A>| -> AttrSet {
            side.iter().map(|attribute| positions[attribute]).collect()
        };
        let dependencies = source
            .iter()
            .map(|dependency| Dependency::new(mask(&dependency.lhs), mask(&dependency.rhs)))
            .collect();

        #[allow(clippy::cast_possible_truncation)]
        let schema = AttrSet::full(schema_len as u32);

        tracing::debug!(
            schema = schema_len,
            foreign = attributes.len() - schema_len,
            dependencies = source.len(),
            "compiled relation"
        );

        Ok(Self {
            attributes,
            positions,
            schema,
            dependencies,
            source,
        })
    }

    /// Compile a [`Problem`].
    ///
    /// # Errors
    ///
    /// Same as [`Relation::new`].
    pub fn from_problem(problem: &Problem<A>) -> Result<Self, Error> {
        Self::new(
            problem.relation.iter().cloned(),
            problem.dependencies.iter().cloned(),
        )
    }

    /// Mask of the schema attributes.
    #[must_use]
    pub const fn schema(&self) -> AttrSet {
        self.schema
    }

    /// Number of schema attributes.
    #[must_use]
    pub const fn schema_len(&self) -> usize {
        self.schema.len()
    }

    /// The compiled dependencies, in input order.
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// The dependencies as given, in input order.
    #[must_use]
    pub fn functional_dependencies(&self) -> &[FunctionalDependency<A>] {
        &self.source
    }

    /// Every interned attribute, indexed by position.
    #[must_use]
    pub fn attributes(&self) -> &[A] {
        &self.attributes
    }

    /// Position of `attribute`, if it is known to this relation.
    #[must_use]
    pub fn position(&self, attribute: &A) -> Option<u32> {
        self.positions.get(attribute).copied()
    }

    /// Translate a mask back to attribute values.
    #[must_use]
    pub fn to_attributes(&self, set: AttrSet) -> BTreeSet<A> {
        set.positions()
            .map(|position| self.attributes[position as usize].clone())
            .collect()
    }

    /// Closure of `attrs` under the dependencies of this relation.
    ///
    /// Attributes this relation does not know are kept in the result; they
    /// cannot trigger any dependency.
    #[must_use]
    pub fn closure(&self, attrs: &BTreeSet<A>) -> BTreeSet<A> {
        let mut known = AttrSet::EMPTY;
        let mut unknown = Vec::new();
        for attribute in attrs {
            match self.position(attribute) {
                Some(position) => known.insert(position),
                None => unknown.push(attribute.clone()),
            }
        }
        let mut result = self.to_attributes(closure(known, &self.dependencies));
        result.extend(unknown);
        result
    }

    /// `true` if the closure of `attrs` is exactly the schema.
    #[must_use]
    pub fn is_superkey(&self, attrs: &BTreeSet<A>) -> bool {
        attrs.iter().all(|attribute| self.position(attribute).is_some())
            && self.closure(attrs) == self.to_attributes(self.schema)
    }

    /// Every minimal superkey, smallest first.
    ///
    /// This enumerates subsets of the schema and costs `O(2^n)` closures for
    /// `n` schema attributes in the worst case.
    #[must_use]
    pub fn candidate_keys(&self) -> Vec<BTreeSet<A>> {
        find_candidate_keys(self.schema, &self.dependencies)
            .into_iter()
            .map(|key| self.to_attributes(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::*;

    fn attrs(text: &str) -> BTreeSet<String> {
        text.chars().map(|c| c.to_string()).collect()
    }

    fn fd(lhs: &str, rhs: &str) -> FunctionalDependency<String> {
        FunctionalDependency::new(attrs(lhs), attrs(rhs)).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_sides() {
        assert!(matches!(
            FunctionalDependency::new(attrs(""), attrs("A")),
            Err(Error::EmptyLhs { index: 0 })
        ));
        assert!(matches!(
            FunctionalDependency::new(attrs("A"), attrs("")),
            Err(Error::EmptyRhs { index: 0 })
        ));
    }

    #[test]
    fn test_relation_reports_offending_index() {
        let broken = FunctionalDependency {
            lhs: BTreeSet::new(),
            rhs: attrs("C"),
        };
        let result = Relation::new(attrs("ABC"), vec![fd("A", "B"), broken]);
        assert!(
            matches!(result, Err(Error::EmptyLhs { index: 1 })),
            "result: {result:?}"
        );
    }

    #[test]
    fn test_schema_interned_first_in_sorted_order() {
        let relation = Relation::new(attrs("CAB"), vec![fd("A", "Z")]).unwrap();
        assert_eq!(relation.attributes(), ["A", "B", "C", "Z"]);
        assert_eq!(relation.schema(), AttrSet::full(3));
        assert_eq!(relation.position(&"Z".to_string()), Some(3));
        assert_eq!(relation.dependencies()[0].rhs, AttrSet::singleton(3));
    }

    #[test]
    fn test_too_many_attributes() {
        let schema = (0..65).map(|i| alloc::format!("a{i}"));
        let result = Relation::new(schema, Vec::new());
        assert!(matches!(
            result,
            Err(Error::TooManyAttributes { count: 65, max: 64 })
        ));
    }

    #[test]
    fn test_closure_keeps_unknown_attributes() {
        let relation = Relation::new(attrs("ABC"), vec![fd("A", "B"), fd("B", "C")]).unwrap();
        assert_eq!(relation.closure(&attrs("A")), attrs("ABC"));
        assert_eq!(relation.closure(&attrs("CQ")), attrs("CQ"));
    }

    #[test]
    fn test_is_superkey() {
        let relation = Relation::new(attrs("ABC"), vec![fd("A", "B"), fd("B", "C")]).unwrap();
        assert!(relation.is_superkey(&attrs("A")));
        assert!(relation.is_superkey(&attrs("AC")));
        assert!(!relation.is_superkey(&attrs("B")));
        assert!(!relation.is_superkey(&attrs("AQ")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_problem_json_shape() {
        let problem = Problem::new(attrs("AB"), vec![fd("A", "B")]);
        let value = serde_json::to_value(&problem).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "relation": ["A", "B"],
                "dependencies": [{"lhs": ["A"], "rhs": ["B"]}]
            })
        );
        let decoded: Problem<String> = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, problem);
    }
}
