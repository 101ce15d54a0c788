use derive_more::Display;

/// Error returned when an analysis request is malformed.
///
/// Any error aborts the whole request; no partial report is produced.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Error {
    /// The dependency at `index` has an empty left-hand side.
    #[display("dependency #{index} has an empty left-hand side")]
    EmptyLhs { index: usize },
    /// The dependency at `index` has an empty right-hand side.
    #[display("dependency #{index} has an empty right-hand side")]
    EmptyRhs { index: usize },
    /// More distinct attributes than an attribute mask can hold.
    #[display("{count} distinct attributes, at most {max} are supported")]
    TooManyAttributes { count: usize, max: usize },
}

impl core::error::Error for Error {}

/// Advisory raised during analysis. The analysis still completes.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Warning {
    /// The candidate key search is exponential in the schema size.
    #[display(
        "schema has {attributes} attributes (threshold {threshold}); candidate key search visits up to 2^{attributes} subsets"
    )]
    OversizedSchema { attributes: usize, threshold: usize },
}
