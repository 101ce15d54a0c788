//! Normal-form analysis for relation schemas under functional dependencies.
//!
//! `normkit_core` takes a relation schema and a list of functional dependencies
//! (FDs) and answers three questions:
//!
//! 1. **Which attribute sets are candidate keys?** Every minimal superkey is
//!    found by enumerating subsets of the schema by increasing size and
//!    testing their closure.
//! 2. **Which normal forms does the relation satisfy?** Rules are evaluated in
//!    order 1NF, 2NF, 3NF, BCNF. Each level reports the dependencies that break
//!    it.
//! 3. **How should it be split?** When the level chosen as the decomposition
//!    target is violated, the violating dependencies are turned into fragments
//!    in a single pass and evaluation stops.
//!
//! The normal-form rules are the simplified predicates below, not the full
//! textbook definitions:
//!
//! - **2NF**: `L -> R` breaks 2NF if `L` is a proper subset of some candidate
//!   key `K` and `R` is not contained in `K`.
//! - **3NF**: `L -> R` breaks 3NF if `R` is not contained in any candidate key.
//! - **BCNF**: `L -> R` breaks BCNF if `L` contains no candidate key.
//!
//! # Entry point
//!
//! [`analyze_problem()`] compiles a [`Problem`] into a [`Relation`] and runs the
//! whole pipeline, returning a [`Report`] or an [`Error`] for malformed input.
//!
//! ```rust,ignore
//! use normkit_core::{analyze_problem, AnalysisOptions, DecompositionTarget, Problem};
//!
//! let report = analyze_problem(&problem, DecompositionTarget::BoyceCodd, &AnalysisOptions::default())?;
//! for result in &report.level_results {
//!     println!("{}: {}", result.level, result.satisfied);
//! }
//! ```
//!
//! # Cost
//!
//! Candidate-key enumeration is exponential in the number of schema attributes.
//! Schemas much larger than twenty attributes are impractical; the analysis
//! emits [`Warning::OversizedSchema`] past a configurable threshold but never
//! aborts on its own.
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` derives on the data model
//!   and report types.
//! - **`schemars`** -- derives `JsonSchema` for [`Problem`] and
//!   [`FunctionalDependency`].
//!
//! This crate is `no_std` compatible (requires `alloc`). The text notation
//! parser lives in the separate `normkit_parser` crate.

#![cfg_attr(not(any(test, feature = "schemars")), no_std)]
extern crate alloc;

pub mod analysis;
pub mod relation;

pub use analysis::error::{Error, Warning};
pub use analysis::report::{Decomposition, LevelResult, Report};
pub use analysis::{analyze, analyze_problem, AnalysisOptions, DecompositionTarget, NormalForm};
pub use relation::{FunctionalDependency, Problem, Relation};
