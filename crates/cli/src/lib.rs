//! normkit CLI -- analyze, generate and format relation schemas.

pub mod input;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use normkit_core::analysis::DEFAULT_WARN_THRESHOLD;
use normkit_core::DecompositionTarget;

#[derive(Debug, Parser)]
#[command(
    name = "normkit",
    about = "Candidate keys, normal forms and decomposition from functional dependencies"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find candidate keys, check normal forms and decompose a relation
    Analyze(AnalyzeArgs),
    /// Generate random problem instances
    Generate(GenerateArgs),
    /// Format problem (.fds) files
    Fmt(FmtArgs),
    /// Print the JSON Schema for the problem input format to stdout
    Schema,
}

#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Relation attributes, comma separated (e.g. "A, B, C")
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    pub relation: Option<String>,
    /// Functional dependencies (e.g. "A->B, BC->D")
    #[arg(long, conflicts_with = "input")]
    pub dependencies: Option<String>,
    /// Problem file: `.fds` text or `.json` (problem or generated instance)
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Normal form to decompose into when it is violated
    #[arg(long, value_enum, default_value_t = TargetLevel::Second)]
    pub target: TargetLevel,
    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
    /// Colorize the text report
    #[arg(long)]
    pub color: bool,
    /// Warn when the schema has more attributes than this
    #[arg(long, default_value_t = DEFAULT_WARN_THRESHOLD)]
    pub warn_threshold: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetLevel {
    #[value(name = "2nf")]
    Second,
    #[value(name = "3nf")]
    Third,
    #[value(name = "bcnf")]
    BoyceCodd,
}

impl From<TargetLevel> for DecompositionTarget {
    fn from(level: TargetLevel) -> Self {
        match level {
            TargetLevel::Second => Self::Second,
            TargetLevel::Third => Self::Third,
            TargetLevel::BoyceCodd => Self::BoyceCodd,
        }
    }
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of problems to generate
    #[arg(long)]
    pub n_problem: u64,
    /// Number of attributes in each relation
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub n_attribute: u64,
    /// Number of functional dependencies per problem
    #[arg(long)]
    pub n_dependency: u64,
    /// Largest left-hand side
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_lhs: u64,
    /// Largest right-hand side
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_rhs: u64,
    /// Output directory for generated problem files
    #[arg(long)]
    pub output_dir: PathBuf,
}

#[derive(Debug, Parser)]
pub struct FmtArgs {
    /// Input files or directories to format (directories are searched for .fds files)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Check formatting without modifying files (exit 1 if unformatted)
    #[arg(long)]
    pub check: bool,
}
