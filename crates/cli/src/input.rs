//! Loading problems from flags and files.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::{fs, io};

use derive_more::{Display, From};
use normkit_core::relation::format_problem;
use normkit_core::{AnalysisOptions, Problem, Report};
use normkit_parser::{parse_dependencies, parse_problem, parse_relation, ParseError};

use crate::AnalyzeArgs;

#[derive(Debug, Display, From)]
pub enum CliError {
    #[display("{_0}")]
    Io(io::Error),
    #[display("{_0}")]
    Parse(ParseError),
    #[display("{_0}")]
    Json(serde_json::Error),
    #[display("{_0}")]
    Analysis(normkit_core::Error),
    #[from(skip)]
    #[display("{}: expected a .fds or .json file", _0.display())]
    UnsupportedExtension(PathBuf),
    #[from(skip)]
    #[display("no input: pass --relation or --input")]
    MissingInput,
}

impl std::error::Error for CliError {}

/// Build the problem described by the `analyze` flags.
///
/// # Errors
///
/// Returns a [`CliError`] when the file cannot be read or the text does not
/// parse.
pub fn load_problem(args: &AnalyzeArgs) -> Result<Problem<String>, CliError> {
    match (&args.input, &args.relation) {
        (Some(path), _) => read_problem_file(path),
        (None, Some(relation)) => {
            let relation = parse_relation(relation)?;
            let dependencies = parse_dependencies(args.dependencies.as_deref().unwrap_or(""))?;
            Ok(Problem::new(relation, dependencies))
        }
        (None, None) => Err(CliError::MissingInput),
    }
}

/// Load the problem described by the `analyze` flags and analyze it.
///
/// # Errors
///
/// Returns the [`CliError`] of [`load_problem`], or [`CliError::Analysis`]
/// for a dependency with an empty side or too many attributes.
pub fn analyze_input(args: &AnalyzeArgs) -> Result<Report<String>, CliError> {
    let problem = load_problem(args)?;
    let options = AnalysisOptions::default().with_warn_threshold(args.warn_threshold);
    Ok(normkit_core::analyze_problem(&problem, args.target.into(), &options)?)
}

/// Read a `.fds` text file or a `.json` problem.
///
/// # Errors
///
/// Fails on I/O errors, on malformed content, and on any other extension.
pub fn read_problem_file(path: &Path) -> Result<Problem<String>, CliError> {
    let text = fs::read_to_string(path)?;
    match path.extension().and_then(OsStr::to_str) {
        Some("fds") => Ok(parse_problem(&text)?),
        Some("json") => problem_from_json(&text),
        _ => Err(CliError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Decode either a bare `Problem` or a generated instance, whose problem sits
/// under `data`.
///
/// # Errors
///
/// Returns [`CliError::Json`] when neither shape matches.
pub fn problem_from_json(text: &str) -> Result<Problem<String>, CliError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let problem = match value.get("data") {
        Some(data) => serde_json::from_value(data.clone())?,
        None => serde_json::from_value(value)?,
    };
    Ok(problem)
}

/// Canonical text for a `.fds` source.
///
/// Comments are not preserved.
///
/// # Errors
///
/// Returns the [`ParseError`] of a malformed source.
pub fn format_source(text: &str) -> Result<String, ParseError> {
    parse_problem(text).map(|problem| format_problem(&problem))
}

/// Expand directories into the `.fds` files they contain, sorted by path.
///
/// # Errors
///
/// Returns the I/O error of an unreadable directory.
pub fn collect_fds_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "fds"))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use clap::Parser;

    use normkit_core::FunctionalDependency;

    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_problem_from_bare_json() {
        let text = r#"{
            "relation": ["A", "B"],
            "dependencies": [{"lhs": ["A"], "rhs": ["B"]}]
        }"#;
        let problem = problem_from_json(text).expect("should decode");
        assert_eq!(problem.relation, set(&["A", "B"]));
        assert_eq!(
            problem.dependencies,
            vec![FunctionalDependency {
                lhs: set(&["A"]),
                rhs: set(&["B"]),
            }]
        );
    }

    #[test]
    fn test_problem_from_generated_instance() {
        let instances = normkit_testgen::generator::generate_mult_problems(1, 4, 3, 2, 1);
        let text = serde_json::to_string(&instances[0]).expect("should encode");
        let problem = problem_from_json(&text).expect("should decode");
        assert_eq!(&problem, instances[0].get_data());
    }

    #[test]
    fn test_problem_from_json_rejects_garbage() {
        assert!(matches!(
            problem_from_json(r#"{"relation": 3}"#),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn test_format_source_canonicalizes() {
        let formatted = format_source("// comment\nB ,A\n-----\nBA->C; C -> A\n").expect("should parse");
        assert_eq!(formatted, "A, B\n---\nAB -> C\nC -> A\n");
        assert_eq!(format_source(&formatted).expect("should parse"), formatted);
    }

    #[test]
    fn test_format_source_reports_errors() {
        let err = format_source("A, B\nA -> B\n").expect_err("missing separator");
        assert_eq!(err.line, 2);
    }

    fn analyze_args(argv: &[&str]) -> AnalyzeArgs {
        let app = crate::App::try_parse_from(argv).expect("valid flags");
        match app.command {
            crate::Command::Analyze(args) => args,
            command => panic!("expected analyze, got {command:?}"),
        }
    }

    #[test]
    fn test_analyze_input_from_flags() {
        let args = analyze_args(&[
            "normkit",
            "analyze",
            "--relation",
            "A, B, C",
            "--dependencies",
            "B -> C",
            "--target",
            "bcnf",
        ]);
        let report = analyze_input(&args).expect("should analyze");
        assert_eq!(report.candidate_keys, vec![set(&["A", "B"])]);
        let decomposition = report.decomposition.expect("BCNF decomposition");
        assert_eq!(decomposition.fragments, vec![set(&["B", "C"]), set(&["A"])]);
    }

    #[test]
    fn test_analyze_input_rejects_empty_side() {
        let dir = std::env::temp_dir().join(format!("normkit-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("empty_side.json");
        fs::write(
            &path,
            r#"{"relation": ["A"], "dependencies": [{"lhs": [], "rhs": ["A"]}]}"#,
        )
        .expect("write problem");

        let path_arg = path.to_string_lossy().into_owned();
        let args = analyze_args(&["normkit", "analyze", "--input", &path_arg]);
        let err = analyze_input(&args).expect_err("empty left-hand side");
        assert!(
            matches!(err, CliError::Analysis(normkit_core::Error::EmptyLhs { index: 0 })),
            "{err}"
        );
        fs::remove_file(&path).expect("remove problem");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_problem_file(Path::new("Cargo.toml")).expect_err("not a problem file");
        assert!(matches!(err, CliError::UnsupportedExtension(_)));
    }
}
