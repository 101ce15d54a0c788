use std::{fs, process};

use clap::Parser;
use normkit_cli::input::{analyze_input, collect_fds_files, format_source};
use normkit_cli::render::render_report;
use normkit_cli::{App, Command};
use normkit_core::Problem;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = App::parse();
    match &app.command {
        Command::Analyze(args) => analyze(args),
        Command::Generate(args) => generate(args),
        Command::Fmt(args) => fmt(args),
        Command::Schema => schema(),
    }
}

fn analyze(args: &normkit_cli::AnalyzeArgs) {
    let report = analyze_input(args).unwrap_or_else(|e| {
        eprintln!("Failed to analyze problem: {e}");
        process::exit(1);
    });

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    if args.json {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
            eprintln!("Failed to serialize report: {e}");
            process::exit(1);
        });
        println!("{output}");
    } else {
        print!("{}", render_report(&report, args.color));
    }
}

fn generate(args: &normkit_cli::GenerateArgs) {
    fs::create_dir_all(&args.output_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create output directory: {e}");
        process::exit(1);
    });

    let instances = normkit_testgen::generator::generate_mult_problems(
        args.n_problem,
        args.n_attribute,
        args.n_dependency,
        args.max_lhs,
        args.max_rhs,
    );

    for instance in &instances {
        let path = args.output_dir.join(format!("{}.json", instance.get_id()));
        let file = fs::File::create(&path).unwrap_or_else(|e| {
            eprintln!("Failed to create {}: {e}", path.display());
            process::exit(1);
        });
        serde_json::to_writer_pretty(file, instance).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {e}", path.display());
            process::exit(1);
        });
    }

    println!(
        "Generated {} problems to {}",
        instances.len(),
        args.output_dir.display()
    );
}

fn fmt(args: &normkit_cli::FmtArgs) {
    let files = collect_fds_files(&args.paths).unwrap_or_else(|e| {
        eprintln!("Failed to read input paths: {e}");
        process::exit(1);
    });

    if files.is_empty() {
        eprintln!("No .fds files found");
        process::exit(1);
    }

    let mut any_failed = false;
    for path in files {
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Failed to read {}: {e}", path.display());
                any_failed = true;
                continue;
            }
        };
        let formatted = match format_source(&source) {
            Ok(formatted) => formatted,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                any_failed = true;
                continue;
            }
        };

        if formatted == source {
            continue;
        }
        if args.check {
            println!("{}: not formatted", path.display());
            any_failed = true;
        } else if let Err(e) = fs::write(&path, formatted) {
            eprintln!("Failed to write {}: {e}", path.display());
            any_failed = true;
        } else {
            println!("{}: formatted", path.display());
        }
    }

    if any_failed {
        process::exit(1);
    }
}

fn schema() {
    let schema = schemars::schema_for!(Problem<String>);
    let output = serde_json::to_string_pretty(&schema).unwrap_or_else(|e| {
        eprintln!("Failed to serialize schema: {e}");
        process::exit(1);
    });
    println!("{output}");
}
