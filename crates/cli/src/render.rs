//! Text rendering of an analysis report.
//!
//! ```text
//! Candidate Keys: AB
//!
//! ✔ 1NF: Relation is in 1NF (all attributes are atomic).
//! ❌ 2NF Violation:
//!   B -> C
//!
//! 🔹 Decomposing into 2NF...
//!   R1: B, C
//!   R2: A
//! ```

use std::fmt::{Display, Write};

use color_print::cformat;
use normkit_core::relation::format_attributes;
use normkit_core::{Decomposition, LevelResult, NormalForm, Report};

#[derive(Debug, Clone, Copy)]
enum Tone {
    Pass,
    Fail,
    Info,
}

fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Pass => cformat!("<green>{}</green>", text),
        Tone::Fail => cformat!("<red>{}</red>", text),
        Tone::Info => cformat!("<blue>{}</blue>", text),
    }
}

/// Render `report` as the line-oriented text report.
///
/// Keys are written in the compact notation (`AB`); fragments list their
/// attributes separated by `", "`.
#[must_use]
pub fn render_report<A: Display>(report: &Report<A>, color: bool) -> String {
    let mut out = String::new();

    let keys: Vec<String> = report.candidate_keys.iter().map(format_attributes).collect();
    let line = format!("Candidate Keys: {}", keys.join(", "));
    let _ = writeln!(out, "{}\n", paint(&line, Tone::Pass, color));

    for result in &report.level_results {
        write_level(&mut out, result, color);
    }

    if let Some(decomposition) = &report.decomposition {
        write_decomposition(&mut out, decomposition, color);
    }
    out
}

fn write_level<A: Display>(out: &mut String, result: &LevelResult<A>, color: bool) {
    let level = result.level;
    if result.satisfied {
        let line = if level == NormalForm::First {
            format!("✔ {level}: Relation is in {level} (all attributes are atomic).")
        } else {
            format!("✔ {level}: Relation is in {level}.")
        };
        let _ = writeln!(out, "{}", paint(&line, Tone::Pass, color));
        return;
    }

    let _ = writeln!(out, "{}", paint(&format!("❌ {level} Violation:"), Tone::Fail, color));
    for dependency in &result.violations {
        let _ = writeln!(out, "{}", paint(&format!("  {dependency}"), Tone::Fail, color));
    }
}

fn write_decomposition<A: Display>(out: &mut String, decomposition: &Decomposition<A>, color: bool) {
    let header = format!("\n🔹 Decomposing into {}...", decomposition.level);
    let _ = writeln!(out, "{}", paint(&header, Tone::Info, color));
    for (i, fragment) in decomposition.fragments.iter().enumerate() {
        let names: Vec<String> = fragment.iter().map(ToString::to_string).collect();
        let line = format!("  R{}: {}", i + 1, names.join(", "));
        let _ = writeln!(out, "{}", paint(&line, Tone::Info, color));
    }
}
