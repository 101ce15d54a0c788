use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Display, Write};

use crate::relation::{FunctionalDependency, Problem};

/// Render an attribute set in the compact notation.
///
/// Single-character attributes are concatenated in sorted order (`ABC`), the
/// way the compact notation spells them. As soon as one attribute is longer
/// than a character, concatenation becomes ambiguous and the braced form
/// `{dept, emp}` is used instead.
#[must_use]
pub fn format_attributes<A: Display>(set: &BTreeSet<A>) -> String {
    let mut output = String::new();
    let _ = write_attributes(&mut output, set);
    output
}

fn write_attributes<A: Display, W: Write>(out: &mut W, set: &BTreeSet<A>) -> fmt::Result {
    let names: Vec<String> = set.iter().map(ToString::to_string).collect();
    if names.iter().all(|name| name.chars().count() == 1) {
        for name in &names {
            out.write_str(name)?;
        }
        Ok(())
    } else {
        out.write_char('{')?;
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            out.write_str(name)?;
        }
        out.write_char('}')
    }
}

impl<A: Display> Display for FunctionalDependency<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.lhs)?;
        f.write_str(" -> ")?;
        write_attributes(f, &self.rhs)
    }
}

/// Format a problem as the text notation read by `normkit_parser`.
///
/// The relation is written on one line, followed by a `---` separator and one
/// dependency per line. The output always ends with a trailing newline.
#[must_use]
pub fn format_problem<A: Display>(problem: &Problem<A>) -> String {
    let mut output = String::new();
    for (i, attribute) in problem.relation.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        let _ = write!(output, "{attribute}");
    }
    output.push_str("\n---\n");
    for dependency in &problem.dependencies {
        let _ = writeln!(output, "{dependency}");
    }
    output
}
