use std::collections::BTreeSet;

use normkit_core::{FunctionalDependency, Problem};
/// Winnow-based parser for the relation and dependency notation.
///
/// Grammar:
/// ```text
/// problem      = trivia relation trivia "---" "-"* trivia dependencies trivia
/// relation     = attribute ("," attribute)*
/// dependencies = (dependency (gap dependency)*)?
/// dependency   = side "->" side
/// side         = "{" attribute ("," attribute)* "}"   -- braced: whole names
///              | chunk (WHITESPACE chunk)*            -- compact: one attribute per character
/// gap          = WHITESPACE* (("," | ";" | NEWLINE | comment) WHITESPACE*)+
/// comment      = "//" REST_OF_LINE
/// attribute    = chunk = [A-Za-z0-9_]+
/// ```
///
/// Inline whitespace alone never separates dependencies: in `A->B C->D` the
/// right-hand side reads `B C` and the input is rejected at the second `->`.
use winnow::ascii::{multispace1, till_line_ending};
use winnow::combinator::{alt, delimited, repeat, separated};
use winnow::error::{ContextError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{literal, take_while};
use winnow::ModalResult;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A parse error with human-readable location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Parse a comma-separated attribute list such as `A, B, C`.
///
/// Each comma-separated item is one attribute, whatever its length.
/// Duplicates collapse.
///
/// # Errors
///
/// Returns a [`ParseError`] if the list is empty or contains anything other
/// than attribute names and commas.
pub fn parse_relation(input: &str) -> Result<BTreeSet<String>, ParseError> {
    run(delimited(trivia, relation, trivia), input)
}

/// Parse a list of dependencies such as `A -> B, BC -> D`.
///
/// Dependencies are separated by commas, semicolons or newlines. A compact
/// side like `BC` is read one attribute per character; use the braced form
/// `{emp, dept}` for longer names.
///
/// # Errors
///
/// Returns a [`ParseError`] when a dependency lacks its `->`, has an empty
/// side, or is followed by unexpected characters.
pub fn parse_dependencies(input: &str) -> Result<Vec<FunctionalDependency<String>>, ParseError> {
    run(delimited(trivia, dependencies, trivia), input)
}

/// Parse a problem file: the relation, a `---` line, then the dependencies.
///
/// `//` comments and blank lines are allowed anywhere between items.
///
/// # Errors
///
/// Returns a [`ParseError`] with line/column information when the input does
/// not conform to the grammar.
pub fn parse_problem(input: &str) -> Result<Problem<String>, ParseError> {
    run(problem, input)
}

fn run<'s, O>(
    mut parser: impl Parser<&'s str, O, winnow::error::ErrMode<ContextError>>,
    input: &'s str,
) -> Result<O, ParseError> {
    parser.parse(input).map_err(|e| {
        let (line, column) = offset_to_line_col(input, e.offset());
        let message = e.inner().to_string();
        ParseError {
            message: if message.is_empty() {
                "unexpected input".to_string()
            } else {
                message
            },
            line,
            column,
        }
    })
}

// ---------------------------------------------------------------------------
// Line/column helper
// ---------------------------------------------------------------------------

/// Convert a byte offset into the original input to 1-based (line, column).
fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let safe_offset = offset.min(input.len());
    let prefix = &input[..safe_offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = prefix
        .rfind('\n')
        .map_or_else(|| prefix.len() + 1, |pos| prefix.len() - pos);
    (line, column)
}

// ---------------------------------------------------------------------------
// Whitespace and comments
// ---------------------------------------------------------------------------

/// Optional inline whitespace: spaces and tabs only (no newlines).
fn opt_inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

/// Inline whitespace: at least one space or tab.
fn inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

/// `"//" <rest-of-line>`, without the newline.
fn comment(input: &mut &str) -> ModalResult<()> {
    (literal("//"), till_line_ending).void().parse_next(input)
}

/// Any amount of whitespace (newlines included) and comments.
fn trivia(input: &mut &str) -> ModalResult<()> {
    repeat::<_, _, (), _, _>(0.., alt((multispace1.void(), comment))).parse_next(input)
}

/// Separator between dependencies: `,` `;` newlines and comments, mixed with
/// whitespace. Dependencies consume their own trailing inline whitespace, so
/// whitespace alone never reaches this parser.
fn gap(input: &mut &str) -> ModalResult<()> {
    repeat::<_, _, (), _, _>(
        1..,
        alt((
            take_while(1.., |c: char| matches!(c, ',' | ';' | '\n' | '\r' | ' ' | '\t')).void(),
            comment,
        )),
    )
    .parse_next(input)
}

// ---------------------------------------------------------------------------
// Leaf parsers
// ---------------------------------------------------------------------------

/// A run of attribute characters: ASCII letters, digits and `_`.
fn chunk<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .context(StrContext::Expected(StrContextValue::Description(
            "attribute name",
        )))
        .parse_next(input)
}

/// A whole attribute name.
fn attribute(input: &mut &str) -> ModalResult<String> {
    chunk.map(str::to_string).parse_next(input)
}

/// `attribute ("," attribute)*` with inline whitespace around each name.
fn attribute_list(input: &mut &str) -> ModalResult<BTreeSet<String>> {
    let names: Vec<String> = separated(
        1..,
        delimited(opt_inline_ws, attribute, opt_inline_ws),
        literal(","),
    )
    .parse_next(input)?;
    Ok(names.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Relation and dependency parsers
// ---------------------------------------------------------------------------

fn relation(input: &mut &str) -> ModalResult<BTreeSet<String>> {
    attribute_list
        .context(StrContext::Label("relation"))
        .parse_next(input)
}

/// `"{" attribute ("," attribute)* "}"`
fn braced_side(input: &mut &str) -> ModalResult<BTreeSet<String>> {
    delimited(
        literal("{"),
        attribute_list,
        literal("}").context(StrContext::Expected(StrContextValue::CharLiteral('}'))),
    )
    .parse_next(input)
}

/// Compact side: every character of every chunk is its own attribute.
fn compact_side(input: &mut &str) -> ModalResult<BTreeSet<String>> {
    let chunks: Vec<&str> = separated(1.., chunk, inline_ws).parse_next(input)?;
    Ok(chunks
        .into_iter()
        .flat_map(str::chars)
        .map(String::from)
        .collect())
}

fn side(input: &mut &str) -> ModalResult<BTreeSet<String>> {
    alt((braced_side, compact_side)).parse_next(input)
}

/// `side "->" side`
fn dependency(input: &mut &str) -> ModalResult<FunctionalDependency<String>> {
    opt_inline_ws.parse_next(input)?;
    let lhs = side
        .context(StrContext::Label("left-hand side"))
        .parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    literal("->")
        .context(StrContext::Expected(StrContextValue::StringLiteral("->")))
        .parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    let rhs = side
        .context(StrContext::Label("right-hand side"))
        .parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    Ok(FunctionalDependency { lhs, rhs })
}

fn dependencies(input: &mut &str) -> ModalResult<Vec<FunctionalDependency<String>>> {
    separated(0.., dependency, gap).parse_next(input)
}

/// `"---" "-"*` on its own line.
fn separator(input: &mut &str) -> ModalResult<()> {
    (
        literal("---"),
        take_while(0.., '-'),
        opt_inline_ws,
    )
        .void()
        .context(StrContext::Expected(StrContextValue::StringLiteral("---")))
        .parse_next(input)
}

fn problem(input: &mut &str) -> ModalResult<Problem<String>> {
    trivia.parse_next(input)?;
    let relation = relation.parse_next(input)?;
    trivia.parse_next(input)?;
    separator.parse_next(input)?;
    trivia.parse_next(input)?;
    let dependencies = dependencies.parse_next(input)?;
    trivia.parse_next(input)?;
    Ok(Problem::new(relation, dependencies))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use normkit_core::relation::format_problem;

    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    fn fd(lhs: &[&str], rhs: &[&str]) -> FunctionalDependency<String> {
        FunctionalDependency {
            lhs: set(lhs),
            rhs: set(rhs),
        }
    }

    // -----------------------------------------------------------------------
    // Happy-path tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_relation_list() {
        let result = parse_relation(" A, B ,C ").expect("should parse");
        assert_eq!(result, set(&["A", "B", "C"]));
    }

    #[test]
    fn test_relation_keeps_long_names() {
        let result = parse_relation("emp,dept,A").expect("should parse");
        assert_eq!(result, set(&["A", "dept", "emp"]));
    }

    #[test]
    fn test_relation_duplicates_collapse() {
        let result = parse_relation("A, B, A").expect("should parse");
        assert_eq!(result, set(&["A", "B"]));
    }

    #[test]
    fn test_compact_dependencies() {
        let result = parse_dependencies("A->B, B->C").expect("should parse");
        assert_eq!(result, vec![fd(&["A"], &["B"]), fd(&["B"], &["C"])]);
    }

    #[test]
    fn test_compact_side_splits_characters() {
        let result = parse_dependencies("AB -> CD").expect("should parse");
        assert_eq!(result, vec![fd(&["A", "B"], &["C", "D"])]);
    }

    #[test]
    fn test_compact_side_ignores_inner_spaces() {
        let result = parse_dependencies("A B -> C").expect("should parse");
        assert_eq!(result, vec![fd(&["A", "B"], &["C"])]);
    }

    #[test]
    fn test_braced_side_keeps_names() {
        let result = parse_dependencies("{emp, dept} -> mgr").expect("should parse");
        assert_eq!(result, vec![fd(&["dept", "emp"], &["m", "g", "r"])]);

        let result = parse_dependencies("{emp} -> {mgr}").expect("should parse");
        assert_eq!(result, vec![fd(&["emp"], &["mgr"])]);
    }

    #[test]
    fn test_mixed_separators() {
        let result = parse_dependencies("A->B; B->C\nC->D,\n\nD->A").expect("should parse");
        assert_eq!(result.len(), 4);
        assert_eq!(result[3], fd(&["D"], &["A"]));
    }

    #[test]
    fn test_whitespace_does_not_separate_dependencies() {
        let err = parse_dependencies("A->B C->D").expect_err("should fail");
        assert_eq!((err.line, err.column), (1, 7));
        assert!(parse_dependencies("{A}->{B} {C}->{D}").is_err());
        assert_eq!(parse_dependencies("A->B , C->D").expect("should parse").len(), 2);
    }

    #[test]
    fn test_empty_dependency_list() {
        assert_eq!(parse_dependencies("").expect("should parse"), vec![]);
        assert_eq!(parse_dependencies("  \n").expect("should parse"), vec![]);
    }

    #[test]
    fn test_problem_file() {
        let input = "\
// employees
A, B, C
---
// keys
AB -> C
B -> C
";
        let problem = parse_problem(input).expect("should parse");
        assert_eq!(problem.relation, set(&["A", "B", "C"]));
        assert_eq!(
            problem.dependencies,
            vec![fd(&["A", "B"], &["C"]), fd(&["B"], &["C"])]
        );
    }

    #[test]
    fn test_problem_without_dependencies() {
        let problem = parse_problem("A, B\n---\n").expect("should parse");
        assert_eq!(problem.relation, set(&["A", "B"]));
        assert!(problem.dependencies.is_empty());
    }

    #[test]
    fn test_formatted_problem_parses_back() {
        let problem = Problem::new(
            set(&["A", "dept", "emp"]),
            vec![fd(&["emp"], &["dept"]), fd(&["A", "emp"], &["dept"])],
        );
        let text = format_problem(&problem);
        assert_eq!(parse_problem(&text).expect("should parse"), problem);
    }

    // -----------------------------------------------------------------------
    // Error tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_missing_arrow() {
        let err = parse_dependencies("A->B, BC").expect_err("should fail");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_empty_side() {
        assert!(parse_dependencies("A->").is_err());
        assert!(parse_dependencies("->B").is_err());
        assert!(parse_dependencies("{}->B").is_err());
    }

    #[test]
    fn test_empty_relation() {
        assert!(parse_relation("").is_err());
        assert!(parse_relation("A,,B").is_err());
    }

    #[test]
    fn test_problem_missing_separator() {
        let err = parse_problem("A, B\nA -> B\n").expect_err("should fail");
        assert_eq!(err.line, 2, "expected error on line 2, got: {err}");
    }

    #[test]
    fn test_parse_error_display() {
        let err = parse_dependencies("A => B").expect_err("should fail");
        let msg = err.to_string();
        assert!(msg.contains("parse error"), "display should contain 'parse error': {msg}");
        assert!(msg.contains("line 1"), "display should contain the line: {msg}");
    }

    #[test]
    fn test_offset_to_line_col() {
        assert_eq!(offset_to_line_col("hello\nworld\n", 0), (1, 1));
        assert_eq!(offset_to_line_col("hello\nworld\n", 6), (2, 1));
        assert_eq!(offset_to_line_col("hello\nworld\n", 8), (2, 3));
    }
}
