//! wasm library for normkit
//! compiled binary is uploaded as github action artifact

#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use normkit_core::{AnalysisOptions, DecompositionTarget, Problem};
use normkit_parser::{ParseError, TokenKind};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn parse_level(level: &str) -> Option<DecompositionTarget> {
    match level {
        "2nf" | "2NF" => Some(DecompositionTarget::Second),
        "3nf" | "3NF" => Some(DecompositionTarget::Third),
        "bcnf" | "BCNF" => Some(DecompositionTarget::BoyceCodd),
        _ => None,
    }
}

fn parse_error_json(field: &str, error: &ParseError) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "field": field,
        "error": {
            "message": error.message,
            "line": error.line,
            "column": error.column
        }
    })
}

fn report_json(problem: &Problem<String>, target: DecompositionTarget) -> String {
    match normkit_core::analyze_problem(problem, target, &AnalysisOptions::default()) {
        Ok(report) => serde_json::json!({"ok": true, "report": report}).to_string(),
        Err(error) => serde_json::json!({"ok": false, "error": error.to_string()}).to_string(),
    }
}

/// Analyze a relation given as the two text fields of the notation.
///
/// `relation` is `A, B, C`; `dependencies` is `A -> B, BC -> D`. `target` is
/// one of `2nf`, `3nf`, `bcnf`.
///
/// Returns a JSON string:
/// - On success: `{"ok":true,"report":{...}}`
/// - On a syntax error: `{"ok":false,"field":"relation","error":{"message":...,"line":...,"column":...}}`
/// - On invalid input: `{"ok":false,"error":"<description>"}`
#[must_use]
#[wasm_bindgen]
pub fn analyze(relation: &str, dependencies: &str, target: &str) -> String {
    let Some(target) = parse_level(target) else {
        return serde_json::json!({"ok": false, "error": "unknown target level"}).to_string();
    };

    let relation = match normkit_parser::parse_relation(relation) {
        Ok(relation) => relation,
        Err(e) => return parse_error_json("relation", &e).to_string(),
    };
    let dependencies = match normkit_parser::parse_dependencies(dependencies) {
        Ok(dependencies) => dependencies,
        Err(e) => return parse_error_json("dependencies", &e).to_string(),
    };

    report_json(&Problem::new(relation, dependencies), target)
}

/// Analyze a problem given as JSON (`{"relation": [...], "dependencies": [...]}`).
///
/// Returns the same JSON shapes as [`analyze`].
#[must_use]
#[wasm_bindgen]
pub fn analyze_problem(problem_json: &str, target: &str) -> String {
    let Some(target) = parse_level(target) else {
        return serde_json::json!({"ok": false, "error": "unknown target level"}).to_string();
    };

    match serde_json::from_str::<Problem<String>>(problem_json) {
        Ok(problem) => report_json(&problem, target),
        Err(e) => serde_json::json!({"ok": false, "error": e.to_string()}).to_string(),
    }
}

#[derive(Serialize)]
struct HighlightToken<'a> {
    kind: TokenKind,
    start: usize,
    end: usize,
    text: &'a str,
}

/// Tokenize notation text for syntax highlighting.
///
/// Returns a JSON array of `{"kind","start","end","text"}` objects; offsets
/// are byte offsets into `text`.
#[must_use]
#[wasm_bindgen]
pub fn tokenize(text: &str) -> String {
    let tokens: Vec<HighlightToken<'_>> = normkit_parser::tokenize_with_text(text)
        .into_iter()
        .map(|(token, slice)| HighlightToken {
            kind: token.kind,
            start: token.span.start,
            end: token.span.end,
            text: slice,
        })
        .collect();
    serde_json::to_string(&tokens).unwrap_or_else(|_| "[]".to_string())
}
