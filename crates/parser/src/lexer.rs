//! Logos-based lexer for the dependency notation.
//!
//! The lexer does not drive the parser; it exists so front-ends can highlight
//! relation and dependency text without re-implementing the token rules.
//!
//! # Example input
//!
//! ```text
//! // employees
//! emp, dept, mgr
//! ---
//! {emp} -> {dept}
//! {dept} -> {mgr}
//! ```

use std::ops::Range;

/// All token kinds produced by the lexer.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(::logos::Logos, Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A line comment starting with `//` and running to end of line.
    #[regex(r"//[^\n]*", allow_greedy = true)]
    Comment,

    /// Three or more `-` characters (relation / dependency separator).
    #[regex(r"---+")]
    Separator,

    /// Dependency arrow `->`.
    #[token("->")]
    Arrow,

    /// `,` between attributes or dependencies.
    #[token(",")]
    Comma,

    /// `;` between dependencies.
    #[token(";")]
    Semicolon,

    /// Opening brace of a braced attribute list.
    #[token("{")]
    BraceOpen,

    /// Closing brace of a braced attribute list.
    #[token("}")]
    BraceClose,

    /// Attribute name, or a run of single-character attributes in the
    /// compact notation.
    #[regex(r"[a-zA-Z0-9_]+")]
    Ident,

    /// A newline (`\n` or `\r\n`).
    #[regex(r"\r?\n")]
    Newline,

    /// Spaces or tabs.
    #[regex(r"[ \t]+")]
    Whitespace,
}

/// A single token with its kind and the byte-offset span in the source.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range `start..end` into the original input string.
    pub span: Range<usize>,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Return the source text for this token given the original input.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }
}

/// Tokenize `input` and return all valid tokens.
///
/// Characters the lexer cannot recognise are silently skipped.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    use logos::Logos as _;
    TokenKind::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|kind| Token { kind, span }))
        .collect()
}

/// Tokenize `input` and return tokens paired with their source text slices.
#[must_use]
pub fn tokenize_with_text(input: &str) -> Vec<(Token, &str)> {
    tokenize(input)
        .into_iter()
        .map(|token| {
            let text = token.text(input);
            (token, text)
        })
        .collect()
}
