pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, tokenize_with_text, Token, TokenKind};
pub use parser::{parse_dependencies, parse_problem, parse_relation, ParseError};
