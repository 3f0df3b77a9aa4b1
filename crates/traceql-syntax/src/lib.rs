//! `traceql-syntax` - Lexer, parser, and concrete syntax tree for TraceQL.
//!
//! This crate provides the low-level syntactic analysis for TraceQL query
//! strings:
//!
//! - **Lexer**: Tokenizes a query into a stream of tokens
//! - **Parser**: Builds a concrete syntax tree (CST) from tokens
//! - **Syntax Tree**: Lossless representation of the query text
//!
//! # Design Principles
//!
//! This crate follows the design of `rust-analyzer` and uses the `rowan`
//! library for building lossless syntax trees. Key design decisions:
//!
//! - **Lossless**: All source text is preserved, including whitespace and comments
//! - **Error-tolerant**: Parsing never fails; malformed regions become
//!   `Error` nodes with raw kind `0`, the sentinel the diagnostics layer
//!   keys on
//! - **Shape-stable recovery**: Error nodes land in positions that identify
//!   the production being parsed, so messages can be synthesized from
//!   structural context alone
//!
//! # Example
//!
//! ```
//! use traceql_syntax::parser::parse;
//! use traceql_syntax::SyntaxKind;
//!
//! let parsed = parse(r#"{ span.component = "http" }"#);
//! assert!(parsed.ok());
//!
//! let errors: Vec<_> = parse("{ .foo = }")
//!     .syntax()
//!     .descendants()
//!     .filter(|node| node.kind() == SyntaxKind::Error)
//!     .collect();
//! assert_eq!(errors.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod lexer;
pub mod parser;
pub mod syntax;
mod token_kinds;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use parser::{parse, Parse, ParseError};
pub use syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TraceQlLanguage};
