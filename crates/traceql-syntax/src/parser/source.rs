//! Token source for the parser.
//!
//! This module provides the `Source` struct that wraps a token stream
//! and provides lookahead and consumption operations. Trivia tokens are
//! invisible to the parser; the sink re-attaches them to the tree.

use crate::lexer::{Token, TokenKind};

/// A token source that provides tokens to the parser.
pub struct Source<'t> {
    tokens: &'t [Token],
    cursor: usize,
}

impl<'t> Source<'t> {
    /// Creates a new source from a token stream.
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Returns the current token kind, or `Eof` if at end.
    pub fn current(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// Returns the current token, or `None` if at end.
    pub fn current_token(&self) -> Option<&Token> {
        let mut cursor = self.cursor;
        while let Some(token) = self.tokens.get(cursor) {
            if !token.kind.is_trivia() {
                return Some(token);
            }
            cursor += 1;
        }
        None
    }

    /// Peeks at the nth non-trivia token ahead (0 = current).
    pub fn peek_kind_n(&self, n: usize) -> TokenKind {
        let mut cursor = self.cursor;
        let mut non_trivia_seen = 0;

        while let Some(token) = self.tokens.get(cursor) {
            if !token.kind.is_trivia() {
                if non_trivia_seen == n {
                    return token.kind;
                }
                non_trivia_seen += 1;
            }
            cursor += 1;
        }

        TokenKind::Eof
    }

    /// Advances past the current non-trivia token.
    pub fn bump(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            if !token.kind.is_trivia() {
                break;
            }
        }
    }

    /// Returns `true` if at end of input.
    pub fn at_end(&self) -> bool {
        self.current() == TokenKind::Eof
    }
}
