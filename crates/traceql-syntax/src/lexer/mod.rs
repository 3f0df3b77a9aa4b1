//! Lexer for TraceQL.
//!
//! This module provides a lexer that tokenizes a query string into a stream
//! of tokens with their positions in the source text.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns the length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Returns true if the token has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Lexer for TraceQL query text.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized characters are returned as `TokenKind::Error`.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given query text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
        }
    }

    /// Returns the source text being lexed.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?;
        let span = self.inner.span();

        let kind = kind.unwrap_or(TokenKind::Error);
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );

        Some(Token::new(kind, range))
    }
}

/// Lex the entire query and return all tokens.
///
/// This is a convenience function for testing and simple use cases.
/// For the parser, use the `Lexer` iterator directly.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex a query and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| {
            let text = &source[usize::from(token.range.start())..usize::from(token.range.end())];
            (token, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_basic() {
        let source = r#"{ span.component = "http" }"#;
        let tokens = lex(source);

        let non_trivia: Vec<_> = tokens.iter().filter(|t| !t.kind.is_trivia()).collect();
        assert_eq!(non_trivia.len(), 7);
        assert_eq!(non_trivia[0].kind, TokenKind::LBrace);
        assert_eq!(non_trivia[1].kind, TokenKind::KwSpan);
        assert_eq!(non_trivia[2].kind, TokenKind::Dot);
        assert_eq!(non_trivia[3].kind, TokenKind::Ident);
        assert_eq!(non_trivia[4].kind, TokenKind::Eq);
        assert_eq!(non_trivia[5].kind, TokenKind::QuotedString);
        assert_eq!(non_trivia[6].kind, TokenKind::RBrace);
    }

    #[test]
    fn test_lexer_preserves_positions() {
        let source = "{.foo=300}";
        let tokens = lex(source);

        assert_eq!(tokens[0].range, TextRange::new(0.into(), 1.into()));
        assert_eq!(tokens[1].range, TextRange::new(1.into(), 2.into()));
        // "foo" is at position 2..5
        assert_eq!(tokens[2].range, TextRange::new(2.into(), 5.into()));
        assert_eq!(tokens[2].kind, TokenKind::Ident);
    }

    #[test]
    fn test_lexer_operators() {
        let source = "= != =~ !~ > >= < <= && || >> << ~ |";
        let non_trivia: Vec<_> = lex(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            non_trivia,
            vec![
                TokenKind::Eq,
                TokenKind::Neq,
                TokenKind::RegexEq,
                TokenKind::RegexNeq,
                TokenKind::Gt,
                TokenKind::Gte,
                TokenKind::Lt,
                TokenKind::Lte,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::DescendantOp,
                TokenKind::AncestorOp,
                TokenKind::TildeOp,
                TokenKind::Pipe,
            ]
        );
    }

    #[test]
    fn test_lexer_literals() {
        let cases = [
            ("200", TokenKind::Integer),
            ("1.5", TokenKind::Float),
            ("300ms", TokenKind::DurationLit),
            ("1.5s", TokenKind::DurationLit),
            ("2h", TokenKind::DurationLit),
            (r#""http""#, TokenKind::QuotedString),
            ("'http'", TokenKind::QuotedString),
            ("true", TokenKind::KwTrue),
            ("error", TokenKind::KwError),
        ];
        for (source, expected) in cases {
            let tokens = lex(source);
            assert_eq!(tokens.len(), 1, "source: {source}");
            assert_eq!(tokens[0].kind, expected, "source: {source}");
        }
    }

    #[test]
    fn test_lexer_keywords_vs_idents() {
        let source = "span spanner duration durations by byte";
        let kinds: Vec<_> = lex(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwSpan,
                TokenKind::Ident,
                TokenKind::KwDuration,
                TokenKind::Ident,
                TokenKind::KwBy,
                TokenKind::Ident,
            ]
        );
    }

    #[test]
    fn test_lexer_unknown_characters() {
        let source = "{ .foo = @ }";
        let tokens = lex(source);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Error));
    }

    #[test]
    fn test_lex_with_text() {
        let source = "{.foo=1}";
        let tokens = lex_with_text(source);

        assert_eq!(tokens[2].1, "foo");
        assert_eq!(tokens[4].1, "1");
    }
}
