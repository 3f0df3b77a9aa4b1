//! Syntax tree types for TraceQL.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite
//! nodes. `SyntaxKind::Error` has raw value `0`: it is the reserved sentinel
//! the diagnostics layer uses to find unparseable regions.

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kind {
    ($($token:ident),* $(,)?) => {
        /// All syntax node and token kinds in TraceQL.
        ///
        /// This enum includes both token kinds (from the lexer) and composite
        /// node kinds (produced by the parser).
        // Variants mirror lexer/token names; documenting each would be noisy.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            // =========================================================================
            // TOKEN KINDS (mirrors TokenKind; Error first, raw kind 0)
            // =========================================================================
            $($token,)*

            // =========================================================================
            // COMPOSITE NODE KINDS (produced by parser)
            // =========================================================================
            /// Root node of a query
            Query,

            /// A spanset pipeline: `{ ... } | by(...)`, or two pipelines joined
            /// by a spanset combining operator
            SpansetPipelineExpression,

            /// A spanset filter: `{ expr }`
            SpansetFilter,

            /// A field-level expression; every operand and binary expression
            /// inside a filter is wrapped in one
            FieldExpression,

            /// A comparison or arithmetic operator inside a field expression
            FieldOp,

            /// An attribute reference: `.foo`, `span.component`,
            /// `parent.span.http.status_code`
            AttributeField,

            /// An intrinsic field reference: `duration`, `name`, `status`, ...
            IntrinsicField,

            /// An aggregate invocation: `count()`, `avg(duration)`
            Aggregate,

            /// A scalar comparison pipeline stage: `avg(duration) > 1s`
            ScalarFilter,

            /// A scalar operand inside a scalar filter
            ScalarExpression,

            /// The comparison operator of a scalar filter
            ComparisonOp,

            /// A `by(...)` grouping operation
            GroupOperation,

            /// A `select(...)` operation
            SelectOperation,

            /// A `coalesce()` operation
            CoalesceOperation,

            /// A literal value
            Static,
        }
    };
}

for_each_token_kind!(define_syntax_kind);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment)
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns `true` if this is an attribute scope keyword token.
    #[must_use]
    pub fn is_scope(self) -> bool {
        matches!(
            self,
            Self::KwParent
                | Self::KwEvent
                | Self::KwInstrumentation
                | Self::KwLink
                | Self::KwResource
                | Self::KwSpan
        )
    }
}

macro_rules! map_token_kinds {
    ($($name:ident),* $(,)?) => {
        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$name => SyntaxKind::$name,)*
                }
            }
        }
    };
}

for_each_token_kind!(map_token_kinds);

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for TraceQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TraceQlLanguage {}

macro_rules! define_syntax_kinds {
    ($($token:ident),* $(,)?) => {
        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            SyntaxKind::Query,
            SyntaxKind::SpansetPipelineExpression,
            SyntaxKind::SpansetFilter,
            SyntaxKind::FieldExpression,
            SyntaxKind::FieldOp,
            SyntaxKind::AttributeField,
            SyntaxKind::IntrinsicField,
            SyntaxKind::Aggregate,
            SyntaxKind::ScalarFilter,
            SyntaxKind::ScalarExpression,
            SyntaxKind::ComparisonOp,
            SyntaxKind::GroupOperation,
            SyntaxKind::SelectOperation,
            SyntaxKind::CoalesceOperation,
            SyntaxKind::Static,
        ];
    };
}

for_each_token_kind!(define_syntax_kinds);

impl rowan::Language for TraceQlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the TraceQL syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<TraceQlLanguage>;

/// A syntax token in the TraceQL syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<TraceQlLanguage>;

/// A syntax element (either node or token) in the TraceQL syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<TraceQlLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_raw_kind_zero() {
        assert_eq!(SyntaxKind::Error as u16, 0);
        assert_eq!(
            <TraceQlLanguage as rowan::Language>::kind_from_raw(rowan::SyntaxKind(0)),
            SyntaxKind::Error
        );
    }

    #[test]
    fn test_token_kind_to_syntax_kind() {
        assert_eq!(SyntaxKind::from(TokenKind::KwSpan), SyntaxKind::KwSpan);
        assert_eq!(SyntaxKind::from(TokenKind::Ident), SyntaxKind::Ident);
        assert_eq!(SyntaxKind::from(TokenKind::Pipe), SyntaxKind::Pipe);
    }

    #[test]
    fn test_is_trivia() {
        assert!(SyntaxKind::Whitespace.is_trivia());
        assert!(SyntaxKind::LineComment.is_trivia());
        assert!(!SyntaxKind::Ident.is_trivia());
    }

    #[test]
    fn test_is_token_vs_node() {
        assert!(SyntaxKind::Ident.is_token());
        assert!(SyntaxKind::KwBy.is_token());
        assert!(!SyntaxKind::SpansetFilter.is_token());
        assert!(!SyntaxKind::Query.is_token());

        assert!(!SyntaxKind::Ident.is_node());
        assert!(SyntaxKind::SpansetFilter.is_node());
    }

    #[test]
    fn test_scope_kinds() {
        assert!(SyntaxKind::KwSpan.is_scope());
        assert!(SyntaxKind::KwResource.is_scope());
        assert!(SyntaxKind::KwParent.is_scope());
        assert!(!SyntaxKind::Ident.is_scope());
        assert!(!SyntaxKind::KwDuration.is_scope());
    }
}
