//! Token definitions for TraceQL.
//!
//! This module defines all lexical tokens that can appear in a TraceQL
//! query string. The token kinds are designed to work with both the `logos`
//! lexer generator and the `rowan` lossless syntax tree library.

use logos::Logos;

/// All token kinds in TraceQL.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments) - preserved but not semantically significant
/// - Punctuation and operators
/// - Keywords (scopes, intrinsic fields, aggregates, pipeline operations)
/// - Literals (numbers, durations, strings, status constants)
/// - Identifiers
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Unrecognized input. Also the reserved raw syntax kind `0` used to mark
    /// unparseable regions of the tree.
    #[default]
    Error,

    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines)
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// Single-line comment: // ...
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `|` - pipeline operator
    #[token("|")]
    Pipe,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    /// `&&`
    #[token("&&")]
    And,

    /// `||`
    #[token("||")]
    Or,

    /// `=`
    #[token("=")]
    Eq,

    /// `!=`
    #[token("!=")]
    Neq,

    /// `=~`
    #[token("=~")]
    RegexEq,

    /// `!~`
    #[token("!~")]
    RegexNeq,

    /// `>`
    #[token(">")]
    Gt,

    /// `>=`
    #[token(">=")]
    Gte,

    /// `<`
    #[token("<")]
    Lt,

    /// `<=`
    #[token("<=")]
    Lte,

    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `*`
    #[token("*")]
    Star,

    /// `/`
    #[token("/")]
    Slash,

    /// `%`
    #[token("%")]
    Percent,

    /// `>>` - descendant spanset operator
    #[token(">>")]
    DescendantOp,

    /// `<<` - ancestor spanset operator
    #[token("<<")]
    AncestorOp,

    /// `~` - sibling spanset operator
    #[token("~")]
    TildeOp,

    // =========================================================================
    // SCOPE KEYWORDS
    // =========================================================================
    /// `parent` attribute scope
    #[token("parent")]
    KwParent,

    /// `event` attribute scope
    #[token("event")]
    KwEvent,

    /// `instrumentation` attribute scope
    #[token("instrumentation")]
    KwInstrumentation,

    /// `link` attribute scope
    #[token("link")]
    KwLink,

    /// `resource` attribute scope
    #[token("resource")]
    KwResource,

    /// `span` attribute scope
    #[token("span")]
    KwSpan,

    // =========================================================================
    // INTRINSIC FIELDS
    // =========================================================================
    /// `duration` intrinsic
    #[token("duration")]
    KwDuration,

    /// `name` intrinsic
    #[token("name")]
    KwName,

    /// `status` intrinsic
    #[token("status")]
    KwStatus,

    /// `statusMessage` intrinsic
    #[token("statusMessage")]
    KwStatusMessage,

    /// `kind` intrinsic
    #[token("kind")]
    KwKind,

    /// `rootName` intrinsic
    #[token("rootName")]
    KwRootName,

    /// `rootServiceName` intrinsic
    #[token("rootServiceName")]
    KwRootServiceName,

    /// `traceDuration` intrinsic
    #[token("traceDuration")]
    KwTraceDuration,

    /// `childCount` intrinsic
    #[token("childCount")]
    KwChildCount,

    // =========================================================================
    // AGGREGATES
    // =========================================================================
    /// `count` aggregate
    #[token("count")]
    KwCount,

    /// `avg` aggregate
    #[token("avg")]
    KwAvg,

    /// `max` aggregate
    #[token("max")]
    KwMax,

    /// `min` aggregate
    #[token("min")]
    KwMin,

    /// `sum` aggregate
    #[token("sum")]
    KwSum,

    // =========================================================================
    // PIPELINE OPERATIONS
    // =========================================================================
    /// `by` grouping operation
    #[token("by")]
    KwBy,

    /// `select` operation
    #[token("select")]
    KwSelect,

    /// `coalesce` operation
    #[token("coalesce")]
    KwCoalesce,

    // =========================================================================
    // LITERAL KEYWORDS
    // =========================================================================
    /// `true`
    #[token("true")]
    KwTrue,

    /// `false`
    #[token("false")]
    KwFalse,

    /// `nil`
    #[token("nil")]
    KwNil,

    /// `ok` status constant
    #[token("ok")]
    KwOk,

    /// `error` status constant
    #[token("error")]
    KwError,

    /// `unset` status constant
    #[token("unset")]
    KwUnset,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Integer literal: `200`
    #[regex(r"[0-9]+")]
    Integer,

    /// Float literal: `1.5`
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    /// Duration literal: `300ms`, `1.5s`, `2m`, `1h`
    #[regex(r"[0-9]+(\.[0-9]+)?(ns|us|ms|s|m|h)")]
    DurationLit,

    /// String literal: `"..."` or `'...'`
    #[regex(r#""[^"\n]*""#)]
    #[regex(r"'[^'\n]*'")]
    QuotedString,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Identifier (attribute name segment)
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // =========================================================================
    // END OF FILE
    // =========================================================================
    /// End of input (never produced by the lexer; used by the parser source)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment)
    }

    /// Returns `true` if this is an attribute scope keyword.
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

    /// Returns `true` if this is an intrinsic field keyword.
    #[must_use]
    pub fn is_intrinsic(self) -> bool {
        matches!(
            self,
            Self::KwDuration
                | Self::KwName
                | Self::KwStatus
                | Self::KwStatusMessage
                | Self::KwKind
                | Self::KwRootName
                | Self::KwRootServiceName
                | Self::KwTraceDuration
                | Self::KwChildCount
        )
    }

    /// Returns `true` if this is an aggregate function keyword.
    #[must_use]
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            Self::KwCount | Self::KwAvg | Self::KwMax | Self::KwMin | Self::KwSum
        )
    }

    /// Returns `true` if this is a scalar comparison operator.
    #[must_use]
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Neq | Self::Gt | Self::Gte | Self::Lt | Self::Lte
        )
    }

    /// Returns `true` if this operator combines two spanset expressions.
    #[must_use]
    pub fn is_spanset_combining(self) -> bool {
        matches!(
            self,
            Self::And | Self::Or | Self::DescendantOp | Self::AncestorOp | Self::TildeOp
        )
    }

    /// Returns `true` if this token can serve as an attribute name segment.
    ///
    /// Keywords are not reserved inside attribute names: `.count` and
    /// `.span` are legal attribute references.
    #[must_use]
    pub fn can_be_attribute_name(self) -> bool {
        self == Self::Ident || (self >= Self::KwParent && self <= Self::KwUnset)
    }

    /// Returns `true` if this token can start a static (literal) value.
    #[must_use]
    pub fn can_start_static(self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::Float
                | Self::DurationLit
                | Self::QuotedString
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwNil
                | Self::KwOk
                | Self::KwError
                | Self::KwUnset
                | Self::Minus
        )
    }

    /// Returns `true` if this token can start a field expression operand.
    #[must_use]
    pub fn can_start_field_operand(self) -> bool {
        self == Self::Dot
            || self == Self::LParen
            || self.is_scope()
            || self.is_intrinsic()
            || self.can_start_static()
    }

    /// Returns `true` if this token can start a scalar expression operand.
    #[must_use]
    pub fn can_start_scalar_operand(self) -> bool {
        self.is_aggregate() || self.can_start_static()
    }

    /// Returns the infix binding power of this token inside a field
    /// expression, or `None` if it is not a field-level operator.
    ///
    /// Precedence (low to high): `||`, `&&`, comparisons, `+`/`-`,
    /// `*`/`/`/`%`.
    #[must_use]
    pub fn field_binding_power(self) -> Option<(u8, u8)> {
        match self {
            Self::Or => Some((1, 2)),
            Self::And => Some((3, 4)),
            Self::Eq
            | Self::Neq
            | Self::RegexEq
            | Self::RegexNeq
            | Self::Gt
            | Self::Gte
            | Self::Lt
            | Self::Lte => Some((5, 6)),
            Self::Plus | Self::Minus => Some((7, 8)),
            Self::Star | Self::Slash | Self::Percent => Some((9, 10)),
            _ => None,
        }
    }
}
