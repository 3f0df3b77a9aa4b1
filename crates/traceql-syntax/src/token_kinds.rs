//! Single listing of all token kinds.
//!
//! `TokenKind` (lexer) and the token half of `SyntaxKind` (tree) must stay
//! in lockstep; both are generated from this list. `Error` is deliberately
//! first so that its raw syntax kind is `0`, the sentinel value the
//! diagnostics layer keys on.

macro_rules! for_each_token_kind {
    ($callback:ident) => {
        $callback! {
            Error,
            Whitespace,
            LineComment,
            LBrace,
            RBrace,
            LParen,
            RParen,
            Comma,
            Dot,
            Pipe,
            And,
            Or,
            Eq,
            Neq,
            RegexEq,
            RegexNeq,
            Gt,
            Gte,
            Lt,
            Lte,
            Plus,
            Minus,
            Star,
            Slash,
            Percent,
            DescendantOp,
            AncestorOp,
            TildeOp,
            KwParent,
            KwEvent,
            KwInstrumentation,
            KwLink,
            KwResource,
            KwSpan,
            KwDuration,
            KwName,
            KwStatus,
            KwStatusMessage,
            KwKind,
            KwRootName,
            KwRootServiceName,
            KwTraceDuration,
            KwChildCount,
            KwCount,
            KwAvg,
            KwMax,
            KwMin,
            KwSum,
            KwBy,
            KwSelect,
            KwCoalesce,
            KwTrue,
            KwFalse,
            KwNil,
            KwOk,
            KwError,
            KwUnset,
            Integer,
            Float,
            DurationLit,
            QuotedString,
            Ident,
            Eof,
        }
    };
}

pub(crate) use for_each_token_kind;
