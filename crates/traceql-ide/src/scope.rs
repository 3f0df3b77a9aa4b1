//! Attribute-scope style warnings.
//!
//! Unscoped attribute references (`.component` instead of
//! `span.component` / `resource.component`) force the query engine to look
//! the attribute up in every scope, so each one gets a performance warning.

use crate::markers::{get_marker, LineLengths, Marker, MarkerSeverity};
use traceql_syntax::parser::parse;
use traceql_syntax::SyntaxKind;

/// Message attached to every unscoped attribute reference.
pub const SCOPE_WARNING_MESSAGE: &str =
    "Add resource or span scope to attribute to improve query performance.";

/// Collects one warning per unscoped attribute reference, in document order.
///
/// Fast path: text without a `.` cannot contain an attribute reference and
/// is not parsed at all. A warning is anchored as a zero-width marker at the
/// attribute's leading dot, the position just before the name.
#[must_use]
pub fn get_warning_markers<L: LineLengths + ?Sized>(
    severity: MarkerSeverity,
    query: &str,
    lines: &L,
) -> Vec<Marker> {
    if !query.contains('.') {
        return Vec::new();
    }

    let parsed = parse(query);
    let mut markers = Vec::new();
    for node in parsed
        .syntax()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::AttributeField)
    {
        // Incomplete references are the error diagnostics' business.
        if node.children().any(|child| child.kind() == SyntaxKind::Error) {
            continue;
        }
        let Some(first_token) = node
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| !token.kind().is_trivia())
        else {
            continue;
        };
        if first_token.kind().is_scope() {
            continue;
        }

        let anchor: u32 = first_token.text_range().start().into();
        markers.push(get_marker(severity, SCOPE_WARNING_MESSAGE, lines, anchor, anchor));
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::TextLineLengths;

    fn warnings(query: &str) -> Vec<Marker> {
        get_warning_markers(MarkerSeverity::Warning, query, &TextLineLengths::new(query))
    }

    #[test]
    fn test_scoped_attributes_do_not_warn() {
        assert!(warnings(r#"{ span.component = "http" }"#).is_empty());
        assert!(warnings(r#"{ resource.component = "http" }"#).is_empty());
        assert!(warnings(r#"{ parent.component = "http" }"#).is_empty());
        assert!(warnings(r#"{ event.name = "exception" }"#).is_empty());
        assert!(warnings(r#"{ link.traceID = "x" }"#).is_empty());
        assert!(warnings(r#"{ instrumentation.name = "grpc" }"#).is_empty());
    }

    #[test]
    fn test_dotless_text_takes_fast_path() {
        assert!(warnings("{ duration > 300ms }").is_empty());
        assert!(warnings("").is_empty());
    }

    #[test]
    fn test_incomplete_attribute_does_not_warn() {
        // `{ . }` is a syntax error, not a style warning.
        assert!(warnings("{ . }").is_empty());
    }

    #[test]
    fn test_each_unscoped_attribute_warns_once() {
        let markers = warnings("{ .a = 1 && .b = 2 && span.c = 3 }");
        assert_eq!(markers.len(), 2);
        assert!(markers
            .iter()
            .all(|marker| marker.message == SCOPE_WARNING_MESSAGE));
    }
}
