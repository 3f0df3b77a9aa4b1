//! Syntax-error collection and message synthesis.
//!
//! Error regions are identified purely by the parser's reserved `Error`
//! sentinel (raw kind `0`); the message for each region is synthesized from
//! its structural context - the parent node, the previous non-trivia
//! sibling, and for aggregate-like recoveries the ancestor chain. The
//! mapping is one `match` so it can be audited row by row.

use tracing::debug;
use traceql_syntax::parser::parse;
use traceql_syntax::{SyntaxElement, SyntaxKind, SyntaxNode};

/// Collects the error nodes of the given query text.
///
/// Two classes of input are deliberately never flagged:
///
/// - blank input, and
/// - input consisting solely of hexadecimal characters, which the host
///   interprets as a raw trace id rather than a query expression.
///
/// Everything else is parsed and every `Error` node is returned in
/// document order. Nothing is cached: each call reparses from scratch.
#[must_use]
pub fn get_error_nodes(query: &str) -> Vec<SyntaxNode> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    // Raw trace ids are handled elsewhere and must never be flagged.
    if trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Vec::new();
    }

    let parsed = parse(query);
    let nodes: Vec<SyntaxNode> = parsed
        .syntax()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::Error)
        .collect();
    debug!(count = nodes.len(), "collected error nodes");
    nodes
}

/// Synthesizes the user-facing message for one error node.
///
/// Pure function of the node's position in the tree: the same node always
/// yields the same string.
#[must_use]
pub fn compute_error_message(node: &SyntaxNode) -> &'static str {
    let Some(parent) = node.parent() else {
        return "Invalid query.";
    };
    let prev = prev_non_trivia_sibling(node);
    let prev_kind = prev.as_ref().map(SyntaxElement::kind);

    match parent.kind() {
        SyntaxKind::FieldExpression => match prev_kind {
            Some(SyntaxKind::And | SyntaxKind::Or) => "Invalid value after logical operator.",
            Some(SyntaxKind::FieldOp) => "Invalid value after comparison or arithmetic operator.",
            _ => "Invalid operator after field expression.",
        },
        SyntaxKind::SpansetFilter => match prev_kind {
            Some(SyntaxKind::FieldExpression) => {
                "Invalid comparison operator after field expression."
            }
            _ => "Invalid expression for spanset.",
        },
        SyntaxKind::SpansetPipelineExpression => match prev_kind {
            Some(SyntaxKind::SpansetPipelineExpression) => {
                "Invalid spanset combining operator after spanset expression."
            }
            Some(SyntaxKind::Pipe) => "Invalid aggregation operator after pipeline operator.",
            _ => "Invalid spanset expression after spanset combining operator.",
        },
        SyntaxKind::IntrinsicField | SyntaxKind::Aggregate => {
            for ancestor in parent.ancestors() {
                match ancestor.kind() {
                    SyntaxKind::GroupOperation => return "Invalid expression for by operator.",
                    SyntaxKind::SelectOperation => {
                        return "Invalid expression for select operator."
                    }
                    _ => {}
                }
            }
            "Invalid expression for aggregator operator."
        }
        SyntaxKind::AttributeField => "Invalid expression for spanset.",
        SyntaxKind::ScalarFilter => match prev_kind {
            Some(SyntaxKind::ComparisonOp) => "Invalid value after comparison operator.",
            Some(SyntaxKind::ScalarExpression) => {
                let first = prev
                    .and_then(SyntaxElement::into_node)
                    .and_then(|scalar| scalar.first_child());
                if first.map(|child| child.kind()) == Some(SyntaxKind::Aggregate) {
                    "Invalid comparison operator after aggregator operator."
                } else {
                    "Invalid value after comparison operator."
                }
            }
            _ => "Invalid value after comparison operator.",
        },
        _ => "Invalid query.",
    }
}

/// Returns the previous sibling of `node`, skipping trivia.
fn prev_non_trivia_sibling(node: &SyntaxNode) -> Option<SyntaxElement> {
    let mut current = node.prev_sibling_or_token();
    while let Some(element) = current {
        if !element.kind().is_trivia() {
            return Some(element);
        }
        current = element.prev_sibling_or_token();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_never_flagged() {
        assert!(get_error_nodes("").is_empty());
        assert!(get_error_nodes("   ").is_empty());
        assert!(get_error_nodes("\n\t").is_empty());
    }

    #[test]
    fn test_hex_input_is_never_flagged() {
        // Raw trace ids, not query expressions.
        assert!(get_error_nodes("abcdef").is_empty());
        assert!(get_error_nodes("ABC123").is_empty());
        assert!(get_error_nodes("deadBEEF00").is_empty());
        assert!(get_error_nodes("  6f2d3e1a9b  ").is_empty());
        assert!(get_error_nodes("0").is_empty());
    }

    #[test]
    fn test_non_hex_garbage_is_flagged() {
        assert_eq!(get_error_nodes("abcxyz").len(), 1);
    }

    #[test]
    fn test_message_is_pure() {
        let nodes = get_error_nodes("{span.http.status_code = }");
        assert_eq!(nodes.len(), 1);
        let first = compute_error_message(&nodes[0]);
        let second = compute_error_message(&nodes[0]);
        assert_eq!(first, second);
    }
}
