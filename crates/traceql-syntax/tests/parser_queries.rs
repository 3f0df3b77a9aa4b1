//! Parser tests over well-formed queries.

use traceql_syntax::parser::parse;
use traceql_syntax::SyntaxKind;

fn error_count(source: &str) -> usize {
    parse(source)
        .syntax()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::Error)
        .count()
}

#[test]
fn valid_queries_produce_no_error_nodes() {
    let queries = [
        "{}",
        "{ }",
        r#"{ span.component = "http" }"#,
        r#"{ resource.component = "http" }"#,
        r#"{ parent.component = "http" }"#,
        r#"{ .component = "http" || .http.status_code = 200 }"#,
        "{.foo=300}",
        "{ duration > 300ms }",
        "{ status = error }",
        "{ kind = unset }",
        r#"{ name =~ "GET.*" }"#,
        "{ .foo = -3 }",
        "{ childCount > 2 }",
        "{ .a = 1 && .b = 2 }",
        "{ (.a = 1 || .b = 2) && duration < 1s }",
        "{ parent.span.http.status_code = 200 }",
        "{.foo=1} | by(.bar)",
        "{.foo=1} | by(span.component, resource.component)",
        "{} | select(.a, resource.b)",
        "{} | coalesce()",
        "{} | count() > 2",
        "{} | avg(duration) >= 1.5s",
        "{} | sum(.bytes) = 100",
        "{.a=1} && {.b=2}",
        "{.a=1} || {.b=2}",
        "{.a=1} >> {.b=2}",
        "{.a=1} << {.b=2}",
        "{.a=1} ~ {.b=2}",
        "{.a=1} | by(.b) | count() > 1",
    ];

    for query in queries {
        let parsed = parse(query);
        assert!(
            parsed.ok(),
            "query {query:?} reported errors: {:?}",
            parsed.errors()
        );
        assert_eq!(error_count(query), 0, "query {query:?} grew error nodes");
    }
}

#[test]
fn root_is_query_node() {
    let root = parse("{}").syntax();
    assert_eq!(root.kind(), SyntaxKind::Query);
}

#[test]
fn filter_expression_is_wrapped() {
    // Even a lone operand inside a filter gets a FieldExpression wrapper.
    let root = parse("{ duration }").syntax();
    let filter = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::SpansetFilter)
        .expect("spanset filter");
    let expr = filter
        .children()
        .find(|node| node.kind() == SyntaxKind::FieldExpression)
        .expect("field expression");
    assert_eq!(
        expr.first_child().map(|node| node.kind()),
        Some(SyntaxKind::IntrinsicField)
    );
}

#[test]
fn binary_expression_nests_operands() {
    let root = parse("{ .a = 1 }").syntax();
    let outer = root
        .descendants()
        .find(|node| {
            node.kind() == SyntaxKind::FieldExpression
                && node.children().any(|c| c.kind() == SyntaxKind::FieldOp)
        })
        .expect("binary field expression");

    let kinds: Vec<_> = outer.children().map(|node| node.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::FieldExpression,
            SyntaxKind::FieldOp,
            SyntaxKind::FieldExpression,
        ]
    );
}

#[test]
fn logical_operators_stay_bare_tokens() {
    let root = parse("{ .a = 1 && .b = 2 }").syntax();
    let has_and_token = root
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .any(|token| token.kind() == SyntaxKind::And);
    assert!(has_and_token);
    // && is never wrapped in a FieldOp node.
    let field_ops: Vec<_> = root
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::FieldOp)
        .collect();
    assert_eq!(field_ops.len(), 2, "one FieldOp per comparison");
}

#[test]
fn attribute_field_spans_all_name_segments() {
    let source = "{ .http.status_code = 200 }";
    let root = parse(source).syntax();
    let attr = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::AttributeField)
        .expect("attribute field");
    let text = attr.text().to_string();
    assert_eq!(text, ".http.status_code");
    // One AttributeField regardless of how many dotted segments.
    assert_eq!(
        root.descendants()
            .filter(|node| node.kind() == SyntaxKind::AttributeField)
            .count(),
        1
    );
}

#[test]
fn scoped_attribute_keeps_scope_token_first() {
    let root = parse("{ span.component = 1 }").syntax();
    let attr = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::AttributeField)
        .expect("attribute field");
    let first_token = attr
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| !token.kind().is_trivia())
        .expect("first token");
    assert_eq!(first_token.kind(), SyntaxKind::KwSpan);
}

#[test]
fn pipeline_stages_are_siblings_of_pipe() {
    let root = parse("{.a=1} | by(.b)").syntax();
    let pipeline = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::SpansetPipelineExpression)
        .expect("pipeline");
    let kinds: Vec<_> = pipeline
        .children_with_tokens()
        .filter(|element| !element.kind().is_trivia())
        .map(|element| element.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::SpansetFilter,
            SyntaxKind::Pipe,
            SyntaxKind::GroupOperation,
        ]
    );
}

#[test]
fn combined_spansets_nest_left_associatively() {
    let root = parse("{.a=1} && {.b=2} && {.c=3}").syntax();
    let outer = root.first_child().expect("outer pipeline expression");
    assert_eq!(outer.kind(), SyntaxKind::SpansetPipelineExpression);
    let inner = outer.first_child().expect("inner pipeline expression");
    assert_eq!(inner.kind(), SyntaxKind::SpansetPipelineExpression);
    assert!(inner
        .children()
        .any(|node| node.kind() == SyntaxKind::SpansetPipelineExpression));
}
