//! Integration tests for diagnostics, scope warnings, and markers.

use traceql_ide::{
    build_marker_set, compute_error_message, get_error_nodes, get_warning_markers, MarkerSeverity,
    TextLineLengths, SCOPE_WARNING_MESSAGE,
};

fn first_message(query: &str) -> &'static str {
    let nodes = get_error_nodes(query);
    assert!(!nodes.is_empty(), "expected an error node for {query:?}");
    compute_error_message(&nodes[0])
}

// =============================================================================
// Short-circuit policy
// =============================================================================

#[test]
fn test_empty_and_hex_inputs_are_never_flagged() {
    for query in [
        "",
        "   ",
        "abcdef",
        "ABCDEF",
        "0123456789abcdef",
        "d0cafe",
        "  6f2d3e1a9b4c  ",
    ] {
        assert!(
            get_error_nodes(query).is_empty(),
            "query {query:?} must not be flagged"
        );
    }
}

#[test]
fn test_non_hex_invalid_input_is_flagged() {
    assert!(!get_error_nodes("abcxyz").is_empty());
    assert!(!get_error_nodes("abcdefg").is_empty());
}

// =============================================================================
// Valid queries
// =============================================================================

#[test]
fn test_valid_queries_have_no_error_nodes() {
    for query in [
        r#"{ span.component = "http" }"#,
        r#"{ resource.component = "http" }"#,
        r#"{ .component = "http" || .http.status_code = 200 }"#,
        "{.foo=300}",
        "{ duration > 300ms && status = error }",
        "{.foo=1} | by(.bar)",
        "{} | count() > 2",
        "{.a=1} && {.b=2}",
    ] {
        assert!(
            get_error_nodes(query).is_empty(),
            "query {query:?} must not be flagged"
        );
    }
}

// =============================================================================
// Error messages
// =============================================================================

#[test]
fn test_missing_value_after_comparison() {
    assert_eq!(
        first_message("{span.http.status_code = }"),
        "Invalid value after comparison or arithmetic operator."
    );
}

#[test]
fn test_missing_comparison_after_field() {
    assert_eq!(
        first_message("{span.http.status_code 200}"),
        "Invalid comparison operator after field expression."
    );
}

#[test]
fn test_aggregate_without_comparison() {
    assert_eq!(
        first_message("{.foo=300} | avg(.value)"),
        "Invalid comparison operator after aggregator operator."
    );
}

#[test]
fn test_unparseable_query() {
    assert_eq!(first_message("abcxyz"), "Invalid query.");
}

#[test]
fn test_empty_by() {
    assert_eq!(
        first_message("{.foo=1} | by()"),
        "Invalid expression for by operator."
    );
}

#[test]
fn test_empty_select() {
    assert_eq!(
        first_message("{.foo=1} | select()"),
        "Invalid expression for select operator."
    );
}

#[test]
fn test_empty_aggregate_argument() {
    assert_eq!(
        first_message("{.foo=1} | avg() > 1"),
        "Invalid expression for aggregator operator."
    );
}

#[test]
fn test_missing_value_after_logical_operator() {
    assert_eq!(
        first_message("{ .a = 1 && }"),
        "Invalid value after logical operator."
    );
    assert_eq!(
        first_message("{ .a = 1 || }"),
        "Invalid value after logical operator."
    );
}

#[test]
fn test_trailing_pipe() {
    assert_eq!(
        first_message("{.a=1} | "),
        "Invalid aggregation operator after pipeline operator."
    );
}

#[test]
fn test_juxtaposed_spansets() {
    assert_eq!(
        first_message("{.a=1} {.b=2}"),
        "Invalid spanset combining operator after spanset expression."
    );
}

#[test]
fn test_dangling_combining_operator() {
    assert_eq!(
        first_message("{.a=1} && "),
        "Invalid spanset expression after spanset combining operator."
    );
}

#[test]
fn test_dot_without_name() {
    assert_eq!(first_message("{ . }"), "Invalid expression for spanset.");
}

#[test]
fn test_missing_value_after_scalar_comparison() {
    assert_eq!(
        first_message("{.foo=300} | avg(.value) > "),
        "Invalid value after comparison operator."
    );
}

// =============================================================================
// Scope warnings
// =============================================================================

fn warnings(query: &str) -> Vec<traceql_ide::Marker> {
    get_warning_markers(MarkerSeverity::Warning, query, &TextLineLengths::new(query))
}

#[test]
fn test_scoped_attributes_produce_no_warnings() {
    assert!(warnings(r#"{ span.component = "http" }"#).is_empty());
    assert!(warnings(r#"{ resource.component = "http" }"#).is_empty());
    assert!(warnings(r#"{ parent.component = "http" }"#).is_empty());
}

#[test]
fn test_unscoped_attribute_warns_at_leading_dot() {
    let markers = warnings(r#"{ .component = "http" }"#);
    assert_eq!(markers.len(), 1);
    let marker = &markers[0];
    assert_eq!(marker.message, SCOPE_WARNING_MESSAGE);
    assert_eq!(marker.severity, MarkerSeverity::Warning);
    assert_eq!(marker.start_line_number, 1);
    assert_eq!(marker.end_line_number, 1);
    assert_eq!(marker.start_column, 3);
    assert_eq!(marker.end_column, 3);
}

#[test]
fn test_multiple_unscoped_attributes_warn_independently() {
    let markers = warnings(r#"{ .component = "http" || .http.status_code = 200 }"#);
    assert_eq!(markers.len(), 2);
    assert_eq!(
        (markers[0].start_column, markers[0].end_column),
        (3, 3)
    );
    assert_eq!(
        (markers[1].start_column, markers[1].end_column),
        (26, 26)
    );
}

// =============================================================================
// Marker assembly
// =============================================================================

#[test]
fn test_marker_set_orders_errors_before_warnings() {
    let query = "{ .foo 200 }";
    let lines = TextLineLengths::new(query);
    let errors = get_error_nodes(query);
    assert_eq!(errors.len(), 1);

    let markers = build_marker_set(&lines, query, &errors);
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].severity, MarkerSeverity::Error);
    assert_eq!(
        markers[0].message,
        "Invalid comparison operator after field expression."
    );
    assert_eq!(markers[1].severity, MarkerSeverity::Warning);
    assert_eq!(markers[1].message, SCOPE_WARNING_MESSAGE);
}

#[test]
fn test_error_marker_positions() {
    let query = "abcxyz";
    let lines = TextLineLengths::new(query);
    let errors = get_error_nodes(query);
    let markers = build_marker_set(&lines, query, &errors);
    assert_eq!(markers.len(), 1);
    let marker = &markers[0];
    assert_eq!(marker.start_line_number, 1);
    assert_eq!(marker.start_column, 1);
    assert_eq!(marker.end_line_number, 1);
    assert_eq!(marker.end_column, 7);
}

#[test]
fn test_marker_positions_on_second_line() {
    let query = "{.a=1}\n{.b=2}";
    let lines = TextLineLengths::new(query);
    let errors = get_error_nodes(query);
    assert_eq!(errors.len(), 1, "juxtaposed spansets");

    let markers = build_marker_set(&lines, query, &errors);
    let marker = &markers[0];
    assert_eq!(marker.start_line_number, 2);
    assert_eq!(marker.start_column, 1);
    assert_eq!(marker.end_line_number, 2);
    assert_eq!(marker.end_column, 7);
}
