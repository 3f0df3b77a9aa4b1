//! Context-aware completion for TraceQL editing.
//!
//! Completion is request/response: the host asks for items at a cursor
//! offset and gets them synchronously from the current attribute-metadata
//! cache plus the language's fixed vocabulary. No debouncing is involved.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;
use traceql_syntax::{lex, Token, TokenKind};

/// The kind of completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    /// An attribute scope (`span.`, `resource.`, ...).
    Scope,
    /// An intrinsic field (`duration`, `name`, ...).
    Intrinsic,
    /// An attribute name from the metadata cache.
    Attribute,
    /// A known attribute value.
    Value,
    /// A pipeline function (`by`, `count`, ...).
    Function,
}

/// A completion item.
#[derive(Debug, Clone)]
pub struct CompletionItem {
    /// The label shown in the completion list.
    pub label: SmolStr,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Additional detail shown next to the label.
    pub detail: Option<SmolStr>,
    /// Text to insert (if different from label).
    pub insert_text: Option<SmolStr>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Creates a new completion item.
    pub fn new(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the insert text.
    #[must_use]
    pub fn with_insert_text(mut self, text: impl Into<SmolStr>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Sets the sort priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }
}

/// Attribute names and value samples known for the current time window.
///
/// One cache belongs to one mounted editor. It is built whole by the
/// autocomplete coordinator and replaced whole on refresh, never merged.
#[derive(Debug, Clone, Default)]
pub struct AttributeMetadataCache {
    entries: FxHashMap<SmolStr, Vec<SmolStr>>,
}

impl AttributeMetadataCache {
    /// Records an attribute and its known value samples.
    pub fn insert(&mut self, name: impl Into<SmolStr>, values: Vec<SmolStr>) {
        self.entries.insert(name.into(), values);
    }

    /// Iterates over the known attribute names.
    pub fn names(&self) -> impl Iterator<Item = &SmolStr> {
        self.entries.keys()
    }

    /// Returns the known value samples for an attribute.
    #[must_use]
    pub fn values_of(&self, name: &str) -> Option<&[SmolStr]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Returns the number of known attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no attributes are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const SCOPES: &[&str] = &["span", "resource", "parent", "event", "instrumentation", "link"];

const INTRINSICS: &[&str] = &[
    "duration",
    "name",
    "status",
    "statusMessage",
    "kind",
    "rootName",
    "rootServiceName",
    "traceDuration",
    "childCount",
];

const PIPELINE_FUNCTIONS: &[&str] = &["by", "select", "coalesce"];

const AGGREGATES: &[&str] = &["count", "avg", "max", "min", "sum"];

const STATIC_VALUES: &[&str] = &["true", "false", "nil", "ok", "error", "unset"];

/// The cursor context completion dispatches on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CompletionContext {
    /// Right after `{`, `&&`, `||`, or `(`: a field expression can start.
    FilterStart,
    /// Right after a dot: an attribute name is expected.
    AttributeName,
    /// Right after `|`: a pipeline stage is expected.
    PipelineStage,
    /// Right after a comparison operator, possibly with a known attribute
    /// on its left.
    ComparisonValue(Option<SmolStr>),
    /// Anywhere else.
    General,
}

/// Computes completion items for the cursor position.
#[must_use]
pub fn complete(query: &str, offset: u32, cache: &AttributeMetadataCache) -> Vec<CompletionItem> {
    let tokens = lex(query);
    let context = detect_context(query, &tokens, offset);
    debug!(?context, offset, "completion request");

    let mut items = match context {
        CompletionContext::FilterStart => {
            let mut items = vocabulary_items();
            items.extend(cache.names().map(|name| {
                CompletionItem::new(name.clone(), CompletionKind::Attribute)
                    .with_insert_text(format!(".{name}"))
                    .with_priority(30)
            }));
            items
        }
        CompletionContext::AttributeName => cache
            .names()
            .map(|name| {
                CompletionItem::new(name.clone(), CompletionKind::Attribute).with_priority(10)
            })
            .collect(),
        CompletionContext::PipelineStage => PIPELINE_FUNCTIONS
            .iter()
            .map(|name| {
                CompletionItem::new(*name, CompletionKind::Function)
                    .with_insert_text(format!("{name}("))
                    .with_priority(10)
            })
            .chain(AGGREGATES.iter().map(|name| {
                CompletionItem::new(*name, CompletionKind::Function)
                    .with_insert_text(format!("{name}("))
                    .with_priority(20)
            }))
            .collect(),
        CompletionContext::ComparisonValue(attribute) => {
            let mut items: Vec<CompletionItem> = attribute
                .as_deref()
                .and_then(|name| cache.values_of(name))
                .into_iter()
                .flatten()
                .map(|value| {
                    let item =
                        CompletionItem::new(value.clone(), CompletionKind::Value).with_priority(10);
                    if value.chars().all(|c| c.is_ascii_digit() || c == '.') {
                        item
                    } else {
                        item.with_insert_text(format!("\"{value}\""))
                    }
                })
                .collect();
            items.extend(STATIC_VALUES.iter().map(|value| {
                CompletionItem::new(*value, CompletionKind::Value).with_priority(20)
            }));
            items
        }
        CompletionContext::General => vocabulary_items(),
    };

    items.sort_by(|a, b| {
        a.sort_priority
            .cmp(&b.sort_priority)
            .then_with(|| a.label.cmp(&b.label))
    });
    items
}

/// Scope and intrinsic items offered wherever a field reference can start.
fn vocabulary_items() -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = SCOPES
        .iter()
        .map(|scope| {
            CompletionItem::new(*scope, CompletionKind::Scope)
                .with_insert_text(format!("{scope}."))
                .with_priority(10)
        })
        .collect();
    items.extend(INTRINSICS.iter().map(|intrinsic| {
        CompletionItem::new(*intrinsic, CompletionKind::Intrinsic).with_priority(20)
    }));
    items
}

/// Classifies the cursor position by the token immediately before it.
fn detect_context(query: &str, tokens: &[Token], offset: u32) -> CompletionContext {
    let Some(index) = tokens
        .iter()
        .rposition(|token| !token.kind.is_trivia() && u32::from(token.range.end()) <= offset)
    else {
        return CompletionContext::General;
    };

    match tokens[index].kind {
        TokenKind::Dot => CompletionContext::AttributeName,
        // Mid-word with a dot right in front of it: still an attribute name.
        kind if kind.can_be_attribute_name()
            && index > 0
            && tokens[index - 1].kind == TokenKind::Dot
            && tokens[index - 1].range.end() == tokens[index].range.start() =>
        {
            CompletionContext::AttributeName
        }
        TokenKind::LBrace | TokenKind::LParen | TokenKind::And | TokenKind::Or => {
            CompletionContext::FilterStart
        }
        TokenKind::Pipe => CompletionContext::PipelineStage,
        kind if kind.is_comparison() || matches!(kind, TokenKind::RegexEq | TokenKind::RegexNeq) => {
            CompletionContext::ComparisonValue(attribute_before(query, tokens, index))
        }
        _ => CompletionContext::General,
    }
}

/// Reconstructs the attribute name to the left of the operator at
/// `op_index`, stripped of any scope prefix and leading dot.
fn attribute_before(query: &str, tokens: &[Token], op_index: usize) -> Option<SmolStr> {
    let mut index = op_index;
    // Skip the trivia between the attribute and the operator.
    loop {
        index = index.checked_sub(1)?;
        if !tokens[index].kind.is_trivia() {
            break;
        }
    }

    // Collect the contiguous run of name segments and dots.
    let mut start = index;
    let end = index;
    if !tokens[end].kind.can_be_attribute_name() {
        return None;
    }
    while start > 0 {
        let prev = &tokens[start - 1];
        if prev.kind == TokenKind::Dot || prev.kind.can_be_attribute_name() {
            start -= 1;
        } else {
            break;
        }
    }

    let from = usize::from(tokens[start].range.start());
    let to = usize::from(tokens[end].range.end());
    let mut name = &query[from..to];

    // `span.component` and `.component` both key the cache as `component`.
    for scope in SCOPES {
        if let Some(rest) = name.strip_prefix(scope) {
            if let Some(rest) = rest.strip_prefix('.') {
                name = rest;
                break;
            }
        }
    }
    let name = name.strip_prefix('.').unwrap_or(name);

    if name.is_empty() {
        None
    } else {
        Some(SmolStr::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> AttributeMetadataCache {
        let mut cache = AttributeMetadataCache::default();
        cache.insert(
            "component",
            vec![SmolStr::new("http"), SmolStr::new("grpc")],
        );
        cache.insert("http.status_code", vec![SmolStr::new("200")]);
        cache
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn test_filter_start_offers_scopes_and_intrinsics() {
        let query = "{ ";
        let items = complete(query, 2, &cache());
        let labels = labels(&items);
        assert!(labels.contains(&"span"));
        assert!(labels.contains(&"resource"));
        assert!(labels.contains(&"duration"));
        assert!(labels.contains(&"component"));
    }

    #[test]
    fn test_after_dot_offers_cached_attributes() {
        let query = "{ .";
        let items = complete(query, 3, &cache());
        assert!(items
            .iter()
            .all(|item| item.kind == CompletionKind::Attribute));
        let labels = labels(&items);
        assert!(labels.contains(&"component"));
        assert!(labels.contains(&"http.status_code"));
    }

    #[test]
    fn test_after_pipe_offers_pipeline_functions() {
        let query = "{.a=1} | ";
        let items = complete(query, 9, &cache());
        let labels = labels(&items);
        assert!(labels.contains(&"by"));
        assert!(labels.contains(&"count"));
        assert!(labels.contains(&"avg"));
    }

    #[test]
    fn test_after_comparison_offers_values_for_attribute() {
        let query = "{ .component = ";
        let items = complete(query, 15, &cache());
        let values: Vec<_> = items
            .iter()
            .filter(|item| item.kind == CompletionKind::Value && item.sort_priority == 10)
            .map(|item| item.label.as_str())
            .collect();
        assert_eq!(values, vec!["grpc", "http"]);
        // String values insert quoted.
        let http = items.iter().find(|item| item.label == "http").unwrap();
        assert_eq!(http.insert_text.as_deref(), Some("\"http\""));
    }

    #[test]
    fn test_scoped_attribute_shares_value_cache() {
        let query = "{ span.component = ";
        let items = complete(query, 19, &cache());
        assert!(items.iter().any(|item| item.label == "http"));
    }

    #[test]
    fn test_empty_cache_still_offers_static_values() {
        let query = "{ .component = ";
        let items = complete(query, 15, &AttributeMetadataCache::default());
        let labels = labels(&items);
        assert!(labels.contains(&"true"));
        assert!(labels.contains(&"error"));
    }
}
