//! Marker construction and offset-to-position mapping.
//!
//! The hosting editor consumes positioned diagnostics ("markers") with
//! 1-based line and column numbers, while the syntax tree speaks absolute
//! byte offsets. The mapping is driven by a line-length oracle supplied by
//! the host: `line_length(n)` is the length of the 1-based line `n`
//! excluding its terminating newline, which itself occupies one offset
//! position.

use traceql_syntax::SyntaxNode;

use crate::diagnostics::compute_error_message;
use crate::scope::get_warning_markers;

/// Diagnostic severity, numbered the way the hosting editor's marker API
/// expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MarkerSeverity {
    /// An editor hint.
    Hint = 1,
    /// Informational.
    Info = 2,
    /// A warning (yellow squiggle).
    Warning = 4,
    /// An error (red squiggle).
    Error = 8,
}

/// A positioned diagnostic consumed by the hosting editor.
///
/// All positions are 1-based. Markers are produced fresh on every analysis
/// pass; no identity persists between passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// The human-readable message.
    pub message: String,
    /// The severity.
    pub severity: MarkerSeverity,
    /// Start line, 1-based.
    pub start_line_number: u32,
    /// End line, 1-based.
    pub end_line_number: u32,
    /// Start column, 1-based.
    pub start_column: u32,
    /// End column, 1-based.
    pub end_column: u32,
}

/// Line-length oracle over the text under edit.
///
/// `line` is 1-based; the length excludes the terminating newline.
/// Out-of-range lines report 0.
pub trait LineLengths {
    /// Returns the length of the given 1-based line.
    fn line_length(&self, line: u32) -> u32;
}

/// A [`LineLengths`] oracle computed from a string.
#[derive(Debug, Clone)]
pub struct TextLineLengths {
    lengths: Vec<u32>,
}

impl TextLineLengths {
    /// Builds the oracle for the given text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            lengths: text.split('\n').map(|line| line.len() as u32).collect(),
        }
    }
}

impl LineLengths for TextLineLengths {
    fn line_length(&self, line: u32) -> u32 {
        if line == 0 {
            return 0;
        }
        self.lengths
            .get(line as usize - 1)
            .copied()
            .unwrap_or(0)
    }
}

/// Maps an absolute offset to a 1-based `(line, column)` pair.
///
/// The walk consumes `line_length(line) + 1` offsets per line (the `+ 1`
/// accounts for the newline) and keeps advancing while the remainder is
/// non-negative, so the first offset of a line lands on column 1 of that
/// line. The closing `+ 2` converts the loop's overshoot back into a
/// 1-based column.
fn position_for<L: LineLengths + ?Sized>(lines: &L, offset: u32) -> (u32, u32) {
    let mut line: u32 = 0;
    let mut remaining = i64::from(offset);
    while remaining >= 0 {
        line += 1;
        remaining -= i64::from(lines.line_length(line)) + 1;
    }
    let column = remaining + i64::from(lines.line_length(line)) + 2;
    (line, column as u32)
}

/// Builds a marker for the given offset span.
#[must_use]
pub fn get_marker<L: LineLengths + ?Sized>(
    severity: MarkerSeverity,
    message: impl Into<String>,
    lines: &L,
    from: u32,
    to: u32,
) -> Marker {
    let (start_line_number, start_column) = position_for(lines, from);
    let (end_line_number, end_column) = position_for(lines, to);
    Marker {
        message: message.into(),
        severity,
        start_line_number,
        end_line_number,
        start_column,
        end_column,
    }
}

/// Builds the complete marker set for one analysis pass: error markers for
/// the given error nodes first, then scope warnings.
///
/// The result is applied to the editing surface in a single call; markers
/// never carry state between passes.
#[must_use]
pub fn build_marker_set<L: LineLengths + ?Sized>(
    lines: &L,
    query: &str,
    error_nodes: &[SyntaxNode],
) -> Vec<Marker> {
    let mut markers: Vec<Marker> = error_nodes
        .iter()
        .map(|node| {
            let range = node.text_range();
            get_marker(
                MarkerSeverity::Error,
                compute_error_message(node),
                lines,
                range.start().into(),
                range.end().into(),
            )
        })
        .collect();
    markers.extend(get_warning_markers(MarkerSeverity::Warning, query, lines));
    markers
}
