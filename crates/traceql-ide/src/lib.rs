//! `traceql-ide` - Editing-time analysis for TraceQL.
//!
//! This crate provides the pure analysis layer between the syntax tree and
//! a hosting editor:
//!
//! - **Diagnostics**: Error-node collection and message synthesis
//! - **Scope lint**: Performance warnings for unscoped attribute references
//! - **Markers**: Offset-to-position mapping and marker assembly
//! - **Completion**: Context-aware suggestions from cached attribute metadata
//!
//! # Architecture
//!
//! Every function here is a pure function of `(query text, inputs)`: no
//! caches survive between calls, each analysis pass reparses from scratch,
//! and the same inputs always produce the same markers. Lifecycles, timers,
//! and asynchronous metadata live one layer up, in `traceql-editor`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod completion;
pub mod diagnostics;
pub mod markers;
pub mod scope;

pub use completion::{complete, AttributeMetadataCache, CompletionItem, CompletionKind};
pub use diagnostics::{compute_error_message, get_error_nodes};
pub use markers::{
    build_marker_set, get_marker, LineLengths, Marker, MarkerSeverity, TextLineLengths,
};
pub use scope::{get_warning_markers, SCOPE_WARNING_MESSAGE};
