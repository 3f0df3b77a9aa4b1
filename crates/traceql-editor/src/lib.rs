//! `traceql-editor` - Host integration for TraceQL editing assistance.
//!
//! This crate is the stateful layer between the pure analysis functions of
//! `traceql-ide` and a hosting editor component:
//!
//! - **Live analysis loop**: Debounced re-validation on every content change
//! - **Autocomplete coordinator**: Attribute-metadata lifecycle per mounted
//!   editor
//! - **Host contracts**: The traits the editing surface and metadata
//!   service fulfil
//!
//! # Concurrency model
//!
//! Single logical thread, cooperative and event-driven. The only suspension
//! points are the debounce timer (a single cancel-and-replace slot) and the
//! metadata fetch (fire-and-forget, guarded by a request generation so
//! out-of-order responses are discarded rather than committed).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod autocomplete;
pub mod live_analysis;
pub mod metadata;
pub mod surface;

pub use autocomplete::{AutocompleteCoordinator, RefreshPolicy};
pub use live_analysis::{LiveAnalysis, FULL_ANALYSIS_DELAY};
pub use metadata::{AttributeInfo, MetadataError, TagMetadataSource, TimeWindow};
pub use surface::{
    CompletionProvider, CompletionRegistry, Disposable, EditorSurface, MARKER_OWNER,
    TRACEQL_LANGUAGE_ID,
};
