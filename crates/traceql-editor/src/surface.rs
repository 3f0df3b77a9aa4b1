//! Contracts the hosting editor fulfils.
//!
//! The editing surface itself (rendering, cursor handling, key bindings)
//! lives outside this crate; these traits are the whole of what the
//! analysis layer consumes from it.

use std::fmt;
use std::sync::Arc;

use traceql_ide::{CompletionItem, LineLengths};

/// Language id used when registering the completion provider.
pub const TRACEQL_LANGUAGE_ID: &str = "traceql";

/// Marker owner tag: each `set_markers` call replaces this owner's full set.
pub const MARKER_OWNER: &str = "traceql";

/// The host editing surface, seen from the analysis side.
///
/// The line-length oracle drives offset-to-position mapping; marker
/// application is a full replacement per call, never incremental.
pub trait EditorSurface: LineLengths + Send + Sync {
    /// Replaces the complete marker set for the given owner tag.
    fn set_markers(&self, owner: &str, markers: Vec<traceql_ide::Marker>);
}

/// A single-shot cleanup handle returned by host registrations.
///
/// Dropping the handle also runs the cleanup, so a forgotten registration
/// cannot outlive its owner.
pub struct Disposable {
    cleanup: Option<Box<dyn FnOnce() + Send>>,
}

impl Disposable {
    /// Wraps a cleanup action.
    pub fn new(cleanup: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// A handle with nothing to clean up.
    #[must_use]
    pub fn noop() -> Self {
        Self { cleanup: None }
    }

    /// Runs the cleanup now.
    pub fn dispose(mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("armed", &self.cleanup.is_some())
            .finish()
    }
}

/// Supplies completion items on demand.
///
/// Requests are already request/response, so implementations are
/// synchronous and never debounced.
pub trait CompletionProvider: Send + Sync {
    /// Computes the items for the given cursor offset.
    fn provide(&self, query: &str, offset: u32) -> Vec<CompletionItem>;
}

/// The host's completion-provider registry.
pub trait CompletionRegistry {
    /// Registers a provider for a language id; the returned handle
    /// unregisters it.
    fn register_provider(
        &self,
        language_id: &str,
        provider: Arc<dyn CompletionProvider>,
    ) -> Disposable;
}
