//! The live re-analysis loop.
//!
//! Every content change triggers two passes over the text:
//!
//! 1. an immediate, synchronous pass that applies all markers except those
//!    for error nodes whose span contains the cursor - the user is never
//!    shown a squiggle under the character they are actively typing;
//! 2. a delayed full pass behind a debounce timer, so only the analysis of
//!    the last pause in typing is shown in full.
//!
//! The timer is a single cancellable slot: each change aborts the pending
//! task and arms a fresh one. Unmounting aborts the slot and nothing else
//! runs afterwards.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use traceql_ide::{build_marker_set, get_error_nodes};
use traceql_syntax::SyntaxNode;

use crate::surface::{EditorSurface, MARKER_OWNER};

/// Quiet period after the last keystroke before the full marker set is
/// applied.
pub const FULL_ANALYSIS_DELAY: Duration = Duration::from_millis(500);

/// Debounced re-analysis for one mounted editor.
///
/// Calls must happen on the editor's (single-threaded) async runtime; all
/// analysis itself is synchronous, the runtime is only used for the
/// debounce timer.
pub struct LiveAnalysis<S: EditorSurface + 'static> {
    inner: Arc<LiveInner<S>>,
}

struct LiveInner<S> {
    surface: Arc<S>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<S: EditorSurface + 'static> LiveAnalysis<S> {
    /// Mounts the loop and runs one immediate full analysis, covering
    /// pre-existing text (for example after a reload).
    pub fn mount(surface: Arc<S>, initial_text: &str) -> Self {
        let this = Self {
            inner: Arc::new(LiveInner {
                surface,
                pending: Mutex::new(None),
            }),
        };
        this.inner.apply_full(initial_text);
        this
    }

    /// Handles one content change.
    ///
    /// `cursor_offset` is the edit position; error nodes whose span contains
    /// it are withheld from the immediate pass. The delayed pass applies the
    /// complete set and is re-armed (not extended) by every further change.
    pub fn on_content_change(&self, text: &str, cursor_offset: u32) {
        let mut pending = self.inner.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let visible: Vec<SyntaxNode> = get_error_nodes(text)
            .into_iter()
            .filter(|node| !span_contains(node, cursor_offset))
            .collect();
        let markers = build_marker_set(self.inner.surface.as_ref(), text, &visible);
        self.inner.surface.set_markers(MARKER_OWNER, markers);

        let inner = Arc::clone(&self.inner);
        let text = text.to_owned();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(FULL_ANALYSIS_DELAY).await;
            debug!("debounce elapsed, applying full marker set");
            inner.apply_full(&text);
        }));
    }

    /// Unmounts the loop: the pending timer is cancelled and no further
    /// analysis runs.
    pub fn unmount(&self) {
        if let Some(handle) = self.inner.pending.lock().take() {
            handle.abort();
        }
    }
}

impl<S: EditorSurface> LiveInner<S> {
    fn apply_full(&self, text: &str) {
        let errors = get_error_nodes(text);
        let markers = build_marker_set(self.surface.as_ref(), text, &errors);
        self.surface.set_markers(MARKER_OWNER, markers);
    }
}

fn span_contains(node: &SyntaxNode, offset: u32) -> bool {
    let range = node.text_range();
    u32::from(range.start()) <= offset && offset <= u32::from(range.end())
}
