//! Autocomplete coordination for one mounted editor.
//!
//! The coordinator owns the attribute-metadata cache, the current time
//! window, and the completion-provider registration. Metadata refreshes are
//! fire-and-forget: an in-flight fetch is never cancelled, but each refresh
//! claims a monotonically increasing generation number and only commits its
//! result while it is still the newest request, so a slow old response can
//! never overwrite a newer one. The cache is replaced whole on commit -
//! readers always see either the previous cache or the new one, never a mix.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use traceql_ide::{complete, AttributeMetadataCache, CompletionItem};

use crate::metadata::{TagMetadataSource, TimeWindow};
use crate::surface::{CompletionProvider, CompletionRegistry, Disposable, TRACEQL_LANGUAGE_ID};

/// Host-supplied heuristic deciding whether a window change warrants a
/// refetch. Receives the previously seen window (if any) and the new one.
pub type RefreshPolicy = Box<dyn Fn(Option<TimeWindow>, TimeWindow) -> bool + Send + Sync>;

/// Attribute-metadata coordination for one mounted editor.
///
/// Constructed once per mounted editor instance and discarded on unmount.
pub struct AutocompleteCoordinator<M: TagMetadataSource + 'static> {
    inner: Arc<CoordinatorInner<M>>,
}

struct CoordinatorInner<M> {
    metadata: Arc<M>,
    lookback_secs: u64,
    policy: RefreshPolicy,
    window: Mutex<Option<TimeWindow>>,
    cache: Arc<RwLock<Arc<AttributeMetadataCache>>>,
    generation: AtomicU64,
    registration: Mutex<Option<Disposable>>,
}

impl<M: TagMetadataSource + 'static> AutocompleteCoordinator<M> {
    /// Creates a coordinator over the given metadata source.
    ///
    /// `lookback_secs` is the host-supplied duration controlling how far
    /// back attribute metadata is looked up.
    pub fn new(metadata: Arc<M>, lookback_secs: u64, policy: RefreshPolicy) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                metadata,
                lookback_secs,
                policy,
                window: Mutex::new(None),
                cache: Arc::new(RwLock::new(Arc::new(AttributeMetadataCache::default()))),
                generation: AtomicU64::new(0),
                registration: Mutex::new(None),
            }),
        }
    }

    /// Mounts the coordinator: registers the completion provider and
    /// triggers the first metadata refresh.
    pub fn mount(&self, registry: &dyn CompletionRegistry, window: TimeWindow) {
        let provider = Arc::new(CachedCompletionProvider {
            cache: Arc::clone(&self.inner.cache),
        });
        let registration = registry.register_provider(TRACEQL_LANGUAGE_ID, provider);
        *self.inner.registration.lock() = Some(registration);
        *self.inner.window.lock() = Some(window);
        self.spawn_refresh(window);
    }

    /// Records a time-window change, refetching when the host's policy says
    /// the change is meaningful.
    pub fn set_time_window(&self, window: TimeWindow) {
        let should_refresh = {
            let mut current = self.inner.window.lock();
            let should = (self.inner.policy)(*current, window);
            *current = Some(window);
            should
        };
        if should_refresh {
            self.spawn_refresh(window);
        }
    }

    /// Unmounts the coordinator: the provider registration is disposed.
    /// An in-flight fetch is left to finish on its own.
    pub fn unmount(&self) {
        if let Some(registration) = self.inner.registration.lock().take() {
            registration.dispose();
        }
    }

    /// Computes completion items from the current cache.
    #[must_use]
    pub fn complete(&self, query: &str, offset: u32) -> Vec<CompletionItem> {
        let cache = Arc::clone(&self.inner.cache.read());
        complete(query, offset, &cache)
    }

    /// Returns the current cache; the snapshot stays valid across refreshes.
    #[must_use]
    pub fn cache_snapshot(&self) -> Arc<AttributeMetadataCache> {
        Arc::clone(&self.inner.cache.read())
    }

    fn spawn_refresh(&self, window: TimeWindow) {
        let inner = Arc::clone(&self.inner);
        let ticket = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::spawn(async move {
            let result = inner
                .metadata
                .attribute_names(window, inner.lookback_secs)
                .await;
            match result {
                Ok(attributes) => {
                    if inner.generation.load(Ordering::SeqCst) != ticket {
                        debug!(ticket, "discarding stale metadata response");
                        return;
                    }
                    let mut cache = AttributeMetadataCache::default();
                    for attribute in attributes {
                        cache.insert(attribute.name, attribute.values);
                    }
                    debug!(attributes = cache.len(), "attribute metadata refreshed");
                    *inner.cache.write() = Arc::new(cache);
                }
                Err(error) => {
                    // Surfaced to the user by the host as a transient alert;
                    // never a marker, never fatal to the analysis loop.
                    warn!(%error, "attribute metadata refresh failed");
                }
            }
        });
    }
}

/// Completion provider backed by the coordinator's cache.
struct CachedCompletionProvider {
    cache: Arc<RwLock<Arc<AttributeMetadataCache>>>,
}

impl CompletionProvider for CachedCompletionProvider {
    fn provide(&self, query: &str, offset: u32) -> Vec<CompletionItem> {
        let cache = Arc::clone(&self.cache.read());
        complete(query, offset, &cache)
    }
}
