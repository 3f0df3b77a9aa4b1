//! The attribute-metadata service contract.

use async_trait::async_trait;
use smol_str::SmolStr;

/// The data lookback window metadata is fetched for.
///
/// Owned by the host and handed in on every change; `None` bounds mean
/// "unbounded" on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeWindow {
    /// Window start, seconds since the epoch.
    pub from: Option<i64>,
    /// Window end, seconds since the epoch.
    pub to: Option<i64>,
}

/// One attribute known to the metadata service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInfo {
    /// The attribute name, without scope prefix.
    pub name: SmolStr,
    /// Sample values observed for the attribute.
    pub values: Vec<SmolStr>,
}

impl AttributeInfo {
    /// An attribute with no known values.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Attaches value samples.
    #[must_use]
    pub fn with_values(mut self, values: Vec<SmolStr>) -> Self {
        self.values = values;
        self
    }
}

/// Failure of a metadata fetch.
///
/// Fetch failures never become editor markers; the host surfaces them as a
/// transient alert and typing continues undisturbed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// The request reached the service and failed.
    #[error("metadata request failed: {0}")]
    Request(String),
    /// The service could not be reached.
    #[error("metadata service unavailable")]
    Unavailable,
}

/// Asynchronous source of attribute metadata, keyed by time window.
#[async_trait]
pub trait TagMetadataSource: Send + Sync {
    /// Fetches the attributes (and value samples) visible in the window,
    /// looking back at most `lookback_secs`.
    async fn attribute_names(
        &self,
        window: TimeWindow,
        lookback_secs: u64,
    ) -> Result<Vec<AttributeInfo>, MetadataError>;
}
