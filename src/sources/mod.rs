//! Metadata source plugins.
//!
//! This module defines the [`Source`] trait that metadata sources implement, the
//! capability flags they declare, and the [`ResultSink`] candidates are pushed to.
//!
//! A source receives an [`IdentificationRequest`], queries its catalog once, and
//! pushes every candidate it finds to the sink in page order. It never ranks or
//! deduplicates; that is up to the caller.

mod bookradar;
mod sink;

pub use bookradar::{
    build_query, parse_results, BookradarSource, SearchQuery, COMMENTS_MARKER, SOURCE_ID,
};
pub use sink::ResultSink;

use crate::models::IdentificationRequest;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

bitflags::bitflags! {
    /// Capabilities that a source can support
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SourceCapabilities: u32 {
        const IDENTIFY = 1 << 0;
        const COVER = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Metadata fields a source may populate
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TouchedFields: u32 {
        const TITLE = 1 << 0;
        const AUTHORS = 1 << 1;
        const ISBN = 1 << 2;
        const PUBLISHER = 1 << 3;
        const PUBDATE = 1 << 4;
    }
}

impl TouchedFields {
    /// Field names as the host application spells them
    pub fn field_names(&self) -> Vec<&'static str> {
        [
            (Self::TITLE, "title"),
            (Self::AUTHORS, "authors"),
            (Self::ISBN, "identifier:isbn"),
            (Self::PUBLISHER, "publisher"),
            (Self::PUBDATE, "pubdate"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

/// Descriptive metadata a source declares to its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub version: (u32, u32, u32),
    pub supported_platforms: &'static [&'static str],
}

/// The Source trait defines the interface for metadata source plugins.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Descriptive metadata for the host
    fn info(&self) -> SourceInfo;

    /// Describe the capabilities of this source
    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::IDENTIFY
    }

    /// Fields this source may fill in
    fn touched_fields(&self) -> TouchedFields;

    /// Whether the user can configure this source from the host
    fn is_customizable(&self) -> bool {
        false
    }

    /// Whether cached cover URLs stay valid
    fn cached_cover_url_is_reliable(&self) -> bool {
        false
    }

    /// Whether this source supports identify
    fn supports_identify(&self) -> bool {
        self.capabilities().contains(SourceCapabilities::IDENTIFY)
    }

    /// Whether this source can download covers
    fn supports_cover(&self) -> bool {
        self.capabilities().contains(SourceCapabilities::COVER)
    }

    /// Look up candidates for the request and push them to `sink`
    ///
    /// `abort` is checked after the network fetch. When it is set no results are
    /// produced and the call returns `Ok`. Only transport failures are errors.
    async fn identify(
        &self,
        _request: &IdentificationRequest,
        _sink: &mut dyn ResultSink,
        _abort: &AtomicBool,
        _timeout: Duration,
    ) -> Result<(), SourceError> {
        Err(SourceError::NotImplemented)
    }
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested operation is not implemented for this source
    #[error("Operation not implemented for this source")]
    NotImplemented,

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}
