//! bookradar.org metadata source implementation.
//!
//! bookradar.org has no API, so results are scraped from its search page. The
//! site is best suited for titles in Russian; its result listing labels the
//! publication year and publisher in Russian (`Год`, `Издательство`).

mod extract;
mod labels;
mod query;

pub use extract::{parse_results, COMMENTS_MARKER};
pub use query::{build_query, SearchQuery};

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::BookradarConfig;
use crate::models::IdentificationRequest;
use crate::sources::{
    ResultSink, Source, SourceCapabilities, SourceError, SourceInfo, TouchedFields,
};
use crate::utils::HttpClient;

/// Identifier of this source
pub const SOURCE_ID: &str = "bookradar";

const SOURCE_INFO: SourceInfo = SourceInfo {
    name: "Bookradar",
    description: "Searches for books metadata on bookradar.org, well-suited for titles in Russian.",
    author: "Igor `idle sign` Starikov",
    version: (0, 1, 0),
    supported_platforms: &["windows", "osx", "linux"],
};

/// bookradar.org metadata source
#[derive(Debug, Clone)]
pub struct BookradarSource {
    client: HttpClient,
    config: BookradarConfig,
}

impl BookradarSource {
    /// Create a source with the default configuration
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(BookradarConfig::default())
    }

    /// Create a source with the given configuration
    pub fn with_config(config: BookradarConfig) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::with_user_agent(&config.user_agent)?,
            config,
        })
    }

    /// The configuration this source was built with
    pub fn config(&self) -> &BookradarConfig {
        &self.config
    }

    /// Build the search query for a request against this source's endpoint
    pub fn search_query(&self, request: &IdentificationRequest) -> SearchQuery {
        build_query(request, &self.config.url_pattern)
    }

    async fn fetch_page(&self, url: &str, timeout: Duration) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get data from `{}`: {}", url, e);
                SourceError::Network(format!("Failed to get data from `{}`: {}", url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Bookradar returned status {} for `{}`", status, url);
        }

        response.text().await.map_err(|e| {
            tracing::error!("Failed to read response from `{}`: {}", url, e);
            SourceError::Network(format!("Failed to read response from `{}`: {}", url, e))
        })
    }
}

#[async_trait]
impl Source for BookradarSource {
    fn id(&self) -> &str {
        SOURCE_ID
    }

    fn name(&self) -> &str {
        SOURCE_INFO.name
    }

    fn info(&self) -> SourceInfo {
        SOURCE_INFO
    }

    fn capabilities(&self) -> SourceCapabilities {
        SourceCapabilities::IDENTIFY
    }

    fn touched_fields(&self) -> TouchedFields {
        TouchedFields::TITLE
            | TouchedFields::AUTHORS
            | TouchedFields::ISBN
            | TouchedFields::PUBLISHER
            | TouchedFields::PUBDATE
    }

    async fn identify(
        &self,
        request: &IdentificationRequest,
        sink: &mut dyn ResultSink,
        abort: &AtomicBool,
        timeout: Duration,
    ) -> Result<(), SourceError> {
        tracing::debug!("Bookradar identification started");

        let search = self.search_query(request);
        tracing::info!("Searching for: {}", search.query);

        if search.is_empty() {
            tracing::info!("No title, author or valid ISBN to search for, skipping request");
            return Ok(());
        }

        let html = self.fetch_page(&search.url, timeout).await?;

        if abort.load(Ordering::SeqCst) {
            tracing::debug!("Identification aborted, discarding response");
            return Ok(());
        }

        for candidate in parse_results(&html, search.isbn.as_deref()) {
            sink.put(candidate.cleaned());
        }

        Ok(())
    }
}
