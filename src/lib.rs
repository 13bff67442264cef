//! # Bookradar
//!
//! A book metadata source for bookradar.org. Given a partial identification (title,
//! authors, ISBN) it builds a search query, fetches the catalog's result page and
//! extracts one metadata [`Candidate`] per result block.
//!
//! ## Architecture
//!
//! - [`models`]: identification requests and metadata candidates
//! - [`sources`]: the [`Source`] trait, query building and result extraction
//! - [`utils`]: HTTP client, ISBN validation, search token normalization
//! - [`config`]: configuration management
//!
//! ```rust,no_run
//! use bookradar::models::IdentificationRequest;
//! use bookradar::sources::{BookradarSource, Source};
//! use std::sync::atomic::AtomicBool;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = BookradarSource::new()?;
//! let request = IdentificationRequest::new().isbn("9785932861578");
//!
//! let mut candidates: Vec<bookradar::Candidate> = Vec::new();
//! source
//!     .identify(&request, &mut candidates, &AtomicBool::new(false), Duration::from_secs(30))
//!     .await?;
//!
//! for candidate in &candidates {
//!     println!("{} - {}", candidate.title, candidate.authors_display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{Candidate, IdentificationRequest};
pub use sources::{BookradarSource, Source, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
