//! Utility modules supporting metadata sources.
//!
//! - [`HttpClient`]: shared HTTP client with a crate user agent
//! - [`check_isbn`]: ISBN-10/13 check-digit validation and normalization
//! - [`title_tokens`] / [`author_tokens`]: search token normalization
//!
//! # ISBN validation
//!
//! ```rust
//! use bookradar::utils::check_isbn;
//!
//! assert_eq!(check_isbn("978-5-93286-157-8").as_deref(), Some("9785932861578"));
//! assert_eq!(check_isbn("9785932861579"), None);
//! ```

mod http;
mod isbn;
mod text;

pub use http::{HttpClient, DEFAULT_USER_AGENT};
pub use isbn::check_isbn;
pub use text::{author_tokens, title_tokens};
