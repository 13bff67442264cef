//! Search query construction for bookradar.org.

use crate::config::QUERY_PLACEHOLDER;
use crate::models::IdentificationRequest;
use crate::utils::{author_tokens, check_isbn, title_tokens};

/// A search string and the request URL built from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Space-joined search tokens
    pub query: String,

    /// Request URL with the encoded query substituted in
    pub url: String,

    /// The request's ISBN, if it passed validation
    pub isbn: Option<String>,
}

impl SearchQuery {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

/// Build the search query for a request
///
/// Tokens are ordered title, first author, ISBN. An ISBN failing its check digit
/// is dropped. This never fails; with no usable hints the query is empty.
pub fn build_query(request: &IdentificationRequest, url_pattern: &str) -> SearchQuery {
    let mut tokens: Vec<String> = Vec::new();

    if let Some(title) = request.title.as_deref() {
        tokens.extend(title_tokens(title));
    }

    if let Some(author) = request.first_author() {
        tokens.extend(author_tokens(author));
    }

    let isbn = request.raw_isbn().and_then(check_isbn);
    if let Some(isbn) = &isbn {
        tokens.push(isbn.clone());
    }

    let query = tokens.join(" ");
    let url = url_pattern.replace(QUERY_PLACEHOLDER, &urlencoding::encode(&query));

    SearchQuery { query, url, isbn }
}
