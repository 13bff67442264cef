//! Identification request: the partial hints a caller has about a book.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier key consulted when building a search query
pub const ISBN_KEY: &str = "isbn";

/// Partial identifying information for a book
///
/// Every field is optional. Sources use whatever subset is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentificationRequest {
    /// Book title
    #[serde(default)]
    pub title: Option<String>,

    /// Authors in the order the caller knows them
    #[serde(default)]
    pub authors: Vec<String>,

    /// Identifiers keyed by type (`isbn`, ...)
    #[serde(default)]
    pub identifiers: HashMap<String, String>,
}

impl IdentificationRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append an author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Replace the author list
    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Add an identifier
    pub fn identifier(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.identifiers.insert(key.into(), value.into());
        self
    }

    /// Set the ISBN identifier
    pub fn isbn(self, isbn: impl Into<String>) -> Self {
        self.identifier(ISBN_KEY, isbn)
    }

    /// The raw ISBN identifier as supplied, unvalidated
    pub fn raw_isbn(&self) -> Option<&str> {
        self.identifiers.get(ISBN_KEY).map(String::as_str)
    }

    /// The first author, if any
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}
