//! Candidate model: one metadata record parsed from a search result block.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A book metadata record found by a source
///
/// Candidates are assembled once through [`CandidateBuilder`] and handed to the
/// caller as-is. The title and author list are always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Book title
    pub title: String,

    /// Authors in page order
    pub authors: Vec<String>,

    /// ISBN from the page, or the validated ISBN from the request
    pub isbn: Option<String>,

    /// Free-form description
    pub comments: Option<String>,

    /// Publisher name
    pub publisher: Option<String>,

    /// Publication date (January 1st of the publication year)
    pub pubdate: Option<NaiveDate>,

    /// Identifier of the source that produced this record
    pub source: String,
}

impl Candidate {
    /// Create a candidate with the required fields
    pub fn new(title: String, authors: Vec<String>, source: impl Into<String>) -> Self {
        Self {
            title,
            authors,
            isbn: None,
            comments: None,
            publisher: None,
            pubdate: None,
            source: source.into(),
        }
    }

    /// Authors joined for display
    pub fn authors_display(&self) -> String {
        self.authors.join(", ")
    }

    /// Publication year, if known
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.pubdate.map(|d| d.year())
    }

    /// Return a copy with whitespace runs collapsed and empty authors dropped
    pub fn cleaned(self) -> Self {
        Self {
            title: collapse_whitespace(&self.title),
            authors: self
                .authors
                .iter()
                .map(|a| collapse_whitespace(a))
                .filter(|a| !a.is_empty())
                .collect(),
            publisher: self
                .publisher
                .map(|p| collapse_whitespace(&p))
                .filter(|p| !p.is_empty()),
            ..self
        }
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builder for constructing Candidate objects
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    candidate: Candidate,
}

impl CandidateBuilder {
    /// Create a new builder with required fields
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            candidate: Candidate::new(title.into(), Vec::new(), source),
        }
    }

    /// Set authors
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.candidate.authors = authors;
        self
    }

    /// Set ISBN
    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.candidate.isbn = Some(isbn.into());
        self
    }

    /// Set comments
    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.candidate.comments = Some(comments.into());
        self
    }

    /// Set publisher
    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.candidate.publisher = Some(publisher.into());
        self
    }

    /// Set publication date
    pub fn pubdate(mut self, pubdate: NaiveDate) -> Self {
        self.candidate.pubdate = Some(pubdate);
        self
    }

    pub(crate) fn set_publisher(&mut self, publisher: &str) {
        self.candidate.publisher = Some(publisher.to_string());
    }

    pub(crate) fn set_pubdate(&mut self, pubdate: NaiveDate) {
        self.candidate.pubdate = Some(pubdate);
    }

    /// Build the Candidate
    pub fn build(self) -> Candidate {
        self.candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let candidate = CandidateBuilder::new("Title", "bookradar").build();
        assert_eq!(candidate.title, "Title");
        assert!(candidate.authors.is_empty());
        assert!(candidate.isbn.is_none());
        assert!(candidate.comments.is_none());
        assert!(candidate.publisher.is_none());
        assert!(candidate.pubdate.is_none());
        assert_eq!(candidate.source, "bookradar");
    }

    #[test]
    fn test_year() {
        let candidate = CandidateBuilder::new("Title", "bookradar")
            .pubdate(NaiveDate::from_ymd_opt(2005, 1, 1).unwrap())
            .build();
        assert_eq!(candidate.year(), Some(2005));
    }

    #[test]
    fn test_cleaned_collapses_whitespace() {
        let candidate = CandidateBuilder::new("  Python.\n   Подробный  справочник ", "bookradar")
            .authors(vec!["Дэвид   Бизли".to_string(), "   ".to_string()])
            .publisher(" Символ-Плюс ")
            .build()
            .cleaned();

        assert_eq!(candidate.title, "Python. Подробный справочник");
        assert_eq!(candidate.authors, vec!["Дэвид Бизли"]);
        assert_eq!(candidate.publisher.as_deref(), Some("Символ-Плюс"));
    }

    #[test]
    fn test_serialize_pubdate_as_iso_date() {
        let candidate = CandidateBuilder::new("Title", "bookradar")
            .pubdate(NaiveDate::from_ymd_opt(2005, 1, 1).unwrap())
            .build();
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["pubdate"], "2005-01-01");
    }
}
