//! Search token normalization for titles and author names.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Words that carry no search value in a title
const TITLE_JOINERS: &[&str] = &["a", "an", "and", "the"];

/// Name particles and placeholders skipped in author tokens
const AUTHOR_SKIP: &[&str] = &["von", "van", "unknown"];

static BRACKETED: OnceLock<Regex> = OnceLock::new();

fn bracketed() -> &'static Regex {
    BRACKETED.get_or_init(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").expect("valid regex"))
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
}

/// Tokenize a title for searching
///
/// Bracketed and parenthesized segments (series info, edition notes) are removed,
/// punctuation separates words, and common English joiners are dropped.
pub fn title_tokens(title: &str) -> Vec<String> {
    let title: String = title.nfc().collect();
    let title = bracketed().replace_all(&title, " ");

    words(&title)
        .filter(|w| !TITLE_JOINERS.contains(&w.as_str()))
        .collect()
}

/// Tokenize an author name for searching
///
/// `Last, First` is reordered to `First Last`. Initials and single letters are
/// dropped along with common name particles.
pub fn author_tokens(author: &str) -> Vec<String> {
    let author: String = author.nfc().collect();

    let parts: Vec<&str> = match author.split_once(',') {
        Some((last, first)) => vec![first, last],
        None => vec![author.as_str()],
    };

    parts
        .into_iter()
        .flat_map(words)
        .filter(|w| w.chars().count() > 1)
        .filter(|w| !AUTHOR_SKIP.contains(&w.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_tokens_basic() {
        assert_eq!(
            title_tokens("Opencv Computer Vision"),
            vec!["opencv", "computer", "vision"]
        );
    }

    #[test]
    fn test_title_tokens_punctuation_and_joiners() {
        assert_eq!(
            title_tokens("The Art of Computer Programming: Volume 1"),
            vec!["art", "of", "computer", "programming", "volume", "1"]
        );
        assert_eq!(
            title_tokens("Python. Подробный справочник"),
            vec!["python", "подробный", "справочник"]
        );
    }

    #[test]
    fn test_title_tokens_strip_brackets() {
        assert_eq!(
            title_tokens("Dune (Dune Chronicles #1) [Deluxe]"),
            vec!["dune"]
        );
    }

    #[test]
    fn test_title_tokens_empty() {
        assert!(title_tokens("").is_empty());
        assert!(title_tokens(" -- ").is_empty());
    }

    #[test]
    fn test_author_tokens() {
        assert_eq!(author_tokens("Howse"), vec!["howse"]);
        assert_eq!(author_tokens("Joseph Howse"), vec!["joseph", "howse"]);
        assert_eq!(author_tokens("Бизли, Дэвид"), vec!["дэвид", "бизли"]);
    }

    #[test]
    fn test_author_tokens_drop_initials_and_particles() {
        assert_eq!(
            author_tokens("J. R. R. Tolkien"),
            vec!["tolkien"]
        );
        assert_eq!(
            author_tokens("Ludwig van Beethoven"),
            vec!["ludwig", "beethoven"]
        );
        assert!(author_tokens("Unknown").is_empty());
    }
}
