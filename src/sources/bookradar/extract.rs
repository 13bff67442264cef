//! Candidate extraction from a bookradar.org results page.

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

use super::labels::apply_info_block;
use super::SOURCE_ID;
use crate::models::{Candidate, CandidateBuilder};

/// "Hide" link text the site embeds in every full description
pub const COMMENTS_MARKER: &str = "Скрыть";

struct ResultSelectors {
    block: Selector,
    title: Selector,
    author: Selector,
    isbn: Selector,
    description: Selector,
    info: Selector,
}

static SELECTORS: OnceLock<ResultSelectors> = OnceLock::new();

fn selectors() -> &'static ResultSelectors {
    SELECTORS.get_or_init(|| {
        let parse = |css: &str| Selector::parse(css).expect("valid selector");
        ResultSelectors {
            block: parse("div.b-result"),
            title: parse("div.b-result__name-wrap"),
            author: parse("div.b-result__author"),
            isbn: parse("div.b-result__isbn"),
            description: parse("div.b-result__desc__full"),
            info: parse("div.b-result__years"),
        }
    })
}

/// Trimmed text of the first element matching `selector` under `elem`
fn select_text(elem: &ElementRef, selector: &Selector) -> Option<String> {
    elem.select(selector)
        .next()
        .map(|found| found.text().collect::<String>().trim().to_string())
}

fn split_authors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

/// `ISBN: 978-5-9328-6157-8, 5-93286-157-X` -> `978-5-9328-6157-8`
fn parse_isbn_field(raw: &str) -> &str {
    let value = raw.rsplit(':').next().unwrap_or_default();
    value.split(',').next().unwrap_or_default().trim()
}

fn clean_comments(raw: &str) -> Option<String> {
    let comments = raw.replace(COMMENTS_MARKER, "");
    let comments = comments.trim();
    (!comments.is_empty()).then(|| comments.to_string())
}

fn parse_block(block: &ElementRef, isbn_initial: Option<&str>) -> Candidate {
    let sel = selectors();

    let title = select_text(block, &sel.title).unwrap_or_default();
    let authors = select_text(block, &sel.author)
        .map(|raw| split_authors(&raw))
        .unwrap_or_default();

    let mut builder = CandidateBuilder::new(title, SOURCE_ID).authors(authors);

    let page_isbn = select_text(block, &sel.isbn).unwrap_or_default();
    match parse_isbn_field(&page_isbn) {
        "" => {
            if let Some(isbn) = isbn_initial {
                builder = builder.isbn(isbn);
            }
        }
        isbn => builder = builder.isbn(isbn),
    }

    let comments = select_text(block, &sel.description).and_then(|raw| clean_comments(&raw));
    if let Some(comments) = comments {
        builder = builder.comments(comments);
    }

    if let Some(info) = select_text(block, &sel.info) {
        apply_info_block(&mut builder, &info);
    }

    builder.build()
}

/// Parse every result block on the page, in document order
///
/// Missing sub-elements fall back to empty values for that field only. A page
/// without result blocks yields an empty list. `isbn_initial` fills in the ISBN
/// of candidates whose block carries none.
pub fn parse_results(html: &str, isbn_initial: Option<&str>) -> Vec<Candidate> {
    let document = Html::parse_document(html);

    document
        .select(&selectors().block)
        .enumerate()
        .map(|(idx, block)| {
            let candidate = parse_block(&block, isbn_initial);
            tracing::info!("Found candidate {}: {}", idx + 1, candidate.title);
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn page(blocks: &[&str]) -> String {
        format!(
            "<html><body><div class=\"b-results\">{}</div></body></html>",
            blocks.join("")
        )
    }

    const FULL_BLOCK: &str = r##"
        <div class="b-result">
            <div class="b-result__name-wrap"><a href="/book/1">Python. Подробный справочник</a></div>
            <div class="b-result__author">Дэвид Бизли</div>
            <div class="b-result__isbn">ISBN: 978-5-9328-6157-8, other</div>
            <div class="b-result__desc">
                <div class="b-result__desc__full">Справочник по языку Python. <a href="#">Скрыть</a></div>
            </div>
            <div class="b-result__years">Год: 2005, переизд.; Издательство: Символ-Плюс</div>
        </div>
    "##;

    #[test]
    fn test_full_block() {
        let candidates = parse_results(&page(&[FULL_BLOCK]), None);
        assert_eq!(candidates.len(), 1);

        let c = &candidates[0];
        assert_eq!(c.title, "Python. Подробный справочник");
        assert_eq!(c.authors, vec!["Дэвид Бизли"]);
        assert_eq!(c.isbn.as_deref(), Some("978-5-9328-6157-8"));
        assert_eq!(c.comments.as_deref(), Some("Справочник по языку Python."));
        assert_eq!(c.publisher.as_deref(), Some("Символ-Плюс"));
        assert_eq!(c.pubdate, NaiveDate::from_ymd_opt(2005, 1, 1));
        assert_eq!(c.source, SOURCE_ID);
    }

    #[test]
    fn test_no_blocks() {
        assert!(parse_results("<html><body><p>Ничего не найдено</p></body></html>", None).is_empty());
        assert!(parse_results("", Some("9785932861578")).is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let candidates = parse_results(&page(&[r#"<div class="b-result"></div>"#]), None);
        assert_eq!(candidates.len(), 1);

        let c = &candidates[0];
        assert_eq!(c.title, "");
        assert!(c.authors.is_empty());
        assert!(c.isbn.is_none());
        assert!(c.comments.is_none());
        assert!(c.publisher.is_none());
        assert!(c.pubdate.is_none());
    }

    #[test]
    fn test_isbn_fallback() {
        let block = r#"
            <div class="b-result">
                <div class="b-result__name-wrap">Python. Подробный справочник</div>
                <div class="b-result__isbn">ISBN: </div>
            </div>
        "#;
        let candidates = parse_results(&page(&[block]), Some("9785932861578"));
        assert_eq!(candidates[0].isbn.as_deref(), Some("9785932861578"));
    }

    #[test]
    fn test_page_isbn_wins_over_fallback() {
        let candidates = parse_results(&page(&[FULL_BLOCK]), Some("9785932861578"));
        assert_eq!(candidates[0].isbn.as_deref(), Some("978-5-9328-6157-8"));
    }

    #[test]
    fn test_multiple_authors_and_order() {
        let second = r#"
            <div class="b-result">
                <div class="b-result__name-wrap">Opencv Computer Vision with Python</div>
                <div class="b-result__author">Joseph Howse, Second Author ,</div>
            </div>
        "#;
        let candidates = parse_results(&page(&[FULL_BLOCK, second]), None);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "Python. Подробный справочник");
        assert_eq!(candidates[1].title, "Opencv Computer Vision with Python");
        assert_eq!(candidates[1].authors, vec!["Joseph Howse", "Second Author"]);
    }

    #[test]
    fn test_marker_only_comments_absent() {
        let block = r#"
            <div class="b-result">
                <div class="b-result__desc__full">  Скрыть  </div>
            </div>
        "#;
        let candidates = parse_results(&page(&[block]), None);
        assert!(candidates[0].comments.is_none());
    }

    #[test]
    fn test_malformed_info_does_not_abort() {
        let block = r#"
            <div class="b-result">
                <div class="b-result__name-wrap">Title</div>
                <div class="b-result__years">переизд.; Издательство: Символ-Плюс</div>
            </div>
        "#;
        let candidates = parse_results(&page(&[block, FULL_BLOCK]), None);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].publisher.as_deref(), Some("Символ-Плюс"));
        assert!(candidates[0].pubdate.is_none());
        assert_eq!(candidates[1].pubdate, NaiveDate::from_ymd_opt(2005, 1, 1));
    }

    #[test]
    fn test_parse_is_repeatable() {
        let html = page(&[FULL_BLOCK, FULL_BLOCK]);
        assert_eq!(parse_results(&html, None), parse_results(&html, None));
    }

    #[test]
    fn test_parse_isbn_field() {
        assert_eq!(parse_isbn_field("ISBN: 978-5-9328-6157-8, other"), "978-5-9328-6157-8");
        assert_eq!(parse_isbn_field("9785932861578"), "9785932861578");
        assert_eq!(parse_isbn_field("ISBN:"), "");
        assert_eq!(parse_isbn_field(""), "");
    }

    #[test]
    fn test_split_authors() {
        assert_eq!(split_authors("Дэвид Бизли"), vec!["Дэвид Бизли"]);
        assert!(split_authors("").is_empty());
    }
}
