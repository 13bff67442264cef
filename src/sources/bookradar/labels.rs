//! Label table for the semicolon-delimited `label: value` info block.

use chrono::NaiveDate;

use crate::models::CandidateBuilder;

type FieldSetter = fn(&mut CandidateBuilder, &str);

/// Recognized labels, matched exactly after trimming
const LABELS: &[(&str, FieldSetter)] = &[
    ("Год", set_year as FieldSetter),
    ("Издательство", set_publisher as FieldSetter),
    ("Year", set_year as FieldSetter),
    ("Publisher", set_publisher as FieldSetter),
];

fn setter_for(label: &str) -> Option<FieldSetter> {
    LABELS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, setter)| *setter)
}

/// Apply every recognized entry of an info block to the builder
///
/// Unrecognized labels are ignored. Entries without a `:` are skipped with a
/// warning; the rest of the block still applies.
pub(crate) fn apply_info_block(builder: &mut CandidateBuilder, block: &str) {
    for entry in block.split(';') {
        if entry.trim().is_empty() {
            continue;
        }

        let Some((label, value)) = entry.split_once(':') else {
            tracing::warn!("Skipping malformed info entry: {:?}", entry.trim());
            continue;
        };

        if let Some(setter) = setter_for(label.trim()) {
            setter(builder, value);
        }
    }
}

/// Parse `2005, переизд.` style values into January 1st of the year
fn parse_year(value: &str) -> Option<NaiveDate> {
    let year = value.split(',').next().unwrap_or_default().trim();

    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1)
}

fn set_year(builder: &mut CandidateBuilder, value: &str) {
    match parse_year(value) {
        Some(date) => builder.set_pubdate(date),
        None => tracing::debug!("Ignoring unparseable year: {:?}", value.trim()),
    }
}

fn set_publisher(builder: &mut CandidateBuilder, value: &str) {
    let publisher = value.trim();
    if !publisher.is_empty() {
        builder.set_publisher(publisher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    fn apply(block: &str) -> Candidate {
        let mut builder = CandidateBuilder::new("Title", "test");
        apply_info_block(&mut builder, block);
        builder.build()
    }

    #[test]
    fn test_year_and_publisher() {
        let candidate = apply("Год: 2005, переизд.; Издательство: Символ-Плюс");
        assert_eq!(candidate.pubdate, NaiveDate::from_ymd_opt(2005, 1, 1));
        assert_eq!(candidate.publisher.as_deref(), Some("Символ-Плюс"));
    }

    #[test]
    fn test_value_may_contain_colon() {
        let candidate = apply("Издательство: O'Reilly: Sebastopol");
        assert_eq!(candidate.publisher.as_deref(), Some("O'Reilly: Sebastopol"));
    }

    #[test]
    fn test_english_labels() {
        let candidate = apply("Year: 2013; Publisher: Packt Publishing");
        assert_eq!(candidate.pubdate, NaiveDate::from_ymd_opt(2013, 1, 1));
        assert_eq!(candidate.publisher.as_deref(), Some("Packt Publishing"));
    }

    #[test]
    fn test_unknown_labels_ignored() {
        let candidate = apply("Страниц: 1024; Переплет: твердый");
        assert!(candidate.pubdate.is_none());
        assert!(candidate.publisher.is_none());
    }

    #[test]
    fn test_labels_are_case_exact() {
        let candidate = apply("год: 2005; ИЗДАТЕЛЬСТВО: Символ-Плюс");
        assert!(candidate.pubdate.is_none());
        assert!(candidate.publisher.is_none());
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let candidate = apply("переизд.; Год: 2005; Издательство: Символ-Плюс;");
        assert_eq!(candidate.pubdate, NaiveDate::from_ymd_opt(2005, 1, 1));
        assert_eq!(candidate.publisher.as_deref(), Some("Символ-Плюс"));
    }

    #[test]
    fn test_bad_year_leaves_pubdate_unset() {
        assert!(apply("Год: неизвестен").pubdate.is_none());
        assert!(apply("Год: 05").pubdate.is_none());
        assert_eq!(parse_year(" 1999 "), NaiveDate::from_ymd_opt(1999, 1, 1));
    }

    #[test]
    fn test_empty_block() {
        let candidate = apply("");
        assert!(candidate.pubdate.is_none());
        assert!(candidate.publisher.is_none());
    }
}
