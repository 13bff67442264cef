//! ISBN-10 / ISBN-13 check-digit validation.

/// Uppercase, then strip everything except digits and `X`
fn strip_isbn(input: &str) -> String {
    input
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X')
        .collect()
}

/// Placeholders such as `0000000000` pass the checksum
fn is_single_digit_run(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

fn check_isbn10(digits: &[u32]) -> bool {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| (10 - i as u32) * d)
        .sum();
    sum % 11 == 0
}

fn check_isbn13(digits: &[u32]) -> bool {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| if i % 2 == 0 { d } else { d * 3 })
        .sum();
    sum % 10 == 0
}

/// Validate an ISBN and return it normalized to bare digits
///
/// Anything other than digits and `X` is ignored, so `ISBN 978-5-93286-157-8`
/// is accepted. ISBN-10 may end in `X`. Returns `None` for a wrong length, a
/// misplaced `X`, a failing check digit or a single repeated digit.
pub fn check_isbn(input: &str) -> Option<String> {
    let stripped = strip_isbn(input);

    let mut digits = Vec::with_capacity(stripped.len());
    for (i, c) in stripped.chars().enumerate() {
        match c {
            '0'..='9' => digits.push(c as u32 - '0' as u32),
            'X' if stripped.len() == 10 && i == 9 => digits.push(10),
            _ => return None,
        }
    }

    if is_single_digit_run(&digits) {
        return None;
    }

    let valid = match digits.len() {
        10 => check_isbn10(&digits),
        13 => check_isbn13(&digits),
        _ => false,
    };

    valid.then_some(stripped)
}
