//! Roman numeral decoding for series positions like `Book IV`.

fn digit_value(ch: char) -> Option<i64> {
    match ch.to_ascii_uppercase() {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Decodes a Roman numeral, case-insensitively.
///
/// Scans right-to-left keeping the largest digit seen so far: a smaller
/// digit is subtracted, anything else is added and becomes the new maximum.
/// Non-canonical forms (`IIX`) still decode; they are not rejected.
///
/// Returns `None` for empty input or any character outside `IVXLCDM`.
#[must_use]
pub fn roman_to_int(token: &str) -> Option<i64> {
    if token.is_empty() {
        return None;
    }

    let mut total: i64 = 0;
    let mut running_max: i64 = 0;
    for ch in token.chars().rev() {
        let value = digit_value(ch)?;
        if value < running_max {
            total = total.saturating_sub(value);
        } else {
            total = total.saturating_add(value);
            running_max = value;
        }
    }
    Some(total)
}
