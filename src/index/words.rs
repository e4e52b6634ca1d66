//! English word-number decoding (`three`, `twenty-one`, `thirty five`).

const WORD_NUMBERS: [(&str, u32); 21] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
];

fn lookup(word: &str) -> Option<u32> {
    WORD_NUMBERS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, value)| *value)
}

/// Decodes an English number word or a tens/ones compound.
///
/// Accepts `one`..`twenty` and `thirty` on their own, plus any multiple-of-ten
/// word (`ten`, `twenty`, `thirty`) followed by `one`..`nine`, separated by a
/// space or a hyphen.
#[must_use]
pub fn word_to_int(token: &str) -> Option<u32> {
    let folded = token.trim().to_lowercase().replace('-', " ");
    if let Some(value) = lookup(folded.as_str()) {
        return Some(value);
    }

    let parts: Vec<&str> = folded.split_whitespace().collect();
    let [tens_word, ones_word] = parts.as_slice() else {
        return None;
    };
    let tens = lookup(tens_word)?;
    let ones = lookup(ones_word)?;
    if tens % 10 == 0 && (1..=9).contains(&ones) {
        Some(tens + ones)
    } else {
        None
    }
}
