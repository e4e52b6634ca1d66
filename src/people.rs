//! Contributor name normalization for author and narrator fields.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Separators between people in a single tag value.
#[allow(clippy::expect_used)]
static PEOPLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[;,/&]| and ").expect("people separator regex is valid") // Static pattern, safe to panic
});

/// Fragments at or below this length that are entirely uppercase keep their casing.
const ACRONYM_MAX_CHARS: usize = 5;

/// Splits, cleans, cases, and deduplicates a multi-person field.
///
/// Splits on `;`, `,`, `/`, `&`, and the word ` and ` (any case). Each
/// fragment has its whitespace collapsed and is title-cased unless it is a
/// short all-caps acronym. Duplicates are dropped case-insensitively,
/// keeping first-seen order.
///
/// Returns `None` when no name survives.
///
/// # Example
///
/// ```
/// use bookshelf_core::people::normalize_people;
///
/// assert_eq!(
///     normalize_people("john smith; JANE DOE and John Smith").as_deref(),
///     Some("John Smith, Jane Doe")
/// );
/// ```
#[must_use]
pub fn normalize_people(field: &str) -> Option<String> {
    let mut seen = HashSet::new();
    let mut cleaned: Vec<String> = Vec::new();

    for fragment in PEOPLE_SEPARATOR.split(field) {
        let name = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            continue;
        }

        let cased = if is_short_acronym(&name) {
            name
        } else {
            name.split(' ').map(title_case_word).collect::<Vec<_>>().join(" ")
        };

        if seen.insert(cased.to_lowercase()) {
            cleaned.push(cased);
        }
    }

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(", "))
    }
}

/// Optional-input convenience used by the metadata resolver.
#[must_use]
pub fn normalize_people_opt(field: Option<&str>) -> Option<String> {
    field.and_then(normalize_people)
}

fn is_short_acronym(name: &str) -> bool {
    let has_cased = name.chars().any(char::is_alphabetic);
    has_cased
        && name.chars().count() <= ACRONYM_MAX_CHARS
        && !name.chars().any(char::is_lowercase)
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest,
/// so `o'brien` becomes `O'Brien` and `j.k.` becomes `J.K.`.
fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_run_start = true;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if at_run_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_run_start = false;
        } else {
            out.push(ch);
            at_run_start = true;
        }
    }
    out
}
