//! `H:MM` duration display.

/// Renders a length in seconds as `H:MM`, truncating partial minutes.
///
/// Absent, negative, and non-finite lengths render as an empty string.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite() && *s >= 0.0) else {
        return String::new();
    };
    // Float-to-int casts saturate, so huge values cannot wrap.
    let total_minutes = (seconds as u64) / 60;
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Parses an `H:MM` display back into whole minutes.
///
/// Anything that is not two `:`-separated integers counts as zero.
#[must_use]
pub fn duration_minutes(display: &str) -> u64 {
    let Some((hours, minutes)) = display.trim().split_once(':') else {
        return 0;
    };
    match (hours.parse::<u64>(), minutes.parse::<u64>()) {
        (Ok(h), Ok(m)) => h.saturating_mul(60).saturating_add(m),
        _ => 0,
    }
}
