/// Parse a numeric cell such as `39,029,342`, `$85,000`, or `$131K`.
///
/// A leading `$` and thousands separators are ignored; a trailing `K` or `M` scales the
/// value by a thousand or a million. Returns `None` when the text is not a finite,
/// non-negative number.
#[must_use]
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_prefix('$').unwrap_or(text).trim_start();

    let (digits, scale) = if let Some(digits) = text.strip_suffix(['K', 'k']) {
        (digits, 1_000.0)
    } else if let Some(digits) = text.strip_suffix(['M', 'm']) {
        (digits, 1_000_000.0)
    } else {
        (text, 1.0)
    };

    let digits: String = digits.trim_end().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<f64>().ok()? * scale;
    (value.is_finite() && value >= 0.0).then_some(value + 0.0)
}

/// Whether a cell means "no value" for a source with the given markers.
pub(crate) fn is_missing(text: &str, missing_markers: &[String]) -> bool {
    let text = text.trim();
    text.is_empty() || missing_markers.iter().any(|marker| marker.trim() == text)
}
