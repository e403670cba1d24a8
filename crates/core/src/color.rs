//! Normalization of the hex-ish color strings carried by elements.

use regex::Regex;
use std::sync::LazyLock;

/// `#rgb` or `#rrggbb`, with the leading hash optional.
static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

/// Normalize a hex color to lowercase `#rrggbb`.
///
/// Returns `None` for anything that is not a 3- or 6-digit hex color.
pub fn normalize_hex(color: &str) -> Option<String> {
    let caps = HEX_COLOR_REGEX.captures(color.trim())?;
    let digits = caps.get(1)?.as_str().to_ascii_lowercase();
    if digits.len() == 3 {
        let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
        Some(format!("#{}", expanded))
    } else {
        Some(format!("#{}", digits))
    }
}

/// Compare two colors, treating hex spellings of the same value as equal.
///
/// Non-hex values (named colors, gradients) fall back to a trimmed,
/// case-insensitive comparison.
pub fn same_color(a: &str, b: &str) -> bool {
    match (normalize_hex(a), normalize_hex(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}
