//! Flattening of free text so it stays on one line in flat-file output.

/// Characters replaced by a single space.
const SEPARATORS: [char; 3] = [',', '\n', '\r'];

/// Replace each comma, line feed, and carriage return with one space.
///
/// Every other character is left alone, so the function is idempotent.
pub fn normalize_str(text: &str) -> String {
    text.replace(SEPARATORS, " ")
}

/// [`normalize_str`] lifted over optional text; `None` stays `None`.
pub fn normalize(text: Option<&str>) -> Option<String> {
    text.map(normalize_str)
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
