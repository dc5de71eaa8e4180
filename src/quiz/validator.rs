//! Answer checking

use super::question::Question;

/// Parse a raw submission. Whitespace is trimmed; anything that is not an
/// integer yields `None`.
pub fn parse_answer(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// Exact integer match. Missing or malformed input is simply wrong.
pub fn is_correct(question: &Question, raw: Option<&str>) -> bool {
    parse_answer(raw) == Some(question.answer)
}
