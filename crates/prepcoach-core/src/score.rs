//! Score extraction from free-form evaluation text.

use std::sync::OnceLock;

use prepcoach_schema::{DEFAULT_SCORE, MAX_SCORE};
use regex::Regex;

const SCORE_PATTERN: &str = r"Score:\s*([0-9]+)";

fn score_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SCORE_PATTERN).ok()).as_ref()
}

/// First `Score: N` in `text`, capped at [`MAX_SCORE`].
///
/// Returns `None` when there is no match. Only the first match is considered.
/// Digits that overflow a `u8` saturate to the cap.
pub fn extract_score(text: &str) -> Option<u8> {
    let captures = score_regex()?.captures(text)?;
    let digits = captures.get(1)?.as_str();
    Some(
        digits
            .parse::<u8>()
            .map_or(MAX_SCORE, |score| score.min(MAX_SCORE)),
    )
}

/// [`extract_score`] with the neutral default applied.
pub fn parse_score(text: &str) -> u8 {
    extract_score(text).unwrap_or(DEFAULT_SCORE)
}
