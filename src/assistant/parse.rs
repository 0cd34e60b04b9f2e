//! Validation of raw model output.

use serde::de::DeserializeOwned;

use crate::{HeimdallError, Result};

/// Shortest free-text completion accepted as a real answer.
pub const MIN_TEXT_LEN: usize = 20;

/// Prefix of `text` holding at most `max` characters.
pub fn clip(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Trimmed completion, rejected when shorter than [`MIN_TEXT_LEN`].
pub fn require_text(raw: &str) -> Result<String> {
    let text = raw.trim();
    if text.chars().count() < MIN_TEXT_LEN {
        return Err(HeimdallError::MalformedResponse(format!(
            "completion too short ({} chars)",
            text.chars().count()
        )));
    }
    Ok(text.to_string())
}

/// Decode a JSON object from a completion.
///
/// Models wrap JSON in markdown fences or add a sentence around it, so
/// only the outermost `{ … }` span is decoded.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let body = json_span(raw).ok_or_else(|| {
        HeimdallError::MalformedResponse("no JSON object in completion".to_string())
    })?;
    Ok(serde_json::from_str(body)?)
}

fn json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}
