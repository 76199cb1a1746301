//! Batch payload decoding for persisted event histories.
//!
//! A stored history entry is a single string holding the full event array.
//! Two encodings occur in the wild: strict JSON, and the textual form a
//! Python backend produces when it stringifies the list directly (single
//! quotes, `True`/`False`/`None`). The latter is normalized into JSON before
//! parsing.

use crate::types::AgUiEvent;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while decoding a batch payload.
#[derive(Debug, Error)]
pub enum WireError {
    /// The payload is not valid JSON, even after literal normalization.
    #[error("payload is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The payload parsed, but the top level is not an event array.
    #[error("payload top level is not an event array")]
    NotAnArray,
}

/// Result type for wire decoding.
pub type WireResult<T> = Result<T, WireError>;

/// Rewrite Python literal syntax into JSON.
///
/// Replaces single quotes with double quotes and the bare tokens `True`,
/// `False`, `None` with their JSON equivalents. Token replacement only
/// applies at word boundaries so keys like `isNone` survive.
///
/// This is a best-effort heuristic: a string value containing a literal
/// apostrophe will be mangled. Callers treat the output as a second parse
/// attempt, not a guaranteed fix.
#[must_use]
pub fn normalize_python_literals(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev: Option<char> = None;
    let mut chars = raw.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if !is_word_char(prev) {
            if let Some((token, replacement)) = match_literal(&raw[i..]) {
                let next = raw[i + token.len()..].chars().next();
                if !is_word_char(next) {
                    out.push_str(replacement);
                    for _ in 0..token.chars().count() - 1 {
                        chars.next();
                    }
                    prev = token.chars().last();
                    continue;
                }
            }
        }

        out.push(if ch == '\'' { '"' } else { ch });
        prev = Some(ch);
    }

    out
}

fn is_word_char(ch: Option<char>) -> bool {
    matches!(ch, Some(c) if c.is_alphanumeric() || c == '_')
}

fn match_literal(rest: &str) -> Option<(&'static str, &'static str)> {
    if rest.starts_with("True") {
        Some(("True", "true"))
    } else if rest.starts_with("False") {
        Some(("False", "false"))
    } else if rest.starts_with("None") {
        Some(("None", "null"))
    } else {
        None
    }
}

/// Parse a batch payload into events.
///
/// Tries strict JSON first, then the literal-normalized form. Elements that
/// do not match a known event shape are skipped with a debug log so one
/// malformed event cannot poison the rest of the history.
///
/// # Errors
///
/// [`WireError::Parse`] if neither form is valid JSON,
/// [`WireError::NotAnArray`] if the top level is not an array.
pub fn parse_event_batch(raw: &str) -> WireResult<Vec<AgUiEvent>> {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(first_err) => {
            let normalized = normalize_python_literals(raw);
            match serde_json::from_str::<Value>(&normalized) {
                Ok(value) => value,
                Err(_) => return Err(WireError::Parse(first_err)),
            }
        }
    };

    let Value::Array(items) = value else {
        return Err(WireError::NotAnArray);
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<AgUiEvent>(item.clone()) {
            Ok(event) => Some(event),
            Err(err) => {
                debug!(%err, ?item, "skipping unrecognized history event");
                None
            }
        })
        .collect())
}
