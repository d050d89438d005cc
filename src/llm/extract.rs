//! Text extraction from generation replies.
//!
//! Reply shapes differ between API versions and transports, so extraction runs
//! an ordered list of strategies from most to least specific and keeps the
//! first non-empty result. A strategy that does not recognise the reply
//! returns [`ShapeMismatch`]; that value never leaves this module's callers.

use serde_json::Value;
use thiserror::Error;

use crate::llm::reply::GenerationReply;

/// A reply did not have the shape a strategy was looking for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("reply shape mismatch: {0}")]
pub struct ShapeMismatch(String);

impl ShapeMismatch {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

type Strategy = fn(&GenerationReply) -> Result<String, ShapeMismatch>;

/// Strategies in the order they are tried.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("direct_text", direct_text),
    ("candidate_content", candidate_content),
    ("fixed_path", fixed_path),
];

/// Recover article text from a reply, or `None` when no strategy matches.
pub fn extract(reply: &GenerationReply) -> Option<String> {
    for (name, strategy) in STRATEGIES {
        match strategy(reply).and_then(non_empty) {
            Ok(text) => {
                tracing::debug!(strategy = *name, bytes = text.len(), "Extracted reply text");
                return Some(text);
            }
            Err(mismatch) => {
                tracing::debug!(strategy = *name, "{}", mismatch);
            }
        }
    }

    None
}

/// The reply's own text accessor.
fn direct_text(reply: &GenerationReply) -> Result<String, ShapeMismatch> {
    reply.text()
}

/// Walk every candidate and take the first one with usable text.
fn candidate_content(reply: &GenerationReply) -> Result<String, ShapeMismatch> {
    let candidates = reply
        .candidates()
        .filter(|candidates| !candidates.is_empty())
        .ok_or_else(|| ShapeMismatch::new("reply has no candidates list"))?;

    for (index, candidate) in candidates.iter().enumerate() {
        match candidate_text(candidate).and_then(non_empty) {
            Ok(text) => return Ok(text),
            Err(mismatch) => tracing::trace!(candidate = index, "{}", mismatch),
        }
    }

    Err(ShapeMismatch::new(format!(
        "none of {} candidates carried text",
        candidates.len()
    )))
}

fn candidate_text(candidate: &Value) -> Result<String, ShapeMismatch> {
    let content = candidate
        .get("content")
        .ok_or_else(|| ShapeMismatch::new("candidate has no content"))?;

    // Content is either a list of entries or a single mapping.
    let first = match content {
        Value::Array(entries) => entries
            .first()
            .ok_or_else(|| ShapeMismatch::new("candidate content is empty"))?,
        Value::Object(_) => content,
        _ => return Err(ShapeMismatch::new("candidate content is not a mapping or list")),
    };

    if let Some(text) = first.get("text") {
        return as_text(text);
    }

    if let Some(inner) = first.get("content") {
        return inner
            .get(0)
            .and_then(|entry| entry.get("text"))
            .ok_or_else(|| ShapeMismatch::new("nested content has no text"))
            .and_then(as_text);
    }

    first
        .get("parts")
        .and_then(|parts| parts.get(0))
        .and_then(|part| part.get("text"))
        .ok_or_else(|| ShapeMismatch::new("candidate content has no text"))
        .and_then(as_text)
}

/// `candidates[0].content[0].text`, the layout some REST responses use.
fn fixed_path(reply: &GenerationReply) -> Result<String, ShapeMismatch> {
    reply
        .body()
        .pointer("/candidates/0/content/0/text")
        .ok_or_else(|| ShapeMismatch::new("no text at candidates[0].content[0].text"))
        .and_then(as_text)
}

fn as_text(value: &Value) -> Result<String, ShapeMismatch> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ShapeMismatch::new("text field is not a string"))
}

fn non_empty(text: String) -> Result<String, ShapeMismatch> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ShapeMismatch::new("text is empty"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(body: Value) -> GenerationReply {
        GenerationReply::from_json(body)
    }

    #[test]
    fn direct_text_wins_over_other_shapes() {
        let reply = reply(json!({
            "candidates": [{
                "content": {"parts": [{"text": "  # Title\n\nBody  \n"}]},
                "text": "not this"
            }],
            "text": "nor this"
        }));

        assert_eq!(extract(&reply).as_deref(), Some("# Title\n\nBody"));
    }

    #[test]
    fn candidate_list_with_text_entry() {
        let reply = reply(json!({
            "candidates": [{"content": [{"text": "X"}]}]
        }));

        assert_eq!(extract(&reply).as_deref(), Some("X"));
    }

    #[test]
    fn candidate_with_nested_content_list() {
        let reply = reply(json!({
            "candidates": [{"content": [{"content": [{"text": " nested "}]}]}]
        }));

        assert_eq!(extract(&reply).as_deref(), Some("nested"));
    }

    #[test]
    fn later_candidate_used_when_first_is_empty() {
        let reply = reply(json!({
            "candidates": [
                {"finishReason": "MAX_TOKENS"},
                {"content": [{"text": "   "}]},
                {"content": {"parts": [{"text": "third"}]}}
            ]
        }));

        assert_eq!(extract(&reply).as_deref(), Some("third"));
    }

    #[test]
    fn mapping_content_with_text_field() {
        let reply = reply(json!({
            "candidates": [{"content": {"text": "from mapping"}}]
        }));

        assert_eq!(extract(&reply).as_deref(), Some("from mapping"));
    }

    #[test]
    fn fixed_path_matches_rest_layout() {
        let reply = reply(json!({
            "candidates": [{"content": [{"text": "rest text"}]}]
        }));

        assert_eq!(fixed_path(&reply).unwrap(), "rest text");
    }

    #[test]
    fn unknown_shapes_are_absent() {
        for body in [
            Value::Null,
            json!({}),
            json!("just a string"),
            json!({"candidates": "nope"}),
            json!({"candidates": []}),
            json!({"candidates": [{"content": 42}]}),
            json!({"candidates": [{"content": [{"text": 7}]}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"promptFeedback": {"blockReason": "SAFETY"}}),
        ] {
            assert_eq!(extract(&reply(body.clone())), None, "body: {body}");
        }
    }

    #[test]
    fn whitespace_only_text_is_absent() {
        let reply = reply(json!({
            "candidates": [{"content": {"parts": [{"text": " \n\t "}]}}]
        }));

        assert_eq!(extract(&reply), None);
    }
}
