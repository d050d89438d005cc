//! Opaque generation replies.

use serde_json::Value;

use crate::llm::extract::ShapeMismatch;

/// A reply from either Gemini transport.
///
/// No schema is assumed: the body is kept as raw JSON and only read through
/// the extraction strategies in [`crate::llm::extract`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReply {
    body: Value,
}

impl GenerationReply {
    pub fn from_json(body: Value) -> Self {
        Self { body }
    }

    /// Parse a reply from raw response text.
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw).map(Self::from_json)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// The `candidates` list, if the reply has one.
    pub fn candidates(&self) -> Option<&[Value]> {
        self.body
            .get("candidates")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Convenience text accessor.
    ///
    /// Joins the `text` parts of the first candidate. Fails when the reply was
    /// blocked, has no candidates, or the first candidate carries no parts,
    /// which is what happens when generation stops at the token limit before
    /// emitting any text.
    pub fn text(&self) -> Result<String, ShapeMismatch> {
        let candidates = match self.candidates() {
            Some(candidates) if !candidates.is_empty() => candidates,
            _ => {
                return Err(match self.block_reason() {
                    Some(reason) => {
                        ShapeMismatch::new(format!("prompt was blocked: {reason}"))
                    }
                    None => ShapeMismatch::new("reply has no candidates"),
                })
            }
        };

        let first = &candidates[0];
        let parts = first
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array)
            .filter(|parts| !parts.is_empty())
            .ok_or_else(|| {
                let reason = first
                    .get("finishReason")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                ShapeMismatch::new(format!(
                    "first candidate has no content parts (finish reason: {reason})"
                ))
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();

        Ok(text)
    }

    fn block_reason(&self) -> Option<&str> {
        self.body
            .get("promptFeedback")
            .and_then(|feedback| feedback.get("blockReason"))
            .and_then(Value::as_str)
    }
}

impl From<Value> for GenerationReply {
    fn from(body: Value) -> Self {
        Self::from_json(body)
    }
}
