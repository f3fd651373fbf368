//! Competitor discovery: ask the chat model, then turn its reply into
//! validated [`CompetitorCandidate`]s.
//!
//! Models routinely ignore "no markdown" instructions, so the reply goes
//! through [`clean_reply`] before it is parsed. Parsing never panics and a
//! bad reply is a [`ReplyError`], which [`Discoverer::discover`] downgrades
//! to an empty list.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::chat::{ChatMessage, ChatModel};
use crate::competitor::CompetitorCandidate;
use crate::consts::MAX_COMPETITORS;
use crate::prompts::discover::build_discover_prompt;

const FENCE: &str = "```";

/// Why a model reply could not be turned into candidates.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("model reply is empty")]
    Empty,

    #[error("model reply is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model reply has unexpected shape: expected an array, got {0}")]
    UnexpectedShape(String),
}

/// Finds competitor candidates for a website through a chat model.
pub struct Discoverer {
    chat: Arc<dyn ChatModel>,
}

impl Discoverer {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }

    /// One chat call, no retries. Any failure yields an empty list.
    pub async fn discover(&self, website: &str) -> Vec<CompetitorCandidate> {
        let messages = [ChatMessage::user(build_discover_prompt(website))];

        let reply = match self.chat.complete(&messages).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(website, error = %e, "competitor discovery request failed");
                return Vec::new();
            }
        };

        match parse_candidates(&reply) {
            Ok(candidates) => {
                tracing::debug!(website, count = candidates.len(), "discovered competitors");
                candidates
            }
            Err(e) => {
                tracing::warn!(website, error = %e, "discarding unusable model reply");
                Vec::new()
            }
        }
    }
}

/// Parse a raw model reply into at most [`MAX_COMPETITORS`] candidates.
///
/// Accepts a JSON array, or an object with a `competitors` array. A reply
/// that decodes to a JSON string is decoded once more. Elements without a
/// non-empty string `url` are dropped.
pub fn parse_candidates(reply: &str) -> Result<Vec<CompetitorCandidate>, ReplyError> {
    let cleaned = clean_reply(reply);
    if cleaned.is_empty() {
        return Err(ReplyError::Empty);
    }

    let value = match serde_json::from_str::<Value>(&cleaned)? {
        Value::String(inner) => serde_json::from_str(inner.trim())?,
        other => other,
    };

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("competitors") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(ReplyError::UnexpectedShape("object".to_string())),
        },
        other => return Err(ReplyError::UnexpectedShape(kind_of(&other).to_string())),
    };

    Ok(entries
        .into_iter()
        .filter_map(candidate_from_value)
        .take(MAX_COMPETITORS)
        .collect())
}

/// Strip markdown fences and one layer of JSON string quoting.
pub fn clean_reply(reply: &str) -> String {
    let unfenced = strip_fences(reply);
    unquote(unfenced)
}

fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(start) = trimmed.find(FENCE) else {
        return trimmed;
    };

    // Skip the opening fence and a language tag (e.g. ```json). Anything
    // after the tag, even on the fence line, is body.
    let body =
        trimmed[start + FENCE.len()..].trim_start_matches(|c: char| c.is_ascii_alphanumeric());

    match body.find(FENCE) {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn unquote(text: &str) -> String {
    let is_quoted = text.len() >= 2 && text.starts_with('"') && text.ends_with('"');
    if !is_quoted {
        return text.to_string();
    }

    match serde_json::from_str::<String>(text) {
        Ok(inner) => inner.trim().to_string(),
        Err(_) => text[1..text.len() - 1].replace("\\\"", "\"").trim().to_string(),
    }
}

fn candidate_from_value(value: Value) -> Option<CompetitorCandidate> {
    let Value::Object(map) = value else {
        tracing::debug!("dropping non-object competitor entry");
        return None;
    };

    let url = map
        .get("url")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty());
    let Some(url) = url else {
        tracing::debug!("dropping competitor entry without url");
        return None;
    };

    let description = map
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string();

    Some(CompetitorCandidate {
        url: url.to_string(),
        description,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &str = r#"[
        {"url": "https://a.com", "description": "first"},
        {"url": "https://b.com", "description": "second"}
    ]"#;

    fn urls(candidates: &[CompetitorCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.url.as_str()).collect()
    }

    #[test]
    fn parse_plain_array() {
        let candidates = parse_candidates(TWO).unwrap();
        assert_eq!(urls(&candidates), vec!["https://a.com", "https://b.com"]);
        assert_eq!(candidates[1].description, "second");
    }

    #[test]
    fn parse_json_fenced_array() {
        let reply = format!("```json\n{}\n```", TWO);
        let candidates = parse_candidates(&reply).unwrap();
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn parse_plain_fenced_array() {
        let reply = format!("```\n{}\n```", TWO);
        assert_eq!(parse_candidates(&reply).unwrap().len(), 2);
    }

    #[test]
    fn parse_fence_on_one_line() {
        let reply = r#"```json[{"url": "a.com", "description": "x"}]```"#;
        assert_eq!(urls(&parse_candidates(reply).unwrap()), vec!["a.com"]);
    }

    #[test]
    fn parse_fence_with_leading_prose() {
        let reply = format!("Here are the competitors:\n```json\n{}\n```\nHope this helps!", TWO);
        assert_eq!(parse_candidates(&reply).unwrap().len(), 2);
    }

    #[test]
    fn parse_quoted_escaped_string() {
        let reply = r#""[{\"url\": \"https://a.com\", \"description\": \"first\"}]""#;
        let candidates = parse_candidates(reply).unwrap();
        assert_eq!(urls(&candidates), vec!["https://a.com"]);
        assert_eq!(candidates[0].description, "first");
    }

    #[test]
    fn parse_quoted_string_inside_fences() {
        let reply = "```json\n\"[{\\\"url\\\": \\\"a.com\\\"}]\"\n```";
        assert_eq!(urls(&parse_candidates(reply).unwrap()), vec!["a.com"]);
    }

    #[test]
    fn parse_json_on_fence_line() {
        let reply = "```json [\n{\"url\": \"a.com\"},\n{\"url\": \"b.com\"}\n]\n```";
        assert_eq!(urls(&parse_candidates(reply).unwrap()), vec!["a.com", "b.com"]);
    }

    #[test]
    fn parse_bracket_right_after_bare_fence() {
        let reply = "```[\n{\"url\":\"a.com\"}\n]\n```";
        assert_eq!(urls(&parse_candidates(reply).unwrap()), vec!["a.com"]);
    }

    #[test]
    fn parse_space_after_language_tag() {
        let reply = format!("```json \n{}\n```", TWO);
        assert_eq!(parse_candidates(&reply).unwrap().len(), 2);
    }

    #[test]
    fn parse_uppercase_tag_and_crlf() {
        let reply = format!("```JSON\r\n{}\r\n```", TWO);
        assert_eq!(parse_candidates(&reply).unwrap().len(), 2);
    }

    #[test]
    fn parse_object_with_competitors_key() {
        let reply = r#"{"competitors": [{"url": "a.com", "description": "x", "traffic": 50}]}"#;
        assert_eq!(urls(&parse_candidates(reply).unwrap()), vec!["a.com"]);
    }

    #[test]
    fn parse_object_without_competitors_fails() {
        let err = parse_candidates(r#"{"results": []}"#).unwrap_err();
        assert!(matches!(err, ReplyError::UnexpectedShape(_)));
    }

    #[test]
    fn parse_number_fails_with_shape_error() {
        let err = parse_candidates("42").unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn parse_unparsable_text_fails() {
        let err = parse_candidates("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, ReplyError::Malformed(_)));
    }

    #[test]
    fn parse_blank_reply_is_empty_error() {
        assert!(matches!(parse_candidates("  \n "), Err(ReplyError::Empty)));
        assert!(matches!(parse_candidates("```json\n```"), Err(ReplyError::Empty)));
    }

    #[test]
    fn parse_truncates_to_max() {
        let entries: Vec<String> = (0..15)
            .map(|i| format!(r#"{{"url": "https://c{}.com", "description": "d"}}"#, i))
            .collect();
        let reply = format!("[{}]", entries.join(","));
        let candidates = parse_candidates(&reply).unwrap();
        assert_eq!(candidates.len(), MAX_COMPETITORS);
        assert_eq!(candidates[0].url, "https://c0.com");
        assert_eq!(candidates[9].url, "https://c9.com");
    }

    #[test]
    fn parse_fewer_than_max_is_fine() {
        let candidates = parse_candidates(r#"[{"url": "a.com"}]"#).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].description, "");
    }

    #[test]
    fn parse_drops_invalid_entries() {
        let reply = r#"[
            {"url": "a.com", "description": "ok"},
            {"description": "no url"},
            {"url": "", "description": "blank url"},
            {"url": 7},
            "b.com",
            {"url": "c.com", "description": 3}
        ]"#;
        let candidates = parse_candidates(reply).unwrap();
        assert_eq!(urls(&candidates), vec!["a.com", "c.com"]);
        assert_eq!(candidates[1].description, "");
    }

    #[test]
    fn clean_reply_leaves_plain_json() {
        assert_eq!(clean_reply(r#"  [1, 2]  "#), "[1, 2]");
    }

    #[test]
    fn clean_reply_unclosed_fence_keeps_body() {
        assert_eq!(clean_reply("```json\n[1]"), "[1]");
    }

    #[test]
    fn clean_reply_bad_escape_falls_back_to_quote_strip() {
        // \q is not a valid JSON escape, so the manual unwrap kicks in.
        assert_eq!(clean_reply(r#""[\"a\q\"]""#), r#"["a\q"]"#);
    }

    #[tokio::test]
    async fn discover_returns_parsed_candidates() {
        let chat = Arc::new(crate::chat::mock::MockChat::new(vec![format!(
            "```json\n{}\n```",
            TWO
        )]));
        let discoverer = Discoverer::new(chat.clone());

        let candidates = discoverer.discover("example.com").await;
        assert_eq!(candidates.len(), 2);
        assert_eq!(chat.calls(), 1);
        assert!(chat.prompts()[0].contains("example.com"));
    }

    #[tokio::test]
    async fn discover_swallows_unparsable_reply() {
        let chat = Arc::new(crate::chat::mock::MockChat::new(vec![
            "not json".to_string(),
        ]));
        let candidates = Discoverer::new(chat).discover("example.com").await;
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn discover_swallows_provider_error() {
        let chat = Arc::new(crate::chat::mock::MockChat::failing("503 upstream"));
        let candidates = Discoverer::new(chat).discover("example.com").await;
        assert!(candidates.is_empty());
    }
}
