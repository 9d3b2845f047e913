use crate::domain::contract::{LlmGiftIdea, LlmGiftIdeas};
use crate::domain::recommendation::Candidate;
use anyhow::Context;

pub fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        // Remove Markdown fences (```json ... ``` or ``` ... ```).
        let mut inner = trimmed;
        if let Some(after_first) = inner.splitn(2, '\n').nth(1) {
            inner = after_first;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    // Best-effort extraction: the model may emit either a bare array of
    // ideas or the wrapping object. First bracket of either kind to its
    // matching last bracket.
    let obj = span(trimmed, '{', '}');
    let arr = span(trimmed, '[', ']');
    match (obj, arr) {
        (Some(o), Some(a)) => Some(if a.0 < o.0 { cut(trimmed, a) } else { cut(trimmed, o) }),
        (Some(o), None) => Some(cut(trimmed, o)),
        (None, Some(a)) => Some(cut(trimmed, a)),
        (None, None) => None,
    }
}

fn span(text: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then_some((start, end))
}

fn cut(text: &str, (start, end): (usize, usize)) -> String {
    text[start..=end].trim().to_string()
}

pub fn parse_candidates(text: &str) -> anyhow::Result<Vec<Candidate>> {
    let json_str = extract_json(text).unwrap_or_else(|| text.trim().to_string());

    // Accept both { "ideas": [...] } and a bare [...] payload.
    let wire = if json_str.starts_with('[') {
        let ideas = serde_json::from_str::<Vec<LlmGiftIdea>>(&json_str)
            .with_context(|| format!("LLM output is not a valid gift idea array: {json_str}"))?;
        LlmGiftIdeas { ideas }
    } else {
        serde_json::from_str::<LlmGiftIdeas>(&json_str)
            .with_context(|| format!("LLM output is not a valid gift idea object: {json_str}"))?
    };

    wire.validate_and_into_candidates()
}
