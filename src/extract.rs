// src/extract.rs — Fenced-JSON extraction from model output
//
// Structured model outputs arrive inside a ```json fenced block (the wire
// convention shared with the prompts), or as a fallback, a bare {...} span
// in otherwise free-form text. Pure function; every pattern that expects
// machine-readable output funnels through here.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

use crate::infra::errors::DraftmillError;

/// Extract a JSON value embedded in free-form model output.
///
/// Errors:
/// - `NoJsonPayload` — neither a fenced code block nor a `{...}` span exists
/// - `MalformedJson` — a payload was found but does not parse as JSON
pub fn extract_json(text: &str) -> Result<serde_json::Value, DraftmillError> {
    if let Some(block) = first_fenced_block(text) {
        return Ok(serde_json::from_str(block.trim())?);
    }

    // Fallback: widest brace span, matching the original wire convention
    // of a bare JSON object outside any fence.
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(serde_json::from_str(&text[start..=end])?),
        _ => Err(DraftmillError::NoJsonPayload),
    }
}

/// Contents of the first fenced code block that is untagged or tagged `json`.
/// An unterminated fence runs to end-of-input, which covers prefill-forced
/// outputs where the model omits the closing fence.
fn first_fenced_block(text: &str) -> Option<String> {
    let mut inside = false;
    let mut buf = String::new();

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let lang = info.split_whitespace().next().unwrap_or("");
                if lang.is_empty() || lang == "json" {
                    inside = true;
                    buf.clear();
                }
            }
            Event::Text(chunk) if inside => buf.push_str(&chunk),
            Event::End(TagEnd::CodeBlock) if inside => return Some(buf),
            _ => {}
        }
    }

    None
}
