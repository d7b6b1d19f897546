//! Wire codec for the streaming chat endpoint.
//!
//! The endpoint speaks an undocumented batch format: the request prompt is
//! a JSON-encoded string nested inside a JSON array, and the response is
//! newline-delimited text whose fourth line holds a JSON envelope with the
//! real payload JSON-encoded a second time at a fixed position. Positions
//! are inherently fragile; every shape mismatch collapses into the single
//! `EmptyResponse` error instead of panicking on a missing index.

use serde_json::{json, Value};

use sidechat_core::{Error, Result};

/// Answer text plus the id triple that chains the next turn:
/// conversation id, response id, and the selected choice id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub text: String,
    pub ids: [String; 3],
}

/// Build the `f.req` form value: `[null, inner]` where `inner` is the
/// JSON-encoded string `[[prompt], null, [id, id, id]]`.
pub fn encode_chat_request(prompt: &str, context_ids: &[String; 3]) -> Result<String> {
    let inner = serde_json::to_string(&json!([[prompt], Value::Null, context_ids]))?;
    Ok(serde_json::to_string(&json!([Value::Null, inner]))?)
}

/// Unwrap a raw streaming response into text and continuation ids.
pub fn parse_chat_response(raw: &str) -> Result<ParsedReply> {
    decode(raw).ok_or(Error::EmptyResponse)
}

fn decode(raw: &str) -> Option<ParsedReply> {
    let line = raw.split('\n').nth(3)?;
    let envelope: Value = serde_json::from_str(line).ok()?;
    let payload_raw = envelope.get(0)?.get(2)?.as_str()?;
    let payload: Value = serde_json::from_str(payload_raw).ok()?;
    if payload.is_null() {
        return None;
    }

    // The answer slot sometimes carries one extra level of array nesting.
    let text_node = payload.get(0)?.get(0)?;
    let text = match text_node.as_str() {
        Some(s) => s.to_string(),
        None => text_node.get(0)?.as_str()?.to_string(),
    };

    let pair = payload.get(1)?;
    let conversation_id = pair.get(0)?.as_str()?.to_string();
    let response_id = pair.get(1)?.as_str()?.to_string();
    let choice_id = payload.get(4)?.get(0)?.get(0)?.as_str()?.to_string();

    Some(ParsedReply {
        text,
        ids: [conversation_id, response_id, choice_id],
    })
}
