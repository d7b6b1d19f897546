//! Events emitted to the embedding system.

use serde::Serialize;

/// One event per callback invocation. A successful turn with answer text
/// emits `Answer` then `Done`; a turn with no text emits `Done` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ProviderEvent {
    #[serde(rename = "answer")]
    Answer { data: AnswerData },
    #[serde(rename = "DONE")]
    Done,
}

/// Payload of an `answer` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerData {
    pub text: String,
    #[serde(rename = "messageId")]
    pub message_id: String,
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
    #[serde(rename = "parentMessageId")]
    pub parent_message_id: String,
}
