//! Upstream endpoint configuration.
//!
//! The provider drives undocumented endpoints of the chat web service, so
//! every URL is injected rather than hardcoded at call sites. Tests point
//! all four at a local mock server.

use serde::{Deserialize, Serialize};

/// URLs of the remote chat service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    /// Session endpoint (GET, JSON `{ accessToken? }`, 403 = bot block).
    pub session_url: String,
    /// Public FAQ page carrying the scraped request parameters inline.
    pub faq_url: String,
    /// Internal streaming chat endpoint (POST, form-encoded).
    pub stream_url: String,
    /// REST base for conversation visibility and feedback calls.
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            session_url: "https://chat.openai.com/api/auth/session".into(),
            faq_url: "https://bard.google.com/faq".into(),
            stream_url:
                "https://bard.google.com/_/BardChatUi/data/assistant.lamda.BardFrontendService/StreamGenerate"
                    .into(),
            api_base: "https://chat.openai.com/backend-api".into(),
        }
    }
}

impl Endpoints {
    /// Rebase every endpoint onto a single host, keeping the production
    /// path layout. Used to target a mock server in tests.
    pub fn for_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            session_url: format!("{base}/api/auth/session"),
            faq_url: format!("{base}/faq"),
            stream_url: format!(
                "{base}/_/BardChatUi/data/assistant.lamda.BardFrontendService/StreamGenerate"
            ),
            api_base: format!("{base}/backend-api"),
        }
    }
}
