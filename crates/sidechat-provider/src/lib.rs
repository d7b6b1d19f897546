//! Chat provider backed by a scraped web session.
//!
//! The remote service has no documented API; this crate logs in by scraping
//! session tokens, drives the service's internal streaming chat endpoint,
//! and unwraps its obfuscated nested-JSON responses into plain answers.

pub mod api;
pub mod provider;
pub mod scrape;
pub mod wire;

pub use provider::{
    CleanupHandle, ConversationContext, GenerateAnswerParams, Provider, WebSessionProvider,
};
pub use scrape::RequestParams;
pub use wire::ParsedReply;
