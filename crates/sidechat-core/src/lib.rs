//! Sidechat core — shared error type, upstream endpoints, provider events.

pub mod config;
pub mod error;
pub mod events;

pub use config::Endpoints;
pub use error::{Error, Result};
pub use events::{AnswerData, ProviderEvent};
