//! Session authentication for the sidechat provider.
//!
//! The remote service issues short-lived bearer tokens through its session
//! endpoint. Tokens are cached in memory for ten seconds to avoid refetching
//! the session on every call.

pub mod cache;
pub mod session;

pub use cache::TokenCache;
pub use session::{access_token, fetch_access_token, ACCESS_TOKEN_KEY};
