//! Session token retrieval.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use sidechat_core::{Endpoints, Error, Result};

use crate::cache::TokenCache;

/// Cache key the access token is stored under.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Get an access token, consulting the cache before hitting the network.
pub async fn access_token(
    client: &Client,
    endpoints: &Endpoints,
    cache: &TokenCache,
) -> Result<String> {
    if let Some(token) = cache.get(ACCESS_TOKEN_KEY) {
        return Ok(token);
    }
    fetch_access_token(client, endpoints, cache).await
}

/// Fetch a fresh token from the session endpoint and cache it.
///
/// A 403 means the request was swallowed by the service's bot-protection
/// layer. The body is parsed leniently: a non-JSON response reads as an
/// empty object, which then fails as `Unauthenticated`.
pub async fn fetch_access_token(
    client: &Client,
    endpoints: &Endpoints,
    cache: &TokenCache,
) -> Result<String> {
    let resp = client.get(&endpoints.session_url).send().await?;
    if resp.status() == StatusCode::FORBIDDEN {
        return Err(Error::BlockedByProtection);
    }

    let data: Value = resp.json().await.unwrap_or_else(|_| Value::Object(Default::default()));
    let token = data
        .get("accessToken")
        .and_then(|v| v.as_str())
        .filter(|t| !t.is_empty());

    match token {
        Some(token) => {
            debug!("session token refreshed");
            cache.insert(ACCESS_TOKEN_KEY, token);
            Ok(token.to_string())
        }
        None => Err(Error::Unauthenticated),
    }
}
