//! Bearer-authorized REST helpers for the service's conversation API.

use reqwest::{Client, Method};
use serde_json::Value;

use sidechat_core::{Endpoints, Result};

async fn request(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
    method: Method,
    path: &str,
    body: Option<&Value>,
) -> Result<()> {
    let url = format!("{}{}", endpoints.api_base, path);
    let mut req = client.request(method, &url).bearer_auth(token);
    if let Some(body) = body {
        req = req.json(body);
    }
    req.send().await?;
    Ok(())
}

/// Forward a feedback payload. The response is ignored.
pub async fn send_message_feedback(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
    payload: &Value,
) -> Result<()> {
    request(
        client,
        endpoints,
        token,
        Method::POST,
        "/conversation/message_feedback",
        Some(payload),
    )
    .await
}

/// Set a property on a server-side conversation, e.g. `{"is_visible": false}`.
pub async fn set_conversation_property(
    client: &Client,
    endpoints: &Endpoints,
    token: &str,
    conversation_id: &str,
    property: &Value,
) -> Result<()> {
    request(
        client,
        endpoints,
        token,
        Method::PATCH,
        &format!("/conversation/{conversation_id}"),
        Some(property),
    )
    .await
}
