//! The conversation adapter.
//!
//! Holds per-conversation state (scraped request parameters plus the last
//! id triple returned by the service) and drives the streaming chat
//! endpoint one turn at a time. Calls are serialized by `&mut self`;
//! the service itself enforces per-conversation ordering.

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use sidechat_auth::TokenCache;
use sidechat_core::{AnswerData, Endpoints, Error, ProviderEvent, Result};

use crate::api;
use crate::scrape::{self, RequestParams};
use crate::wire;

/// State threading a multi-turn conversation through the remote service.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    pub request_params: RequestParams,
    /// Conversation id, response id, choice id. Empty strings before the
    /// first exchange; overwritten wholesale after each successful turn.
    pub context_ids: [String; 3],
}

impl ConversationContext {
    fn seed(request_params: RequestParams) -> Self {
        Self {
            request_params,
            context_ids: [String::new(), String::new(), String::new()],
        }
    }
}

/// Arguments for a single turn.
pub struct GenerateAnswerParams<'a> {
    pub prompt: &'a str,
    /// Aborts the in-flight chat request when triggered. No events are
    /// emitted for an aborted turn.
    pub signal: CancellationToken,
    /// Receives `Answer` (when text was produced) followed by `Done`.
    pub on_event: &'a mut (dyn FnMut(ProviderEvent) + Send),
}

/// Generic chat provider capability.
#[async_trait]
pub trait Provider {
    async fn generate_answer(&mut self, params: GenerateAnswerParams<'_>)
        -> Result<CleanupHandle>;

    /// Discard conversation state; the next turn re-scrapes request
    /// parameters and restarts id chaining. No network effect.
    fn reset_conversation(&mut self);
}

/// Provider that drives the chat web service through its scraped session.
pub struct WebSessionProvider {
    client: Client,
    endpoints: Endpoints,
    token: String,
    conversation: Option<ConversationContext>,
}

impl WebSessionProvider {
    pub fn new(client: Client, endpoints: Endpoints, token: String) -> Self {
        Self {
            client,
            endpoints,
            token,
            conversation: None,
        }
    }

    /// Construct a provider by resolving a session token first (cached for
    /// ten seconds in `cache`).
    pub async fn from_session(
        client: Client,
        endpoints: Endpoints,
        cache: &TokenCache,
    ) -> Result<Self> {
        let token = sidechat_auth::access_token(&client, &endpoints, cache).await?;
        Ok(Self::new(client, endpoints, token))
    }

    /// Current conversation state, if a turn has been initiated.
    pub fn conversation_context(&self) -> Option<&ConversationContext> {
        self.conversation.as_ref()
    }

    fn generate_request_id() -> u32 {
        // Correlation id for the query string, not a security token.
        rand::rng().random_range(100_000..=999_999)
    }
}

#[async_trait]
impl Provider for WebSessionProvider {
    async fn generate_answer(
        &mut self,
        params: GenerateAnswerParams<'_>,
    ) -> Result<CleanupHandle> {
        // Lazily establish the conversation: scrape once, seed empty ids.
        let ctx = match self.conversation.take() {
            Some(ctx) => ctx,
            None => ConversationContext::seed(
                scrape::fetch_request_params(&self.client, &self.endpoints).await?,
            ),
        };

        let at_value = ctx.request_params.at_value.clone().unwrap_or_default();
        let bl_value = ctx.request_params.bl_value.clone().unwrap_or_default();
        let f_req = wire::encode_chat_request(params.prompt, &ctx.context_ids)?;
        let previous_response_id = ctx.context_ids[1].clone();
        // Reinstall before awaiting so a failed turn keeps the context.
        self.conversation = Some(ctx);

        let req_id = Self::generate_request_id().to_string();
        let request = self
            .client
            .post(&self.endpoints.stream_url)
            .query(&[
                ("bl", bl_value.as_str()),
                ("_reqid", req_id.as_str()),
                ("rt", "c"),
            ])
            .form(&[("at", at_value.as_str()), ("f.req", f_req.as_str())])
            .send();

        let resp = tokio::select! {
            _ = params.signal.cancelled() => return Err(Error::Aborted),
            resp = request => resp?,
        };
        let raw = tokio::select! {
            _ = params.signal.cancelled() => return Err(Error::Aborted),
            raw = resp.text() => raw?,
        };

        let reply = wire::parse_chat_response(&raw)?;
        debug!(text = %reply.text, ids = ?reply.ids, "chat turn completed");

        if let Some(ctx) = self.conversation.as_mut() {
            ctx.context_ids = reply.ids.clone();
        }

        let [conversation_id, response_id, _] = reply.ids;
        if !reply.text.is_empty() {
            (params.on_event)(ProviderEvent::Answer {
                data: AnswerData {
                    text: reply.text,
                    message_id: response_id,
                    conversation_id: conversation_id.clone(),
                    parent_message_id: previous_response_id,
                },
            });
        }
        (params.on_event)(ProviderEvent::Done);

        let cleanup = CleanupHandle {
            client: self.client.clone(),
            endpoints: self.endpoints.clone(),
            token: self.token.clone(),
            conversation_id: (!conversation_id.is_empty()).then_some(conversation_id),
        };
        cleanup.dispatch();
        Ok(cleanup)
    }

    fn reset_conversation(&mut self) {
        self.conversation = None;
    }
}

/// Best-effort marker that hides the server-side conversation.
///
/// `dispatch` runs detached: no ordering guarantee relative to subsequent
/// calls, failures logged at debug level only. Safe to invoke repeatedly.
#[derive(Debug, Clone)]
pub struct CleanupHandle {
    client: Client,
    endpoints: Endpoints,
    token: String,
    conversation_id: Option<String>,
}

impl CleanupHandle {
    pub fn dispatch(&self) {
        let Some(conversation_id) = self.conversation_id.clone() else {
            return;
        };
        let client = self.client.clone();
        let endpoints = self.endpoints.clone();
        let token = self.token.clone();
        tokio::spawn(async move {
            if let Err(err) = api::set_conversation_property(
                &client,
                &endpoints,
                &token,
                &conversation_id,
                &json!({ "is_visible": false }),
            )
            .await
            {
                debug!("conversation cleanup failed: {err}");
            }
        });
    }
}
