//! Chat proxy with a degrade-to-message failure policy
//!
//! Unlike the status-passthrough routes, the chat proxy never surfaces a
//! backend failure as an HTTP error: every outcome becomes a `ChatResponse`
//! whose `content` the chat UI renders as a message bubble.

use crate::backend::{Backend, BackendRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const CHAT_PATH: &str = "/api/v1/chat";

pub const BACKEND_ERROR_REPLY: &str = "⚠️ Error: Could not fetch response from backend.";
pub const EMPTY_CONTENT_REPLY: &str = "⚠️ No content returned from backend.";
pub const UNAVAILABLE_REPLY: &str = "⚠️ Chat backend unavailable. Try again shortly.";

pub const MISSING_MESSAGE_ERROR: &str = "Message is missing in the request body";
pub const MISSING_MESSAGE_REPLY: &str = "I couldn't understand your message. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request forwarded to the backend. The backend expects `messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<Vec<ChatMessage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_documents: Option<Vec<Map<String, Value>>>,
}

impl ChatResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source_documents: None,
        }
    }
}

/// Body accepted from chat clients: `messages` or the older `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundChat {
    #[serde(default)]
    pub messages: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub chat_history: Option<Vec<ChatMessage>>,
}

impl InboundChat {
    /// Normalize into a backend request, or `None` when there is no text.
    pub fn into_request(self) -> Option<ChatRequest> {
        let text = self
            .messages
            .filter(|m| !m.trim().is_empty())
            .or(self.message.filter(|m| !m.trim().is_empty()))?;
        Some(ChatRequest {
            messages: text,
            chat_history: self.chat_history,
        })
    }
}

#[derive(Clone)]
pub struct ChatService {
    backend: Arc<dyn Backend>,
}

impl ChatService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Forward one chat turn. Always yields a displayable response.
    pub async fn process_chat(&self, request: &ChatRequest) -> ChatResponse {
        let body = match serde_json::to_value(request) {
            Ok(body) => body,
            Err(e) => {
                log::error!("Could not encode chat request: {}", e);
                return ChatResponse::text(UNAVAILABLE_REPLY);
            }
        };

        log::info!("Forwarding chat request to backend");
        let response = match self
            .backend
            .send(BackendRequest::post_json(CHAT_PATH, body))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::error!("Network failure to backend chat: {}", e);
                return ChatResponse::text(UNAVAILABLE_REPLY);
            }
        };

        if !response.is_success() {
            log::error!(
                "Backend chat API error ({}): {}",
                response.status,
                response.text()
            );
            return ChatResponse::text(BACKEND_ERROR_REPLY);
        }

        match response.json::<BackendChatReply>() {
            Ok(reply) => {
                let content = reply
                    .content
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| EMPTY_CONTENT_REPLY.to_string());
                ChatResponse {
                    content,
                    source_documents: reply.source_documents,
                }
            }
            Err(e) => {
                log::error!("Backend chat reply could not be decoded: {}", e);
                ChatResponse::text(UNAVAILABLE_REPLY)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct BackendChatReply {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    source_documents: Option<Vec<Map<String, Value>>>,
}
