use serde::{Deserialize, Serialize};

/// Sampling temperature sent with every explanation request.
pub const TEMPERATURE: f32 = 0.7;

/// Completion token limit sent with every explanation request.
pub const MAX_TOKENS: u32 = 800;

/// A single chat turn sent to or received from the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// One explanation exchange: a system instruction turn followed by a
    /// user turn, with the fixed sampling parameters.
    pub fn new(model: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Completion response from the provider.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

/// Token accounting reported by the provider.
#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

/// Extract the assistant's reply text from a completion response.
///
/// Returns an error when the response carries no choices or only blank
/// content. An empty reply is never treated as a successful explanation.
pub fn extract_reply(response: &ChatResponse) -> Result<String, String> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| "provider response contained no choices".to_string())?;

    let text = choice.message.content.trim();
    if text.is_empty() {
        return Err("provider returned an empty reply".to_string());
    }

    Ok(text.to_string())
}
