use crate::config::OpenAiConfig;
use crate::http::{read_json, transport_error};
use domain::ports::ChatCompleter;
use domain::session::{single_turn, ChatMessage};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::error::RagError;
use shared::types::RagResult;
use std::sync::Arc;

const SERVICE: &str = "openai";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Chat-completions client for OpenAI or any API-compatible provider.
#[derive(Clone)]
pub struct OpenAiChatClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ChatCompleter for OpenAiChatClient {
    async fn complete(&self, system_context: &str, user_prompt: &str) -> RagResult<ChatMessage> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: single_turn(system_context, user_prompt),
            stream: false,
        };
        tracing::info!(model = %self.model, context_chars = system_context.chars().count(), "requesting chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        let chat_response: ChatResponse = read_json(SERVICE, response).await?;
        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| RagError::malformed(SERVICE, "response contained no choices"))
    }
}
