//! Completion gateway
//!
//! Narrow interface to the hosted chat-completion API. The rest of the
//! pipeline only sees [`CompletionGateway`], so tests can substitute a stub.

use async_trait::async_trait;

use crate::config::{completion, Config};
use crate::error::{GatewayError, GeoJsonMcpError, Result};
use crate::geo::types::{ChatMessage, ChatRequest, ChatResponse};

/// Interface to the completion provider
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Model identifier this gateway completes with
    fn model(&self) -> &str;

    /// Send a message sequence and return the raw completion text
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Gateway backed by an OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiGateway {
    /// HTTP client
    http_client: reqwest::Client,

    /// API credentials and endpoint
    config: Config,
}

impl OpenAiGateway {
    /// Create a new gateway from configuration
    pub fn new(config: Config) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionGateway for OpenAiGateway {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: completion::TEMPERATURE,
            max_tokens: completion::MAX_TOKENS,
        };

        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                GeoJsonMcpError::Gateway(GatewayError::Transport {
                    message: e.to_string(),
                })
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(GeoJsonMcpError::Gateway(GatewayError::RequestFailed {
                status,
                message: text,
            }));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            GeoJsonMcpError::Gateway(GatewayError::Transport {
                message: e.to_string(),
            })
        })?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or(GeoJsonMcpError::Gateway(GatewayError::EmptyCompletion))?;

        Ok(choice.message.content)
    }
}
