use async_trait::async_trait;
use serde_json::json;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::LlmConfig;

use super::{parse_json_reply, LLMClient};

/// Client for any OpenAI-compatible chat-completions endpoint.
pub struct OpenAIClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAIClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::LLMError("Missing API key for LLM backend".to_string()))
    }

    fn completions_url(&self) -> String {
        if self.config.base_url.ends_with('/') {
            format!("{}chat/completions", self.config.base_url)
        } else {
            format!("{}/chat/completions", self.config.base_url)
        }
    }

    async fn chat(&self, body: serde_json::Value) -> Result<String> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLMError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
    }

    fn base_body(&self, system: &str, user: &str) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": system
                },
                {
                    "role": "user",
                    "content": user
                }
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        })
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        self.chat(self.base_body(system, user)).await
    }

    async fn generate_json(&self, system: &str, user: &str) -> Result<serde_json::Value> {
        let mut body = self.base_body(system, user);
        body["response_format"] = json!({ "type": "json_object" });
        let content = self.chat(body).await?;
        parse_json_reply(&content)
    }
}
