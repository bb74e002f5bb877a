pub mod openai;

use async_trait::async_trait;

use crate::domain::error::{AppError, Result};

pub use openai::OpenAIClient;

/// Chat-completion backend. The application layer only ever talks to this
/// trait so tests can substitute a canned client.
#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn generate(&self, system: &str, user: &str) -> Result<String>;

    /// Like `generate`, but the reply must be a single JSON object. The
    /// default parses the text reply; backends with a native JSON mode
    /// should override this.
    async fn generate_json(&self, system: &str, user: &str) -> Result<serde_json::Value> {
        let content = self.generate(system, user).await?;
        parse_json_reply(&content)
    }
}

/// Parse a model reply as JSON, tolerating markdown code fences around it.
pub(crate) fn parse_json_reply(content: &str) -> Result<serde_json::Value> {
    let trimmed = content.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(inner)
        .map_err(|e| AppError::LLMError(format!("Model reply is not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_fenced_json() {
        let plain = parse_json_reply(r#"{"score": 80}"#).unwrap();
        assert_eq!(plain["score"], 80);

        let fenced = parse_json_reply("```json\n{\"score\": 80}\n```").unwrap();
        assert_eq!(fenced["score"], 80);
    }

    #[test]
    fn rejects_non_json_reply() {
        assert!(parse_json_reply("I cannot answer that.").is_err());
    }
}
