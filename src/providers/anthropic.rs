use crate::config::ProviderConfig;
use crate::error::RecipeError;
use crate::providers::{
    build_client, build_user_message, read_json, RecipeProvider, RECIPE_ASSISTANT_PROMPT,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, RecipeError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                RecipeError::Provider(
                    "ANTHROPIC_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.anthropic.com".to_string());

        Ok(AnthropicProvider {
            client: build_client(timeout)?,
            api_key,
            base_url,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

#[async_trait]
impl RecipeProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn suggest_recipe(&self, ingredients: &[String]) -> Result<String, RecipeError> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "system": RECIPE_ASSISTANT_PROMPT,
                "messages": [
                    {
                        "role": "user",
                        "content": build_user_message(ingredients)
                    }
                ]
            }))
            .send()
            .await?;

        let response_body = read_json(response).await?;

        response_body["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                RecipeError::MalformedResponse(
                    "Failed to extract content from Anthropic response".to_string(),
                )
            })
    }
}
