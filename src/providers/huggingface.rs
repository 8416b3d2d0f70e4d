use crate::config::ProviderConfig;
use crate::error::RecipeError;
use crate::providers::{
    build_client, chat_completion_body, first_choice_content, read_json, RecipeProvider,
};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
const DEFAULT_BASE_URL: &str = "https://router.huggingface.co";

/// Hugging Face inference router, spoken to through its chat-completions API
pub struct HuggingFaceProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl HuggingFaceProvider {
    /// Create a new Hugging Face provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, RecipeError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("HF_ACCESS_TOKEN").ok())
            .ok_or_else(|| {
                RecipeError::Provider(
                    "HF_ACCESS_TOKEN not found in config or environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(HuggingFaceProvider {
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
        HuggingFaceProvider {
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
impl RecipeProvider for HuggingFaceProvider {
    fn provider_name(&self) -> &str {
        "huggingface"
    }

    async fn suggest_recipe(&self, ingredients: &[String]) -> Result<String, RecipeError> {
        debug!("Requesting recipe from {} ({})", self.base_url, self.model);
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&chat_completion_body(
                &self.model,
                ingredients,
                self.temperature,
                self.max_tokens,
            ))
            .send()
            .await?;

        let body = read_json(response).await?;
        first_choice_content(&body)
    }
}
