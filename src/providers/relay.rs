use crate::config::ProviderConfig;
use crate::error::RecipeError;
use crate::providers::{build_client, RecipeProvider};
use crate::relay::RELAY_PATH;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Calls a recipe relay instead of a model, so no credentials live on this side
pub struct RelayProvider {
    client: Client,
    base_url: String,
}

impl RelayProvider {
    /// Create a relay client; `base_url` is required
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, RecipeError> {
        let base_url = config.base_url.clone().ok_or_else(|| {
            RecipeError::Provider("Relay provider requires a base_url".to_string())
        })?;

        Ok(RelayProvider {
            client: build_client(timeout)?,
            base_url,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        RelayProvider {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl RecipeProvider for RelayProvider {
    fn provider_name(&self) -> &str {
        "relay"
    }

    async fn suggest_recipe(&self, ingredients: &[String]) -> Result<String, RecipeError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url.trim_end_matches('/'), RELAY_PATH))
            .json(&json!({ "ingredients": ingredients }))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("{}", text);

        if !status.is_success() {
            // Prefer the relay's own message over the raw body
            let body = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_string))
                .unwrap_or(text);
            return Err(RecipeError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| RecipeError::MalformedResponse(format!("response is not JSON: {}", e)))?;
        body["recipe"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                RecipeError::MalformedResponse("Relay response has no recipe".to_string())
            })
    }
}
