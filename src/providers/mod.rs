mod anthropic;
mod factory;
mod huggingface;
mod open_ai;
mod prompt;
mod relay;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use huggingface::HuggingFaceProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_user_message, join_ingredients, RECIPE_ASSISTANT_PROMPT};
pub use relay::RelayProvider;

use crate::error::RecipeError;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::time::Duration;

/// The external collaborator that turns an ingredient list into a markdown recipe
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Get the provider name (e.g., "huggingface", "relay")
    fn provider_name(&self) -> &str;

    /// Ask for one recipe using the given ingredients
    async fn suggest_recipe(&self, ingredients: &[String]) -> Result<String, RecipeError>;
}

pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, RecipeError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Body for an OpenAI-compatible `/v1/chat/completions` call
pub(crate) fn chat_completion_body(
    model: &str,
    ingredients: &[String],
    temperature: f32,
    max_tokens: u32,
) -> Value {
    json!({
        "model": model,
        "messages": [
            {"role": "system", "content": RECIPE_ASSISTANT_PROMPT},
            {"role": "user", "content": build_user_message(ingredients)}
        ],
        "temperature": temperature,
        "max_tokens": max_tokens
    })
}

/// Turn a provider response into JSON, mapping non-success statuses to errors
pub(crate) async fn read_json(response: Response) -> Result<Value, RecipeError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RecipeError::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    debug!("{}", text);
    serde_json::from_str(&text)
        .map_err(|e| RecipeError::MalformedResponse(format!("response is not JSON: {}", e)))
}

/// Pull the first completion's text out of a chat-completions response
pub(crate) fn first_choice_content(body: &Value) -> Result<String, RecipeError> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            RecipeError::MalformedResponse(
                "Failed to extract content from response".to_string(),
            )
        })
}
