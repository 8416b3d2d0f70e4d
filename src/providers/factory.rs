use crate::config::{AppConfig, ProviderConfig};
use crate::error::RecipeError;
use crate::providers::{
    AnthropicProvider, HuggingFaceProvider, OpenAIProvider, RecipeProvider, RelayProvider,
};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Option<Duration>,
    ) -> Result<Box<dyn RecipeProvider>, RecipeError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(RecipeError::Provider(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "huggingface" => Ok(Box::new(HuggingFaceProvider::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            "relay" => Ok(Box::new(RelayProvider::new(config, timeout)?)),
            _ => Err(RecipeError::Provider(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Create the named provider, falling back to the configured default
    pub fn from_config(
        config: &AppConfig,
        provider_name: Option<&str>,
    ) -> Result<Box<dyn RecipeProvider>, RecipeError> {
        let provider_name = provider_name.unwrap_or(&config.default_provider);
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            RecipeError::Provider(format!(
                "Provider '{}' not found in configuration",
                provider_name
            ))
        })?;

        let timeout = (config.timeout > 0).then(|| Duration::from_secs(config.timeout));
        Self::create(provider_name, provider_config, timeout)
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(
        config: &AppConfig,
    ) -> Result<Box<dyn RecipeProvider>, RecipeError> {
        Self::from_config(config, None)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["huggingface", "openai", "anthropic", "relay"]
    }
}
