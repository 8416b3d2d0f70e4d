use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used when none is named explicitly
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Transport timeout for provider requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// A recipe can be requested once the list holds more than this many ingredients
    #[serde(default = "default_min_ingredients")]
    pub min_ingredients: usize,
    /// HTTP relay settings
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Configuration for a specific recipe provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "mistralai/Mistral-7B-Instruct-v0.3").
    /// Each provider picks its own model when unset.
    #[serde(default)]
    pub model: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Where the relay listens
#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    #[serde(default = "default_relay_host")]
    pub host: String,
    #[serde(default = "default_relay_port")]
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_relay_host(),
            port: default_relay_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut config = Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            timeout: default_timeout(),
            min_ingredients: default_min_ingredients(),
            relay: RelayConfig::default(),
        };
        config.ensure_default_provider();
        config
    }
}

// Default value functions
fn default_provider() -> String {
    "huggingface".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout() -> u64 {
    30
}

fn default_min_ingredients() -> usize {
    3
}

fn default_relay_host() -> String {
    "127.0.0.1".to_string()
}

fn default_relay_port() -> u16 {
    8888
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CHEF_ENZO__ prefix
    /// 2. chef-enzo.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CHEF_ENZO__PROVIDERS__HUGGINGFACE__MODEL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Make sure the Hugging Face provider exists when it is the default but
    /// nothing configured it
    fn ensure_default_provider(&mut self) {
        if self.default_provider == "huggingface" {
            self.providers
                .entry(self.default_provider.clone())
                .or_default();
        }
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("chef-enzo").required(false))
        // Use double underscore for nested: CHEF_ENZO__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("CHEF_ENZO")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    config.ensure_default_provider();
    Ok(config)
}
