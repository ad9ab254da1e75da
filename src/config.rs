use config::{Config, Environment, File};
use serde::Deserialize;

use crate::errors::ServiceError;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_TX_LOG_CAP: usize = 500;
const DEFAULT_PAGE_SIZE: usize = 12;
const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 256;
const DEFAULT_ASSISTANT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_ASSISTANT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_ASSISTANT_TIMEOUT_SECS: u64 = 30;

/// Application configuration, loaded from `config/default.toml` (optional)
/// with `ZENITH_*` environment overrides.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Hard cap on the audit ledger; oldest entries beyond it are dropped.
    #[serde(default = "default_tx_log_cap")]
    pub transaction_log_cap: usize,

    /// Fixed page size for inventory pagination.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Settings for the external text-generation call.
#[derive(Clone, Debug, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_assistant_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_assistant_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_assistant_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            transaction_log_cap: default_tx_log_cap(),
            page_size: default_page_size(),
            event_channel_capacity: default_event_channel_capacity(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: default_assistant_endpoint(),
            model: default_assistant_model(),
            api_key: String::new(),
            timeout_secs: default_assistant_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Loads configuration, tolerating a missing config file.
    pub fn load() -> Result<Self, ServiceError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("ZENITH").separator("__"))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| ServiceError::ConfigError(e.to_string()))
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_tx_log_cap() -> usize {
    DEFAULT_TX_LOG_CAP
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_event_channel_capacity() -> usize {
    DEFAULT_EVENT_CHANNEL_CAPACITY
}
fn default_assistant_endpoint() -> String {
    DEFAULT_ASSISTANT_ENDPOINT.to_string()
}
fn default_assistant_model() -> String {
    DEFAULT_ASSISTANT_MODEL.to_string()
}
fn default_assistant_timeout_secs() -> u64 {
    DEFAULT_ASSISTANT_TIMEOUT_SECS
}
