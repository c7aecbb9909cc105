//! Bot configuration
//!
//! Settings are read from, in increasing order of precedence:
//! 1. a `.env` file in the current directory or one of its parents
//! 2. process environment variables
//! 3. command line flags (applied by the binary)
//!
//! ## Variables
//! - `VISIT_STORE`: `memory` (default) or `firebase`
//! - `DATABASE_ENDPOINT`: Firebase database URL, required for `firebase`
//! - `RESTAURANT_SEARCH`: `static` (default) or `yelp`
//! - `YELP_CLIENT_ID`, `YELP_CLIENT_SECRET`: Yelp credentials; the secret
//!   alone is used as an API key
//! - `YELP_PREFERRED_LOCATION`: search location, default "Lake Charles"
//! - `YELP_API_URL`: API base URL, default `https://api.yelp.com/`
//! - `INTENT_RECOGNIZER`: `regex` (default) or `luis`
//! - `LUIS_MODEL_ID`, `LUIS_SUBSCRIPTION_KEY`, `LUIS_URL`: LUIS application
//! - `HTTP_TIMEOUT_SECS`: collaborator request timeout, default 10

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;

use crate::error::{BotError, BotResult};
use crate::services::DEFAULT_YELP_API_URL;

pub const DEFAULT_PREFERRED_LOCATION: &str = "Lake Charles";
pub const DEFAULT_LUIS_URL: &str = "https://westus.api.cognitive.microsoft.com/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Where visit history comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreBackend {
    #[default]
    Memory,
    Firebase,
}

/// Where restaurant candidates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SearchBackend {
    #[default]
    Static,
    Yelp,
}

/// How utterances are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RecognizerBackend {
    #[default]
    Regex,
    Luis,
}

macro_rules! backend_from_str {
    ($backend:ty, $variable:literal) => {
        impl FromStr for $backend {
            type Err = BotError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$backend as ValueEnum>::from_str(s.trim(), true).map_err(|_| BotError::ConfigError {
                    message: format!("{} has unknown value '{}'", $variable, s),
                })
            }
        }

        impl fmt::Display for $backend {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.to_possible_value() {
                    Some(value) => write!(f, "{}", value.get_name()),
                    None => write!(f, "{:?}", self),
                }
            }
        }
    };
}

backend_from_str!(StoreBackend, "VISIT_STORE");
backend_from_str!(SearchBackend, "RESTAURANT_SEARCH");
backend_from_str!(RecognizerBackend, "INTENT_RECOGNIZER");

/// LUIS application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuisSettings {
    pub url: String,
    pub model_id: String,
    pub subscription_key: String,
}

/// Yelp settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YelpSettings {
    pub api_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Complete bot configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub store: StoreBackend,
    pub database_endpoint: Option<String>,
    pub search: SearchBackend,
    pub yelp: YelpSettings,
    pub preferred_location: String,
    pub recognizer: RecognizerBackend,
    pub luis: LuisSettings,
    pub http_timeout: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            database_endpoint: None,
            search: SearchBackend::default(),
            yelp: YelpSettings {
                api_url: DEFAULT_YELP_API_URL.to_string(),
                client_id: None,
                client_secret: None,
            },
            preferred_location: DEFAULT_PREFERRED_LOCATION.to_string(),
            recognizer: RecognizerBackend::default(),
            luis: LuisSettings {
                url: DEFAULT_LUIS_URL.to_string(),
                model_id: String::new(),
                subscription_key: String::new(),
            },
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl BotConfig {
    /// Load from `.env` (if present) and the process environment
    pub fn from_env() -> BotResult<Self> {
        // A missing .env file is fine; anything already exported wins
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from a specific env file, falling back to the process environment
    pub fn from_env_file(path: &Path) -> BotResult<Self> {
        let mut file_values = HashMap::new();
        let entries = dotenv::from_path_iter(path).map_err(|e| BotError::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        for entry in entries {
            let (key, value) = entry.map_err(|e| BotError::ConfigError {
                message: format!("bad line in {}: {e}", path.display()),
            })?;
            file_values.insert(key, value);
        }

        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file_values.get(key).cloned()))
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());
        let defaults = Self::default();

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| BotError::ConfigError {
                    message: format!("HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"),
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        let config = Self {
            store: get("VISIT_STORE").map(|raw| raw.parse::<StoreBackend>()).transpose()?.unwrap_or_default(),
            database_endpoint: get("DATABASE_ENDPOINT"),
            search: get("RESTAURANT_SEARCH").map(|raw| raw.parse::<SearchBackend>()).transpose()?.unwrap_or_default(),
            yelp: YelpSettings {
                api_url: get("YELP_API_URL").unwrap_or(defaults.yelp.api_url),
                client_id: get("YELP_CLIENT_ID"),
                client_secret: get("YELP_CLIENT_SECRET"),
            },
            preferred_location: get("YELP_PREFERRED_LOCATION").unwrap_or(defaults.preferred_location),
            recognizer: get("INTENT_RECOGNIZER").map(|raw| raw.parse::<RecognizerBackend>()).transpose()?.unwrap_or_default(),
            luis: LuisSettings {
                url: get("LUIS_URL").unwrap_or(defaults.luis.url),
                model_id: get("LUIS_MODEL_ID").unwrap_or_default(),
                subscription_key: get("LUIS_SUBSCRIPTION_KEY").unwrap_or_default(),
            },
            http_timeout,
        };
        Ok(config)
    }

    /// Check that every selected backend has what it needs
    pub fn validate(&self) -> BotResult<()> {
        if self.store == StoreBackend::Firebase && self.database_endpoint.is_none() {
            return Err(BotError::ConfigError {
                message: "DATABASE_ENDPOINT is required for the firebase visit store".to_string(),
            });
        }
        if self.search == SearchBackend::Yelp && self.yelp.client_secret.is_none() {
            return Err(BotError::ConfigError {
                message: "YELP_CLIENT_SECRET is required for yelp search".to_string(),
            });
        }
        if self.recognizer == RecognizerBackend::Luis
            && (self.luis.model_id.is_empty() || self.luis.subscription_key.is_empty())
        {
            return Err(BotError::ConfigError {
                message: "LUIS_MODEL_ID and LUIS_SUBSCRIPTION_KEY are required for the luis recognizer".to_string(),
            });
        }
        if self.http_timeout.is_zero() {
            return Err(BotError::ConfigError {
                message: "HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
