//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when one
//! is present).

use parlor_core::{MessageLimits, SnowflakeGenerator};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub gateway: ServerConfig,
    /// `None` selects the in-memory message store
    pub database: Option<DatabaseConfig>,
    pub chat: ChatConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Server configuration (for both API and Gateway)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// Node id baked into chat entry ids minted by this server. The API and
    /// gateway append to the same table, so their ids must differ.
    pub node_id: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Chat behaviour knobs
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,
    #[serde(default = "default_max_author_length")]
    pub max_author_length: usize,
    /// History size sent on join and when no limit is requested
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Upper bound for a requested history size
    #[serde(default = "default_history_max_limit")]
    pub history_max_limit: usize,
}

impl ChatConfig {
    pub fn limits(&self) -> MessageLimits {
        MessageLimits {
            max_content_length: self.max_content_length,
            max_author_length: self.max_author_length,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_content_length: default_max_content_length(),
            max_author_length: default_max_author_length(),
            history_limit: default_history_limit(),
            history_max_limit: default_history_max_limit(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "parlor".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    3000
}

fn default_gateway_port() -> u16 {
    5000
}

fn default_api_node_id() -> u16 {
    1
}

fn default_gateway_node_id() -> u16 {
    2
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_max_content_length() -> usize {
    MessageLimits::DEFAULT_MAX_CONTENT_LENGTH
}

fn default_max_author_length() -> usize {
    MessageLimits::DEFAULT_MAX_AUTHOR_LENGTH
}

fn default_history_limit() -> usize {
    20
}

fn default_history_max_limit() -> usize {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::default(),
            },
            api: ServerConfig {
                host: default_host(),
                port: default_api_port(),
                node_id: default_api_node_id(),
            },
            gateway: ServerConfig {
                host: default_host(),
                port: default_gateway_port(),
                node_id: default_gateway_node_id(),
            },
            database: None,
            chat: ChatConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let env = match vars.get("APP_ENV") {
            Some(raw) => Environment::parse(&raw)
                .ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            None => Environment::default(),
        };

        let database = match vars.get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: vars
                    .parse("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: vars
                    .parse("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            }),
            None => None,
        };

        let chat = ChatConfig {
            max_content_length: vars
                .parse("CHAT_MAX_CONTENT_LENGTH")?
                .unwrap_or_else(default_max_content_length),
            max_author_length: vars
                .parse("CHAT_MAX_AUTHOR_LENGTH")?
                .unwrap_or_else(default_max_author_length),
            history_limit: vars
                .parse("CHAT_HISTORY_LIMIT")?
                .unwrap_or_else(default_history_limit),
            history_max_limit: vars
                .parse("CHAT_HISTORY_MAX_LIMIT")?
                .unwrap_or_else(default_history_max_limit),
        };
        if chat.history_limit == 0 || chat.history_limit > chat.history_max_limit {
            return Err(ConfigError::InvalidValue(
                "CHAT_HISTORY_LIMIT",
                format!(
                    "{} (must be between 1 and {})",
                    chat.history_limit, chat.history_max_limit
                ),
            ));
        }

        let api_node_id = vars
            .node_id("API_NODE_ID")?
            .unwrap_or_else(default_api_node_id);
        let gateway_node_id = vars
            .node_id("GATEWAY_NODE_ID")?
            .unwrap_or_else(default_gateway_node_id);
        if api_node_id == gateway_node_id {
            return Err(ConfigError::InvalidValue(
                "GATEWAY_NODE_ID",
                format!("{gateway_node_id} (must differ from API_NODE_ID)"),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars.parse("API_PORT")?.unwrap_or_else(default_api_port),
                node_id: api_node_id,
            },
            gateway: ServerConfig {
                host: vars.get("GATEWAY_HOST").unwrap_or_else(default_host),
                port: vars.parse("GATEWAY_PORT")?.unwrap_or_else(default_gateway_port),
                node_id: gateway_node_id,
            },
            database,
            chat,
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Present, non-empty value
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn parse<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(None),
        }
    }

    fn node_id(&self, key: &'static str) -> Result<Option<u16>, ConfigError> {
        match self.parse::<u16>(key)? {
            Some(id) if id > SnowflakeGenerator::MAX_NODE_ID => Err(ConfigError::InvalidValue(
                key,
                format!("{id} (must be at most {})", SnowflakeGenerator::MAX_NODE_ID),
            )),
            other => Ok(other),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
