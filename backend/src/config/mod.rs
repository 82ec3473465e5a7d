//! Configuration management for the Trackwell backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: TW__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use trackwell_shared::policy::ScoringPolicy;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub scoring: ScoringPolicy,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fixed UTC offset, in minutes, used to resolve local calendar days.
    pub timezone_offset_minutes: i32,
    /// Daily calorie goal applied when a request does not carry one (kcal).
    pub default_calorie_goal_kcal: f64,
}

/// Event store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Optional JSON seed file loaded into the in-memory store at startup.
    pub seed_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            engine: EngineConfig {
                timezone_offset_minutes: 0,
                default_calorie_goal_kcal: 2000.0,
            },
            store: StoreConfig { seed_path: None },
            scoring: ScoringPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with TW__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(
                config::File::with_name(&config_file)
                    .required(false)
            )
            // Override with environment variables (TW__ prefix)
            // e.g., TW__SERVER__PORT=9000 sets server.port
            .add_source(
                config::Environment::with_prefix("TW")
                    .separator("__")
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
