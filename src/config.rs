use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub watcher: WatcherConfig,
    /// Optional as a whole; without it every notification attempt fails
    /// with a configuration error.
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Flat wait enforced ahead of every task, in milliseconds.
    pub delay_ms: u64,
    /// Per-request timeout, in seconds.
    pub request_timeout: u64,
    pub user_agent: String,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            delay_ms: 5_000,
            request_timeout: 30,
            user_agent: concat!("Lookout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: Option<String>,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "Lookout".to_string()
}

fn default_use_tls() -> bool {
    true
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Add local config (ignored by git)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix "LOOKOUT"
            .add_source(Environment::with_prefix("LOOKOUT").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watcher.request_timeout == 0 {
            return Err(ConfigError::Message(
                "watcher request_timeout must be greater than 0".into(),
            ));
        }

        if self.watcher.user_agent.is_empty() {
            return Err(ConfigError::Message(
                "watcher user_agent must not be empty".into(),
            ));
        }

        if let Some(smtp) = &self.smtp {
            if smtp.port == 0 {
                return Err(ConfigError::Message("SMTP port must be greater than 0".into()));
            }
            if smtp.host.is_empty() {
                return Err(ConfigError::Message("SMTP host must not be empty".into()));
            }
            if smtp.username.is_empty() {
                return Err(ConfigError::Message("SMTP username must not be empty".into()));
            }
        }

        Ok(())
    }

    /// Address used for data-quality alerts: the notification account's
    /// from-address, falling back to its username.
    pub fn operator_address(&self) -> Option<String> {
        self.smtp
            .as_ref()
            .map(|smtp| smtp.from_address.clone().unwrap_or_else(|| smtp.username.clone()))
    }
}
