//! # Configuration
//!
//! Manages the loading and parsing of the configuration file (`data/config.yaml`)
//! and the environment overrides used for credentials.
//! Every section has defaults, so both tools also run from the environment alone.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub aura: AuraConfig,
    #[serde(default)]
    pub killbot: KillbotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for the connected services.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServicesConfig {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub firebase: FirebaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiscordConfig {
    #[serde(default)]
    pub token: Option<String>,
    /// Environment variable holding the bot token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: None,
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FirebaseConfig {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub database_url: Option<String>,
    /// Google service-account key file. Requests are unauthenticated without it.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

/// Settings for the Discord bot.
#[derive(Debug, Deserialize, Clone)]
pub struct AuraConfig {
    #[serde(default = "default_guest_role")]
    pub guest_role: String,
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// Best-effort wait before the store lookup, for records written just before the join.
    #[serde(default)]
    pub lookup_delay_secs: u64,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
    #[serde(default = "default_job_timeout")]
    pub job_timeout_secs: u64,
}

impl Default for AuraConfig {
    fn default() -> Self {
        Self {
            guest_role: default_guest_role(),
            command_prefix: default_command_prefix(),
            lookup_delay_secs: 0,
            queue_capacity: default_queue_capacity(),
            max_concurrent_lookups: default_max_concurrent_lookups(),
            job_timeout_secs: default_job_timeout(),
        }
    }
}

impl AuraConfig {
    pub fn lookup_delay(&self) -> Duration {
        Duration::from_secs(self.lookup_delay_secs)
    }

    pub fn job_timeout(&self) -> Duration {
        Duration::from_secs(self.job_timeout_secs)
    }
}

/// Settings for the killmail relay tool.
#[derive(Debug, Deserialize, Clone)]
pub struct KillbotConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_esi_base_url")]
    pub esi_base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_error_backoff")]
    pub error_backoff_secs: u64,
    #[serde(default)]
    pub idle_delay_ms: u64,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_webhook_username")]
    pub webhook_username: String,
    #[serde(default)]
    pub webhook_avatar_url: Option<String>,
}

impl Default for KillbotConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            esi_base_url: default_esi_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            error_backoff_secs: default_error_backoff(),
            idle_delay_ms: 0,
            webhook_url: None,
            webhook_username: default_webhook_username(),
            webhook_avatar_url: None,
        }
    }
}

impl KillbotConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }

    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: String,
    /// File name inside `directory`; the binary name is used when unset.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_true")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file: None,
            console: true,
        }
    }
}

fn default_token_env() -> String {
    "BOT_TOKEN".to_string()
}
fn default_guest_role() -> String {
    "Guest".to_string()
}
fn default_command_prefix() -> String {
    "!time".to_string()
}
fn default_queue_capacity() -> usize {
    64
}
fn default_max_concurrent_lookups() -> usize {
    4
}
fn default_job_timeout() -> u64 {
    60
}
fn default_feed_url() -> String {
    "https://redisq.zkillboard.com/listen.php?queueID=neweden-killbot".to_string()
}
fn default_esi_base_url() -> String {
    "https://esi.evetech.net".to_string()
}
fn default_user_agent() -> String {
    "Killbot (neweden) - https://github.com/neweden/neweden".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_error_backoff() -> u64 {
    5
}
fn default_webhook_username() -> String {
    "Killbot".to_string()
}
fn default_log_directory() -> String {
    "data".to_string()
}
fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Read the YAML file (if present) and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Environment values take precedence over the file.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty(&self.services.discord.token_env) {
            self.services.discord.token = Some(token);
        }

        let firebase = &mut self.services.firebase;
        if let Some(project_id) = non_empty("PROJECT_ID") {
            firebase.project_id = Some(project_id);
        }
        if let Some(url) = non_empty("DATABASE_URL") {
            firebase.database_url = Some(url);
        }
        if let Some(path) = non_empty("CREDENTIALS_FILE").or_else(|| non_empty("GOOGLE_APPLICATION_CREDENTIALS")) {
            firebase.credentials_file = Some(PathBuf::from(path));
        }

        if let Some(url) = non_empty("KILLBOT_WEBHOOK_URL") {
            self.killbot.webhook_url = Some(url);
        }
    }

    pub fn discord_token(&self) -> Result<&str> {
        match self.services.discord.token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => bail!(
                "Discord bot token missing: set `services.discord.token` or ${}",
                self.services.discord.token_env
            ),
        }
    }
}
