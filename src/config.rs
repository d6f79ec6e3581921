use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::draft::ClarityVersion;
use crate::error::{AppError, AppResult};

/// Directory name under the platform config dir (`~/.config` on Linux)
pub const APP_DIR_NAME: &str = "clarity-deployer";

/// Wallet bridge configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConnectorConfig {
    /// JSON-RPC endpoint of the wallet bridge
    pub url: String,
    /// TCP connect timeout. Requests themselves are never timed out locally:
    /// the wallet decides how long a confirmation may take.
    pub connect_timeout_secs: u64,
    /// Where the connected session is persisted (defaults to the app config dir)
    pub session_file: Option<PathBuf>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5757/rpc".to_string(),
            connect_timeout_secs: 10,
            session_file: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Log file for the TUI (the terminal itself is owned by the UI)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "clarity_deployer=debug,deployer_cli=debug".to_string(),
            file: None,
        }
    }
}

/// Terminal UI settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    pub tick_ms: u64,
    /// How long the "Copied!" badge stays visible
    pub copied_badge_ms: u64,
    /// Tab selected on start-up
    pub default_version: ClarityVersion,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            copied_badge_ms: 2000,
            default_version: ClarityVersion::V2,
        }
    }
}

impl UiConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Number of ticks the copy badge should survive.
    pub fn copied_badge_ticks(&self) -> u32 {
        let ticks = self.copied_badge_ms / self.tick_ms.max(1);
        u32::try_from(ticks.max(1)).unwrap_or(u32::MAX)
    }
}

/// Root application configuration
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub connector: ConnectorConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default config file
            .add_source(File::with_name("config/default").required(false))
            // Override with local config if present
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (prefix: CLARITY_DEPLOYER_)
            // e.g., CLARITY_DEPLOYER_CONNECTOR__URL, CLARITY_DEPLOYER_UI__TICK_MS
            .add_source(
                Environment::with_prefix("CLARITY_DEPLOYER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Session file, falling back to `<config dir>/clarity-deployer/session.json`
    pub fn session_path(&self) -> AppResult<PathBuf> {
        match &self.connector.session_file {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dir()?.join("session.json")),
        }
    }

    /// Log file, falling back to `<config dir>/clarity-deployer/deployer.log`
    pub fn log_path(&self) -> AppResult<PathBuf> {
        match &self.logging.file {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dir()?.join("deployer.log")),
        }
    }
}

/// Platform config directory for this application
pub fn app_dir() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(AppError::NoConfigDir)
}

/// Helper to get bridge URLs with proper trailing slash handling
impl ConnectorConfig {
    pub fn endpoint(&self) -> String {
        self.url.trim_end_matches('/').to_string()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
