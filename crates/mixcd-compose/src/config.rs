use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";

/// Configuration for mixcd.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (MIXCD_* prefix)
/// 3. Config file (~/.config/mixcd/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bearer token for catalog requests.
    ///
    /// Can be set via:
    /// - CLI: --token ...
    /// - ENV: MIXCD_ACCESS_TOKEN
    /// - Config: access_token = "..."
    #[serde(default)]
    pub access_token: Option<String>,

    /// OAuth client id of the registered application.
    ///
    /// Can be set via:
    /// - ENV: MIXCD_CLIENT_ID
    /// - Config: client_id = "..."
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth redirect URI registered for the application.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    /// Base URL of the catalog Web API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the accounts service (authorize and token endpoints).
    #[serde(default = "default_accounts_base_url")]
    pub accounts_base_url: String,

    /// Market (ISO 3166-1 alpha-2) used for search and top-track requests.
    #[serde(default = "default_market")]
    pub market: String,

    /// Per-request timeout in seconds. A timed-out request counts as "no
    /// data" for every stage except the seed lookup.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Optional client-side cap on outbound requests per second.
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// Logger settings.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            client_id: None,
            redirect_uri: default_redirect_uri(),
            api_base_url: default_api_base_url(),
            accounts_base_url: default_accounts_base_url(),
            market: default_market(),
            request_timeout_secs: default_request_timeout_secs(),
            requests_per_second: None,
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment
    /// variables.
    ///
    /// Searches for config file at: ~/.config/mixcd/config.toml
    /// Reads environment variables with MIXCD_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file plus environment variables.
    ///
    /// A missing file is not an error; defaults and environment apply.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("mixcd");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, letting an explicit token override the
    /// configured one.
    ///
    /// This is used when the --token CLI flag is provided.
    pub fn load_with_token(token: Option<String>) -> Result<Self> {
        let mut config = Self::load()?;
        if token.is_some() {
            config.access_token = token;
        }
        Ok(config)
    }

    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_redirect_uri() -> String {
    "http://127.0.0.1:8888/callback".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_accounts_base_url() -> String {
    DEFAULT_ACCOUNTS_BASE_URL.to_string()
}

fn default_market() -> String {
    "US".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/mixcd/config.toml
/// - macOS: ~/Library/Application Support/mixcd/config.toml
/// - Windows: %APPDATA%\mixcd\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mixcd")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Mix CD Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (MIXCD_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# OAuth client id of your registered Spotify application
# Create one at: https://developer.spotify.com/dashboard
#
# Can also be set via:
# - Environment: MIXCD_CLIENT_ID=your-client-id
#client_id = "your-client-id"

# Redirect URI registered for the application
#redirect_uri = "http://127.0.0.1:8888/callback"

# Bearer token used for catalog requests
# Obtain one with 'mixcd auth url' followed by 'mixcd auth exchange'
#
# Can also be set via:
# - CLI: mixcd --token ... compose <seed>
# - Environment: MIXCD_ACCESS_TOKEN=...
#access_token = ""

# Market used for searches and top tracks
market = "US"

# Per-request timeout in seconds
request_timeout_secs = 30

# Optional client-side request rate cap
#requests_per_second = 5
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
