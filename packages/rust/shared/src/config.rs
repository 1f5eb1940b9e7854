//! Application configuration for BadgeForge.
//!
//! User config lives at `~/.badgeforge/badgeforge.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BadgeForgeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "badgeforge.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".badgeforge";

// ---------------------------------------------------------------------------
// Config structs (matching badgeforge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Pinata pinning service settings.
    #[serde(default)]
    pub pinata: PinataConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default input mapping path.
    #[serde(default = "default_input_path")]
    pub input_path: String,

    /// Default output directory for generated documents.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Default maximum description length in characters.
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_dir: default_output_dir(),
            max_description_length: default_max_description_length(),
        }
    }
}

fn default_input_path() -> String {
    "files.json".into()
}
fn default_output_dir() -> String {
    "metadata".into()
}
fn default_max_description_length() -> usize {
    280
}

/// `[pinata]` section.
///
/// Credentials are referenced by environment variable name only; the key
/// material itself never lands in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinataConfig {
    /// Name of the env var holding the Pinata API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Name of the env var holding the Pinata API secret.
    #[serde(default = "default_api_secret_env")]
    pub api_secret_env: String,

    /// Pinning API base URL.
    #[serde(default = "default_pinata_base_url")]
    pub base_url: String,

    /// Public gateway used to render preview URLs.
    #[serde(default = "default_gateway")]
    pub gateway: String,
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            api_secret_env: default_api_secret_env(),
            base_url: default_pinata_base_url(),
            gateway: default_gateway(),
        }
    }
}

fn default_api_key_env() -> String {
    "PINATA_API_KEY".into()
}
fn default_api_secret_env() -> String {
    "PINATA_API_SECRET".into()
}
fn default_pinata_base_url() -> String {
    "https://api.pinata.cloud".into()
}
fn default_gateway() -> String {
    "https://gateway.pinata.cloud".into()
}

// ---------------------------------------------------------------------------
// Generate config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime pipeline configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Path to the input mapping (`files.json`).
    pub input_path: PathBuf,
    /// Directory receiving `<key>.metadata.json` documents and `index.json`.
    pub output_dir: PathBuf,
    /// Maximum description length in characters.
    pub max_description_length: usize,
}

impl From<&AppConfig> for GenerateConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            input_path: PathBuf::from(&config.defaults.input_path),
            output_dir: PathBuf::from(&config.defaults.output_dir),
            max_description_length: config.defaults.max_description_length,
        }
    }
}

impl GenerateConfig {
    /// Reject configurations the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.max_description_length == 0 {
            return Err(BadgeForgeError::config(
                "max_description_length must be a positive integer",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.badgeforge/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| BadgeForgeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.badgeforge/badgeforge.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| BadgeForgeError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        BadgeForgeError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| BadgeForgeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| BadgeForgeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| BadgeForgeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that both Pinata credential env vars are set and non-empty.
/// Returns the resolved `(api_key, api_secret)` pair.
pub fn validate_pinata_credentials(config: &AppConfig) -> Result<(String, String)> {
    let key = read_env_var(&config.pinata.api_key_env)?;
    let secret = read_env_var(&config.pinata.api_secret_env)?;
    Ok((key, secret))
}

fn read_env_var(var_name: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(BadgeForgeError::config(format!(
            "Pinata credential not found. Set the {var_name} environment variable.\n\
             Get keys at https://app.pinata.cloud/developers/api-keys"
        ))),
    }
}
