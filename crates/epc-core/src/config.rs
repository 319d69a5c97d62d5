//! Configuration for the EPC registry client.
//!
//! Settings come from a TOML file, then environment overrides:
//!
//! ```toml
//! [registry]
//! base_url = "https://epc.opendatacommunities.org/api/v1/domestic"
//! email = "you@example.com"
//! api_key = "..."
//!
//! [analysis]
//! averaging = "skip-missing"
//! ```
//!
//! The file lives at `<config dir>/epc-scan/config.toml` unless an explicit
//! path is given. A missing file yields the defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{EpcError, Result};

/// Project directory name under the platform config directory.
pub const PROJECT_NAME: &str = "epc-scan";

/// Default registry endpoint for domestic certificates.
pub const DEFAULT_BASE_URL: &str = "https://epc.opendatacommunities.org/api/v1/domestic";

/// Environment variable overriding `registry.base_url`.
pub const ENV_BASE_URL: &str = "EPC_BASE_URL";
/// Environment variable overriding `registry.email`.
pub const ENV_EMAIL: &str = "EPC_EMAIL";
/// Environment variable overriding `registry.api_key`.
pub const ENV_API_KEY: &str = "EPC_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpcConfig {
    /// Registry endpoint and credentials
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Registry endpoint and credentials.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL; `/search` is appended for searches
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Registered account e-mail, used as the Basic auth identifier
    #[serde(default)]
    pub email: String,

    /// Account API key, used as the Basic auth secret
    #[serde(default)]
    pub api_key: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            email: String::new(),
            api_key: String::new(),
        }
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

impl RegistryConfig {
    /// Credentials for the registry, or a config error naming what is missing.
    pub fn credentials(&self) -> Result<Credentials> {
        let mut missing = Vec::new();
        if self.email.trim().is_empty() {
            missing.push("registry.email");
        }
        if self.api_key.trim().is_empty() {
            missing.push("registry.api_key");
        }
        if !missing.is_empty() {
            return Err(EpcError::config(format!(
                "missing {} (set in the config file or via {ENV_EMAIL}/{ENV_API_KEY})",
                missing.join(" and ")
            )));
        }
        Ok(Credentials::new(self.email.trim(), self.api_key.trim()))
    }
}

/// Analysis settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How rows without a numeric efficiency score are averaged
    #[serde(default)]
    pub averaging: AveragingPolicy,
}

/// How rows without a numeric efficiency score affect the postcode average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AveragingPolicy {
    /// Count them as 0 and keep them in the denominator.
    ZeroFill,
    /// Leave them out of both the sum and the denominator.
    #[default]
    SkipMissing,
}

impl fmt::Display for AveragingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AveragingPolicy::ZeroFill => write!(f, "zero-fill"),
            AveragingPolicy::SkipMissing => write!(f, "skip-missing"),
        }
    }
}

impl FromStr for AveragingPolicy {
    type Err = EpcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "zero-fill" => Ok(AveragingPolicy::ZeroFill),
            "skip-missing" => Ok(AveragingPolicy::SkipMissing),
            other => Err(EpcError::config(format!(
                "unknown averaging policy '{other}' (expected zero-fill or skip-missing)"
            ))),
        }
    }
}

/// Basic auth identifier and secret for the registry.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    secret_key: String,
}

impl Credentials {
    /// Creates credentials from an identifier and secret key.
    pub fn new(identifier: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret_key: secret_key.into(),
        }
    }

    /// The identifier (account e-mail).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Value for the `Authorization` header: `Basic base64(identifier:secret)`.
    pub fn authorization_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.identifier, self.secret_key));
        format!("Basic {token}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret_key", &redact(&self.secret_key))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

impl EpcConfig {
    /// Default config file location, if the platform has a config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path if given, else the default location.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Loads the config file (defaults if absent) and applies environment overrides.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads and parses a config file without environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EpcError::io_with_path(e, path))?;
        let config: EpcConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Applies overrides from an environment lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(base_url) = get(ENV_BASE_URL) {
            self.registry.base_url = base_url;
        }
        if let Some(email) = get(ENV_EMAIL) {
            self.registry.email = email;
        }
        if let Some(api_key) = get(ENV_API_KEY) {
            self.registry.api_key = api_key;
        }
    }

    /// Serializes the config as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EpcError::config(e.to_string()))
    }
}
