use crate::config::{DEFAULT_API_ROOT, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS};
use crate::core::snapshot::DEFAULT_FILENAME;
use crate::core::ConfigProvider;
use crate::domain::catalog::DEFAULT_OWNER;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub pacing: PacingConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub api_root: String,
    pub owner: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub enabled: bool,
    pub short_delay_ms: u64,
    pub long_delay_ms: u64,
    pub long_every: usize,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            short_delay_ms: 300,
            long_delay_ms: 2000,
            long_every: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub filename: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistryError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn pacing_enabled(&self) -> bool {
        self.pacing.enabled
    }

    /// Uses `token` when the file does not supply a usable one.
    pub fn with_fallback_token(mut self, token: Option<String>) -> Self {
        if self.token().is_none() {
            self.source.token = token.filter(|t| !t.is_empty());
        }
        self
    }
}

impl ConfigProvider for TomlConfig {
    fn api_root(&self) -> &str {
        &self.source.api_root
    }

    fn owner(&self) -> &str {
        &self.source.owner
    }

    // An unresolved `${VAR}` placeholder counts as no token.
    fn token(&self) -> Option<&str> {
        self.source
            .token
            .as_deref()
            .filter(|t| !t.is_empty() && !t.starts_with("${"))
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn filename(&self) -> &str {
        &self.load.filename
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    fn short_delay(&self) -> Duration {
        Duration::from_millis(self.pacing.short_delay_ms)
    }

    fn long_delay(&self) -> Duration {
        Duration::from_millis(self.pacing.long_delay_ms)
    }

    fn long_every(&self) -> usize {
        self.pacing.long_every
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("source.api_root", &self.source.api_root)?;
        validate_non_empty_string("source.owner", &self.source.owner)?;
        validate_range("source.timeout_seconds", self.source.timeout_seconds, 1, 120)?;
        validate_positive_number("pacing.long_every", self.pacing.long_every, 1)?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_file_name("load.filename", &self.load.filename, "json")?;
        Ok(())
    }
}
