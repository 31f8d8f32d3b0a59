pub mod local;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::snapshot::DEFAULT_FILENAME;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::catalog::DEFAULT_OWNER;
#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation::Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_API_ROOT: &str = "https://api.github.com";
pub const DEFAULT_OUTPUT_PATH: &str = "./api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "spark-network")]
#[command(about = "Scan the spark repositories and write the network snapshot")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_ROOT)]
    pub api_root: String,

    #[arg(long, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// API token; unauthenticated requests get a lower rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    #[serde(skip)]
    pub token: Option<String>,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_FILENAME)]
    pub filename: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// TOML configuration file; replaces the flags above when given
    #[arg(short, long)]
    pub config: Option<String>,

    /// Skip the courtesy delay between probes
    #[arg(long)]
    pub no_pacing: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_root(&self) -> &str {
        &self.api_root
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn filename(&self) -> &str {
        &self.filename
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("api_root", &self.api_root)?;
        validate_non_empty_string("owner", &self.owner)?;
        validate_path("output_path", &self.output_path)?;
        validate_file_name("filename", &self.filename, "json")?;
        validate_range("timeout_secs", self.timeout_secs, 1, 120)?;
        Ok(())
    }
}
