pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;
use toml_config::FileConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "studio-enroll")]
#[command(about = "Interactive student enrollment wizard for the studio back office")]
pub struct CliConfig {
    /// Base URL of the studio admin API
    #[arg(long, default_value = "http://localhost:8080")]
    pub api_base_url: String,

    /// Base URL of the postal-code lookup service
    #[arg(long, default_value = "https://viacep.com.br")]
    pub lookup_base_url: String,

    /// Optional TOML file overriding the endpoints
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Applies the `--config` file, if any. File values win over flag
    /// defaults and flag values alike.
    pub fn resolve(mut self) -> Result<Self> {
        if let Some(path) = self.config.as_deref() {
            tracing::debug!("loading config file {}", path.display());
            let file = FileConfig::from_path(path)?;
            if let Some(url) = file.api.base_url {
                self.api_base_url = url;
            }
            if let Some(url) = file.lookup.base_url {
                self.lookup_base_url = url;
            }
        }
        Ok(self)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_url("lookup_base_url", &self.lookup_base_url)?;
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn lookup_base_url(&self) -> &str {
        &self.lookup_base_url
    }
}
