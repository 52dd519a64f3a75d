use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML file overriding the endpoint defaults, e.g.:
///
/// ```toml
/// [api]
/// base_url = "https://admin.studio.example"
///
/// [lookup]
/// base_url = "https://viacep.com.br"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: EndpointConfig,
    #[serde(default)]
    pub lookup: EndpointConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub base_url: Option<String>,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
