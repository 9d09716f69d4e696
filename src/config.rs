use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    #[serde(default = "default_index_host")]
    pub host: String,
    /// API key for the index. Falls back to the `MEILI_API_KEY`
    /// environment variable when not set here.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_index_uid")]
    pub default_index: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: default_index_host(),
            api_key: None,
            default_index: default_index_uid(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_index_host() -> String {
    "http://localhost:7700".to_string()
}
fn default_index_uid() -> String {
    "ebooks".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl IndexConfig {
    /// Resolved API key: config value first, then `MEILI_API_KEY` env.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("MEILI_API_KEY").ok())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,
    #[serde(default = "default_thumbnails_dir")]
    pub thumbnails_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            thumbnails_dir: default_thumbnails_dir(),
        }
    }
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("./pdf_data")
}
fn default_thumbnails_dir() -> PathBuf {
    PathBuf::from("./thumbnail_data")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_api_bind")]
    pub api_bind: String,
    #[serde(default = "default_documents_bind")]
    pub documents_bind: String,
    #[serde(default = "default_thumbnails_bind")]
    pub thumbnails_bind: String,
    #[serde(default = "default_frontend_bind")]
    pub frontend_bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_bind: default_api_bind(),
            documents_bind: default_documents_bind(),
            thumbnails_bind: default_thumbnails_bind(),
            frontend_bind: default_frontend_bind(),
        }
    }
}

fn default_api_bind() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_documents_bind() -> String {
    "127.0.0.1:3001".to_string()
}
fn default_thumbnails_bind() -> String {
    "127.0.0.1:3002".to_string()
}
fn default_frontend_bind() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct FrontendConfig {
    /// Base URL of the search gateway the `/api/search` proxy forwards to.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.index.host.is_empty() {
        anyhow::bail!("index.host must not be empty");
    }

    if config.index.default_index.is_empty() {
        anyhow::bail!("index.default_index must not be empty");
    }

    if config.index.timeout_secs == 0 {
        anyhow::bail!("index.timeout_secs must be > 0");
    }

    for (name, bind) in [
        ("server.api_bind", &config.server.api_bind),
        ("server.documents_bind", &config.server.documents_bind),
        ("server.thumbnails_bind", &config.server.thumbnails_bind),
        ("server.frontend_bind", &config.server.frontend_bind),
    ] {
        if bind.is_empty() {
            anyhow::bail!("{} must not be empty", name);
        }
    }

    Ok(config)
}
