//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // Content backend
    pub cms: CmsConfig,

    // Highlighting
    pub highlight_theme: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Quillpress".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            cms: CmsConfig::default(),

            highlight_theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Content API connection settings
///
/// Held as an explicit struct and passed into `CmsClient::new` rather than
/// read from the process environment at call time; `apply_env` is the single
/// place where environment overrides happen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the content API, e.g. "https://cms.example.com/api"
    pub base_url: String,
    /// Bearer token; unset means unauthenticated requests (public content only)
    pub auth_token: Option<String>,
    /// Freshness window for cached API responses; 0 disables the cache
    pub cache_ttl_seconds: u64,
    /// Request timeout
    pub timeout_seconds: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1337/api".to_string(),
            auth_token: None,
            cache_ttl_seconds: 60,
            timeout_seconds: 10,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file, then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Load from a file if it exists, falling back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Self::default();
            config.apply_env();
            Ok(config)
        }
    }

    /// Override CMS settings from the environment
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("QUILLPRESS_CMS_URL") {
            if !url.trim().is_empty() {
                self.cms.base_url = url.trim().to_string();
            }
        }
        if let Ok(token) = env::var("QUILLPRESS_CMS_TOKEN") {
            if !token.trim().is_empty() {
                self.cms.auth_token = Some(token.trim().to_string());
            }
        }
    }
}
