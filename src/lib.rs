//! quillpress: a server-rendered blog front end for a headless CMS
//!
//! The crate fetches articles from a Strapi-style content API, maps the
//! nested wire shape into a flat display model, and renders listing,
//! category, tag, author, and single-post pages with search, filtering,
//! pagination, and styled rich-text bodies.

pub mod cms;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod view;

use anyhow::Result;
use std::path::Path;

/// The blog application: configuration plus the CMS client built from it
pub struct Quillpress {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Content API client
    pub cms: cms::CmsClient,
}

impl Quillpress {
    /// Create an application from a config file (defaults when absent)
    pub fn new<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config = config::SiteConfig::load_or_default(config_path)?;
        let cms = cms::CmsClient::new(config.cms.clone());
        Ok(Self { config, cms })
    }

    /// Start the HTTP server
    pub async fn serve(self, ip: &str, port: u16) -> Result<()> {
        server::start(self.config, ip, port).await
    }
}
