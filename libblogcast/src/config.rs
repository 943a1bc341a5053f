//! Configuration management for Blogcast
//!
//! Configuration is assembled once at process start from three layers:
//! built-in defaults, an optional TOML file, and the process environment.
//! Credentials are only ever read from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const DEFAULT_SITE_URL: &str = "https://www.afjltd.co.uk";
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub organization: OrganizationConfig,
    pub generation: GenerationConfig,
    pub facebook: FacebookConfig,
    pub linkedin: LinkedInConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

/// Identity of the organisation the posts are published for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub fallback_hashtags: Vec<String>,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: "AFJ Limited".to_string(),
            short_name: "AFJ".to_string(),
            description: "a Birmingham-based transport company".to_string(),
            fallback_hashtags: vec![
                "#AFJLimited".to_string(),
                "#Birmingham".to_string(),
                "#Transport".to_string(),
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// `LLM_API_KEY`; generation is skipped when absent
    #[serde(skip)]
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 512,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FacebookConfig {
    pub page_id: Option<String>,
    #[serde(skip)]
    pub access_token: Option<SecretString>,
    pub api_base: String,
    pub api_version: String,
}

impl Default for FacebookConfig {
    fn default() -> Self {
        Self {
            page_id: None,
            access_token: None,
            api_base: "https://graph.facebook.com".to_string(),
            api_version: "v19.0".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInConfig {
    pub org_id: Option<String>,
    #[serde(skip)]
    pub access_token: Option<SecretString>,
    pub api_base: String,
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            org_id: None,
            access_token: None,
            api_base: "https://api.linkedin.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from the default locations and the process environment
    pub fn load() -> Result<Self> {
        let mut config = match resolve_config_path()? {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::load_from_path(&path)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file, without environment overrides
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let mut config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.normalize();
        Ok(config)
    }

    /// Overlay values from an environment lookup
    ///
    /// Empty or whitespace-only values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(url) = get("SITE_URL") {
            self.site.base_url = url;
        }

        if let Some(key) = get("LLM_API_KEY") {
            self.generation.api_key = Some(SecretString::from(key));
        }
        if let Some(model) = get("LLM_MODEL") {
            self.generation.model = model;
        }
        if let Some(url) = get("BLOGCAST_LLM_BASE_URL") {
            self.generation.base_url = url;
        }

        if let Some(page_id) = get("FACEBOOK_PAGE_ID") {
            self.facebook.page_id = Some(page_id);
        }
        if let Some(token) = get("FACEBOOK_ACCESS_TOKEN") {
            self.facebook.access_token = Some(SecretString::from(token));
        }
        if let Some(url) = get("BLOGCAST_FACEBOOK_API_BASE") {
            self.facebook.api_base = url;
        }

        if let Some(org_id) = get("LINKEDIN_ORG_ID") {
            self.linkedin.org_id = Some(org_id);
        }
        if let Some(token) = get("LINKEDIN_ACCESS_TOKEN") {
            self.linkedin.access_token = Some(SecretString::from(token));
        }
        if let Some(url) = get("BLOGCAST_LINKEDIN_API_BASE") {
            self.linkedin.api_base = url;
        }

        self.normalize();
    }

    /// Check that URLs and timeouts are usable
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("site.base_url", &self.site.base_url),
            ("generation.base_url", &self.generation.base_url),
            ("facebook.api_base", &self.facebook.api_base),
            ("linkedin.api_base", &self.linkedin.api_base),
        ];

        for (field, url) in urls {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{} must start with http:// or https:// (got '{}')",
                    field, url
                ))
                .into());
            }
        }

        if self.http.timeout_secs == 0 {
            return Err(
                ConfigError::Invalid("http.timeout_secs must be greater than zero".to_string())
                    .into(),
            );
        }

        Ok(())
    }

    fn normalize(&mut self) {
        for url in [
            &mut self.site.base_url,
            &mut self.generation.base_url,
            &mut self.facebook.api_base,
            &mut self.linkedin.api_base,
        ] {
            let trimmed = url.trim().trim_end_matches('/').to_string();
            *url = trimmed;
        }

        for id in [&mut self.facebook.page_id, &mut self.linkedin.org_id] {
            if id.as_deref().is_some_and(|value| value.trim().is_empty()) {
                *id = None;
            }
        }
    }
}

/// Resolve the configuration file path
///
/// `BLOGCAST_CONFIG` wins and must point at an existing file. Otherwise the
/// default location is used only if a file exists there.
pub fn resolve_config_path() -> Result<Option<PathBuf>> {
    if let Ok(path) = std::env::var("BLOGCAST_CONFIG") {
        let path = PathBuf::from(shellexpand::tilde(&path).to_string());
        if !path.exists() {
            return Err(ConfigError::Invalid(format!(
                "BLOGCAST_CONFIG points to a missing file: {}",
                path.display()
            ))
            .into());
        }
        return Ok(Some(path));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join("blogcast").join("config.toml"))
        .filter(|path| path.exists()))
}
