//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the listening port
pub const PORT_ENV: &str = "PORT";

/// Main site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub language: String,

    // Server
    pub ip: String,
    pub port: u16,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
    pub cache_max_age: u64,

    // Directory
    pub posts_dir: PathBuf,
    pub events_dir: PathBuf,
    pub css_dir: PathBuf,
    pub html_dir: PathBuf,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,
    pub date_format: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "locluong".to_string(),
            subtitle: String::new(),
            author: String::new(),
            language: "en".to_string(),

            ip: "0.0.0.0".to_string(),
            port: 5000,
            read_timeout_secs: 10,
            write_timeout_secs: 10,
            cache_max_age: 86400,

            posts_dir: PathBuf::from("public/posts"),
            events_dir: PathBuf::from("public/events"),
            css_dir: PathBuf::from("css"),
            html_dir: PathBuf::from("html"),

            highlight: HighlightConfig::default(),
            date_format: "MMMM DD, YYYY".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {:?}", path))?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_port(std::env::var(PORT_ENV).ok().as_deref())
    }

    fn apply_port(&mut self, port: Option<&str>) -> Result<()> {
        if let Some(port) = port {
            self.port = port
                .parse()
                .with_context(|| format!("{} is not a valid port: {:?}", PORT_ENV, port))?;
            tracing::debug!("Port overridden from environment: {}", self.port);
        }
        Ok(())
    }

    /// Make every relative directory relative to `base_dir`
    pub fn resolve_dirs(&mut self, base_dir: &Path) {
        for dir in [
            &mut self.posts_dir,
            &mut self.events_dir,
            &mut self.css_dir,
            &mut self.html_dir,
        ] {
            if dir.is_relative() {
                *dir = base_dir.join(&*dir);
            }
        }
    }

    /// Address the server listens on
    pub fn tcp_address(&self) -> String {
        let ip = if self.ip == "localhost" {
            "127.0.0.1"
        } else {
            &self.ip
        };
        format!("{}:{}", ip, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
