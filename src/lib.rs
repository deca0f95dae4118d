//! locluong: a small file-backed personal site
//!
//! Blog posts and event notes are plain text files with a fixed header and a
//! markdown body. They are loaded once into immutable in-memory stores and
//! served over HTTP with Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::{Context, Result};
use std::path::Path;

use content::{
    ContentSource, ContentStore, Event, EventSource, ExternalLink, ImagePath, MarkdownRenderer,
    Post, PostSource,
};

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The loaded site: configuration plus the post and event stores
pub struct Site {
    /// Site configuration, directories already resolved
    pub config: config::SiteConfig,
    /// Blog posts, newest first
    pub posts: ContentStore<ImagePath>,
    /// Event notes, newest first
    pub events: ContentStore<ExternalLink>,
}

impl Site {
    /// Read the configuration for a site rooted at `base_dir`
    ///
    /// Uses `_config.yml` when present, then applies environment overrides
    /// and resolves relative directories against `base_dir`.
    pub fn load_config<P: AsRef<Path>>(base_dir: P) -> Result<config::SiteConfig> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        config.apply_env()?;
        config.resolve_dirs(base_dir);

        Ok(config)
    }

    /// Open the site rooted at `base_dir`
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        Self::build(Self::load_config(base_dir)?)
    }

    /// Load both content stores
    ///
    /// Any unreadable or malformed file fails the whole build.
    pub fn build(config: config::SiteConfig) -> Result<Self> {
        let renderer =
            MarkdownRenderer::with_options(&config.highlight.theme, config.highlight.line_number);

        let events = ContentStore::load(&config.events_dir, &renderer)
            .context("failed to create the event store")?;
        let posts = ContentStore::load(&config.posts_dir, &renderer)
            .context("failed to create the post store")?;

        tracing::info!(
            "Site ready: {} posts, {} events",
            posts.len(),
            events.len()
        );

        Ok(Self {
            config,
            posts,
            events,
        })
    }

    pub fn post_source(&self) -> &dyn PostSource {
        &self.posts
    }

    pub fn event_source(&self) -> &dyn EventSource {
        &self.events
    }

    /// Posts, newest first
    pub fn all_posts(&self) -> &[Post] {
        self.posts.get_all()
    }

    /// Events, newest first
    pub fn all_events(&self) -> &[Event] {
        self.events.get_all()
    }
}
