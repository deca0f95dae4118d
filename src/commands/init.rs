//! Initialize a new site

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;

use super::new::{create_record, NewRecord, RecordKind};
use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: locluong
subtitle: ''
author: ''
language: en

# Server
ip: 0.0.0.0
port: 5000
read_timeout_secs: 10
write_timeout_secs: 10
cache_max_age: 86400

# Directory
posts_dir: public/posts
events_dir: public/events
css_dir: css
html_dir: html

# Rendering
highlight:
  theme: base16-ocean.dark
  line_number: false
date_format: MMMM DD, YYYY
"#;

const DEFAULT_CSS: &str = r#"body {
  max-width: 42rem;
  margin: 0 auto;
  padding: 1rem;
  font-family: Georgia, serif;
  line-height: 1.6;
}

.site-header nav a {
  margin-right: 1rem;
}

.highlight pre {
  padding: 0.75rem;
  overflow-x: auto;
}
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    let mut config: SiteConfig = serde_yaml::from_str(DEFAULT_CONFIG)?;
    config.resolve_dirs(target_dir);

    fs::create_dir_all(&config.posts_dir)?;
    fs::create_dir_all(&config.events_dir)?;
    fs::create_dir_all(&config.css_dir)?;
    fs::create_dir_all(&config.html_dir)?;

    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(config.css_dir.join("style.css"), DEFAULT_CSS)?;

    let today = Local::now().date_naive();
    create_record(
        &config,
        &NewRecord {
            kind: RecordKind::Post,
            title: "Hello World",
            date: today,
            secondary: "",
            tags: &["hello".to_string()],
        },
    )?;

    Ok(())
}
