//! Page templates using the Tera template engine
//!
//! A default set of templates is embedded in the binary. Any `*.html` file
//! found under the configured template directory replaces the built-in
//! template of the same name, so a site can override one page at a time.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::{ContentRecord, SecondaryField};
use crate::helpers;

pub const HOME: &str = "home.html";
pub const BLOGS: &str = "blogs.html";
pub const RANDOMS: &str = "randoms.html";
pub const RECORD: &str = "record.html";
pub const ERROR: &str = "error.html";

/// Template renderer with built-in defaults and optional overrides
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

impl TemplateRenderer {
    /// Create a renderer with the built-in templates only
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("default/layout.html")),
            (HOME, include_str!("default/home.html")),
            (BLOGS, include_str!("default/blogs.html")),
            (RANDOMS, include_str!("default/randoms.html")),
            (RECORD, include_str!("default/record.html")),
            (ERROR, include_str!("default/error.html")),
        ])?;

        let default_format = config.date_format.clone();
        tera.register_filter(
            "date_format",
            move |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                date_format_filter(value, args, &default_format)
            },
        );
        tera.register_filter("time_tag", time_tag_filter);
        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("record_url", record_url_filter);

        Ok(Self {
            tera,
            site: SiteData::from(config),
        })
    }

    /// Create a renderer, overriding built-ins with templates from `dir`
    pub fn load(config: &SiteConfig, dir: &Path) -> Result<Self> {
        let mut renderer = Self::new(config)?;

        if !dir.is_dir() {
            tracing::debug!("No template directory at {:?}, using built-in templates", dir);
            return Ok(renderer);
        }

        let overrides = find_templates(dir)?;
        for (_, name) in &overrides {
            tracing::info!("Using template override {}", name);
        }

        renderer
            .tera
            .add_template_files(
                overrides
                    .iter()
                    .map(|(path, name)| (path.as_path(), Some(name.as_str())))
                    .collect::<Vec<_>>(),
            )
            .with_context(|| format!("could not load templates from {:?}", dir))?;

        Ok(renderer)
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render a listing page
    pub fn render_list<F: SecondaryField>(
        &self,
        template_name: &str,
        records: &[ContentRecord<F>],
    ) -> Result<String> {
        let mut context = self.base_context();
        context.insert("kind", F::KIND);
        context.insert("records", records);
        self.render(template_name, &context)
    }

    /// Render a single record page
    pub fn render_record<F: SecondaryField>(&self, record: &ContentRecord<F>) -> Result<String> {
        let mut context = self.base_context();
        context.insert("kind", F::KIND);
        context.insert("record", record);
        self.render(RECORD, &context)
    }

    /// Render the error page
    pub fn render_error(&self, heading: &str, message: &str) -> Result<String> {
        let mut context = self.base_context();
        context.insert("heading", heading);
        context.insert("message", message);
        self.render(ERROR, &context)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context
    }
}

/// Collect `*.html` files under `dir` with their template names
fn find_templates(dir: &Path) -> Result<Vec<(PathBuf, String)>> {
    let mut templates = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        let is_html = path.extension().map(|e| e == "html").unwrap_or(false);
        if !entry.file_type().is_file() || !is_html {
            continue;
        }

        let name = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        templates.push((path.to_path_buf(), name));
    }

    Ok(templates)
}

/// Tera filter: format a `YYYY-MM-DD` date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
    default_format: &str,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => default_format.to_string(),
    };

    match crate::content::parser::parse_date(&s) {
        Ok(date) => Ok(tera::Value::String(helpers::format_date(&date, &format))),
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Tera filter: wrap a `YYYY-MM-DD` date string in a <time> element
fn time_tag_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("time_tag", "value", String, value);
    let format = match args.get("format") {
        Some(val) => Some(tera::try_get_value!("time_tag", "format", String, val)),
        None => None,
    };

    let date = crate::content::parser::parse_date(&s)
        .map_err(|e| tera::Error::msg(format!("time_tag: {}", e)))?;
    Ok(tera::Value::String(helpers::time_tag(
        &date,
        format.as_deref(),
    )))
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => " ...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Tera filter: page URL of a slug, e.g. `slug | record_url(kind="post")`
fn record_url_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let slug = tera::try_get_value!("record_url", "value", String, value);
    let kind = match args.get("kind") {
        Some(val) => tera::try_get_value!("record_url", "kind", String, val),
        None => return Err(tera::Error::msg("record_url: missing `kind` argument")),
    };

    helpers::record_url(&kind, &slug)
        .map(tera::Value::String)
        .ok_or_else(|| tera::Error::msg(format!("record_url: unknown kind {:?}", kind)))
}

/// Site-wide values available to every template as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub language: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
        }
    }
}
