//! Create a new post or event file

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::SiteConfig;
use crate::content::{slugify, ExternalLink, ImagePath, SecondaryField};

/// Which collection a new file goes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Post,
    Event,
}

impl FromStr for RecordKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "post" => Ok(Self::Post),
            "event" => Ok(Self::Event),
            other => anyhow::bail!("Unknown kind: {}. Available: post, event", other),
        }
    }
}

impl RecordKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Post => ImagePath::KIND,
            Self::Event => ExternalLink::KIND,
        }
    }
}

/// Header values for a new record
#[derive(Debug, Clone)]
pub struct NewRecord<'a> {
    pub kind: RecordKind,
    pub title: &'a str,
    pub date: NaiveDate,
    /// Image path for posts, link for events
    pub secondary: &'a str,
    pub tags: &'a [String],
}

/// Render the file contents of a new record
pub fn render(record: &NewRecord<'_>) -> String {
    format!(
        "{}\n{}\n{}\n{}\n\nWrite here.\n",
        record.title,
        record.date.format(crate::content::parser::DATE_FORMAT),
        record.secondary,
        record.tags.join(",")
    )
}

/// Reject header values that would not read back as written
fn validate(record: &NewRecord<'_>) -> Result<()> {
    let breaks_line = |s: &str| s.contains(['\n', '\r']);

    if breaks_line(record.title) || breaks_line(record.secondary) {
        anyhow::bail!("Header values must be a single line");
    }
    if let Some(tag) = record.tags.iter().find(|t| breaks_line(t.as_str()) || t.contains(',')) {
        anyhow::bail!("Invalid tag {:?}: tags cannot contain commas or line breaks", tag);
    }
    Ok(())
}

/// Write a new record file and return its path
pub fn create_record(config: &SiteConfig, record: &NewRecord<'_>) -> Result<PathBuf> {
    validate(record)?;

    let target_dir = match record.kind {
        RecordKind::Post => &config.posts_dir,
        RecordKind::Event => &config.events_dir,
    };
    fs::create_dir_all(target_dir)?;

    let file_name = format!(
        "{}-{}.md",
        record.date.format("%Y-%m-%d"),
        slugify(record.title).replace(['/', '\\'], "-")
    );
    let file_path = target_dir.join(file_name);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, render(record))?;
    tracing::info!("Created {} {:?}", record.kind.name(), file_path);

    Ok(file_path)
}
