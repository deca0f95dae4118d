//! Post and Event records

use chrono::NaiveDate;
use serde::Serialize;

/// The third header line of a record file
///
/// Posts and events share one file layout and differ only in what this line
/// means, so a record is generic over it.
pub trait SecondaryField: Clone + Send + Sync + Serialize + 'static {
    /// Singular name of the record kind, used in logs and errors
    const KIND: &'static str;

    /// Build the field from the raw line (kept verbatim)
    fn from_line(line: String) -> Self;

    /// The raw line
    fn as_str(&self) -> &str;
}

/// Cover image path of a blog post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImagePath(pub String);

impl SecondaryField for ImagePath {
    const KIND: &'static str = "post";

    fn from_line(line: String) -> Self {
        Self(line)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

/// External link attached to an event note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExternalLink(pub String);

impl SecondaryField for ExternalLink {
    const KIND: &'static str = "event";

    fn from_line(line: String) -> Self {
        Self(line)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A parsed content file
#[derive(Debug, Clone, Serialize)]
pub struct ContentRecord<F> {
    /// Title, verbatim from the first line
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Image path (posts) or link (events)
    pub secondary: F,

    /// Tags, split on commas without trimming
    pub tags: Vec<String>,

    /// Sanitized HTML body
    pub content: String,

    /// URL identifier derived from the title; not unique
    pub slug: String,
}

/// A blog post
pub type Post = ContentRecord<ImagePath>;

/// A short event note
pub type Event = ContentRecord<ExternalLink>;

impl Post {
    pub fn picture(&self) -> &str {
        self.secondary.as_str()
    }
}

impl Event {
    pub fn link(&self) -> &str {
        self.secondary.as_str()
    }
}

/// Derive a slug by replacing every space with a hyphen
pub fn slugify(title: &str) -> String {
    title.replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_replaces_spaces_only() {
        assert_eq!(slugify("Foo Bar"), "Foo-Bar");
        assert_eq!(slugify(" padded  title "), "-padded--title-");
        assert_eq!(slugify("Tab\tand?mark"), "Tab\tand?mark");
    }

    #[test]
    fn test_event_link_is_secondary_field() {
        let event = Event {
            title: "Meetup".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            secondary: ExternalLink::from_line("https://example.com".to_string()),
            tags: vec![String::new()],
            content: String::new(),
            slug: "Meetup".to_string(),
        };
        assert_eq!(event.link(), "https://example.com");
    }
}
