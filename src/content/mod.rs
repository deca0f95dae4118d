//! Content module - record parsing, loading and lookup

pub mod error;
pub mod loader;
mod markdown;
pub mod parser;
mod record;
mod store;

pub use error::{LoadError, LoadErrorKind, NotFound, ParseError};
pub use markdown::MarkdownRenderer;
pub use record::{slugify, ContentRecord, Event, ExternalLink, ImagePath, Post, SecondaryField};
pub use store::{ContentSource, ContentStore, EventSource, PostSource};
