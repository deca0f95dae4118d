//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::content::{ExternalLink, ImagePath, SecondaryField};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'\'')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Encode a slug so it survives as one URL path segment
///
/// # Examples
/// ```ignore
/// encode_segment("Why?-Because") // -> "Why%3F-Because"
/// ```
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// URL of a post page
pub fn post_url(slug: &str) -> String {
    format!("/blog/{}", encode_segment(slug))
}

/// URL of an event page
pub fn event_url(slug: &str) -> String {
    format!("/random/{}", encode_segment(slug))
}

/// URL of a record page, by record kind (`"post"` or `"event"`)
pub fn record_url(kind: &str, slug: &str) -> Option<String> {
    match kind {
        ImagePath::KIND => Some(post_url(slug)),
        ExternalLink::KIND => Some(event_url(slug)),
        _ => None,
    }
}
