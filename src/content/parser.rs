//! Record file parser
//!
//! A record file is a fixed header followed by a markdown body:
//!
//! ```text
//! Title
//! 2024-06-01
//! image path or link
//! tag,another tag
//! <separator, ignored>
//! markdown body...
//! ```
//!
//! Missing header lines read as empty strings. Only the date line can fail.
//! Bytes that are not valid UTF-8 are replaced rather than rejected.

use chrono::NaiveDate;
use std::io::BufRead;

use super::error::ParseError;
use super::markdown::MarkdownRenderer;
use super::record::{slugify, ContentRecord, SecondaryField};

/// Date format of the second header line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a record from a line-oriented reader
pub fn parse<F, R>(reader: R, renderer: &MarkdownRenderer) -> Result<ContentRecord<F>, ParseError>
where
    F: SecondaryField,
    R: BufRead,
{
    let mut lines = LineScanner::new(reader);

    let title = lines.next_line()?;
    let date = parse_date(&lines.next_line()?)?;
    let secondary = F::from_line(lines.next_line()?);
    let tags = lines.next_line()?.split(',').map(str::to_string).collect();
    lines.next_line()?;

    let mut body = String::new();
    while let Some(line) = lines.next_remaining()? {
        body.push_str(&line);
        body.push('\n');
    }

    let content = renderer.render(&body);
    let slug = slugify(&title);

    Ok(ContentRecord {
        title,
        date,
        secondary,
        tags,
        content,
        slug,
    })
}

/// Parse a record held in memory
pub fn parse_str<F: SecondaryField>(
    input: &str,
    renderer: &MarkdownRenderer,
) -> Result<ContentRecord<F>, ParseError> {
    parse(input.as_bytes(), renderer)
}

/// Parse the date header line
pub fn parse_date(line: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(line, DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
        line: line.to_string(),
    })
}

/// Reads raw lines, yielding empty strings once the input is exhausted
struct LineScanner<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineScanner<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    fn next_line(&mut self) -> Result<String, ParseError> {
        Ok(self.next_remaining()?.unwrap_or_default())
    }

    fn next_remaining(&mut self) -> Result<Option<String>, ParseError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::record::{Event, ExternalLink, ImagePath, Post};

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new()
    }

    #[test]
    fn test_parse_full_post() {
        let input = "Hello World\n2024-01-01\nimg.png\ngo,web\n\nBody line one\n";
        let post: Post = parse_str(input, &renderer()).unwrap();

        assert_eq!(post.title, "Hello World");
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(post.secondary, ImagePath("img.png".to_string()));
        assert_eq!(post.tags, vec!["go", "web"]);
        assert_eq!(post.slug, "Hello-World");
        assert!(post.content.contains("<p>Body line one</p>"));
    }

    #[test]
    fn test_header_fields_are_verbatim() {
        let input = "  Spaced Title \n2024-02-03\n https://example.com/x \n a, b ,c\n\nbody\n";
        let event: Event = parse_str(input, &renderer()).unwrap();

        assert_eq!(event.title, "  Spaced Title ");
        assert_eq!(
            event.secondary,
            ExternalLink(" https://example.com/x ".to_string())
        );
        assert_eq!(event.tags, vec![" a", " b ", "c"]);
        assert_eq!(event.slug, "--Spaced-Title-");
    }

    #[test]
    fn test_short_file_reads_missing_lines_as_empty() {
        let post: Post = parse_str("X\n2024-01-01", &renderer()).unwrap();

        assert_eq!(post.title, "X");
        assert_eq!(post.secondary.0, "");
        assert_eq!(post.tags, vec![""]);
        assert_eq!(post.content, "");
    }

    #[test]
    fn test_tags_without_commas() {
        let post: Post = parse_str("T\n2024-01-01\n\nsolo\n", &renderer()).unwrap();
        assert_eq!(post.tags, vec!["solo"]);
    }

    #[test]
    fn test_invalid_date() {
        let err = parse_str::<ImagePath>("X\nnot-a-date\n", &renderer()).unwrap_err();
        match err {
            ParseError::InvalidDate { line } => assert_eq!(line, "not-a-date"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_date_line_is_invalid() {
        let err = parse_str::<ImagePath>("Only a title\n", &renderer()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidDate { .. }));
    }

    #[test]
    fn test_separator_line_is_discarded() {
        let input = "T\n2024-01-01\nimg\ntag\nthis is not blank\nkept\n";
        let post: Post = parse_str(input, &renderer()).unwrap();
        assert!(!post.content.contains("this is not blank"));
        assert!(post.content.contains("kept"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "Windows Post\r\n2024-05-05\r\nimg.png\r\na,b\r\n\r\nBody\r\n";
        let post: Post = parse_str(input, &renderer()).unwrap();
        assert_eq!(post.title, "Windows Post");
        assert_eq!(post.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_multiline_body_is_markdown() {
        let input = "T\n2024-01-01\nimg\ntag\n\n# Heading\n\n- one\n- two\n";
        let post: Post = parse_str(input, &renderer()).unwrap();
        assert!(post.content.contains("<h1>Heading</h1>"));
        assert!(post.content.contains("<li>two</li>"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let bytes: &[u8] = b"Cafe Night\n2024-01-01\n\xff\xfe\ngo\n\nCaf\xe9 au lait\n";
        let post = parse::<ImagePath, _>(bytes, &renderer()).unwrap();

        assert_eq!(post.title, "Cafe Night");
        assert_eq!(post.secondary.0, "\u{FFFD}\u{FFFD}");
        assert!(post.content.contains("Caf\u{FFFD} au lait"));
    }

    #[test]
    fn test_lone_carriage_return_is_kept() {
        let post: Post = parse_str("A\rB\n2024-01-01\n", &renderer()).unwrap();
        assert_eq!(post.title, "A\rB");
    }
}
