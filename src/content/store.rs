//! In-memory content store
//!
//! Built once from a directory and never mutated afterwards, so a store can
//! be shared between request handlers without locking.

use std::collections::HashMap;
use std::path::Path;

use super::error::{LoadError, NotFound};
use super::loader;
use super::markdown::MarkdownRenderer;
use super::record::{ContentRecord, ExternalLink, ImagePath, SecondaryField};

/// Read-only queries over a collection of records
pub trait ContentSource: Send + Sync {
    type Field: SecondaryField;

    /// All records, newest first
    fn get_all(&self) -> &[ContentRecord<Self::Field>];

    /// First record whose slug matches
    fn get_by_slug(&self, slug: &str) -> Result<&ContentRecord<Self::Field>, NotFound>;
}

/// Source of blog posts
pub trait PostSource: ContentSource<Field = ImagePath> {}
impl<T: ContentSource<Field = ImagePath>> PostSource for T {}

/// Source of event notes
pub trait EventSource: ContentSource<Field = ExternalLink> {}
impl<T: ContentSource<Field = ExternalLink>> EventSource for T {}

/// Immutable, date-ordered collection of records
#[derive(Debug, Clone)]
pub struct ContentStore<F> {
    records: Vec<ContentRecord<F>>,
}

impl<F: SecondaryField> ContentStore<F> {
    /// Build a store from already parsed records
    pub fn new(mut records: Vec<ContentRecord<F>>) -> Self {
        loader::sort_by_date(&mut records);
        Self { records }
    }

    /// Load every record file in `dir`
    pub fn load(dir: &Path, renderer: &MarkdownRenderer) -> Result<Self, LoadError> {
        let records = loader::load_all(dir, renderer)?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct tags with their use count, most used first then by name
    pub fn tags(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            for tag in record.tags.iter().filter(|t| !t.is_empty()) {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<_> = counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        tags
    }
}

impl<F: SecondaryField> ContentSource for ContentStore<F> {
    type Field = F;

    fn get_all(&self) -> &[ContentRecord<F>] {
        &self.records
    }

    fn get_by_slug(&self, slug: &str) -> Result<&ContentRecord<F>, NotFound> {
        self.records
            .iter()
            .find(|r| r.slug == slug)
            .ok_or_else(|| NotFound {
                kind: F::KIND,
                slug: slug.to_string(),
            })
    }
}

impl<F: SecondaryField> Default for ContentStore<F> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parser::parse_str;
    use crate::content::record::{slugify, Post};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn post(title: &str, date: (i32, u32, u32), picture: &str) -> Post {
        Post {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            secondary: ImagePath(picture.to_string()),
            tags: vec![String::new()],
            content: String::new(),
            slug: slugify(title),
        }
    }

    #[test]
    fn test_new_sorts_descending() {
        let store = ContentStore::new(vec![
            post("Old", (2020, 1, 1), ""),
            post("New", (2024, 1, 1), ""),
            post("Mid", (2022, 1, 1), ""),
        ]);

        let all = store.get_all();
        assert!(all.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(all[0].title, "New");
    }

    #[test]
    fn test_get_by_slug() {
        let store = ContentStore::new(vec![
            post("Foo Bar", (2024, 1, 1), "foo.png"),
            post("Other", (2024, 2, 1), ""),
        ]);

        let found = store.get_by_slug("Foo-Bar").unwrap();
        assert_eq!(found.title, "Foo Bar");
        assert_eq!(found.picture(), "foo.png");
    }

    #[test]
    fn test_duplicate_slug_first_wins() {
        let store = ContentStore::new(vec![
            post("Same Title", (2021, 1, 1), "older.png"),
            post("Same Title", (2023, 1, 1), "newer.png"),
        ]);

        let first = &store.get_all()[0];
        let found = store.get_by_slug("Same-Title").unwrap();
        assert!(std::ptr::eq(first, found));
        assert_eq!(found.picture(), "newer.png");
    }

    #[test]
    fn test_hyphen_and_space_titles_share_a_slug() {
        let store = ContentStore::new(vec![
            post("a b", (2024, 3, 1), "spaced"),
            post("a-b", (2024, 1, 1), "hyphened"),
        ]);
        assert_eq!(store.get_by_slug("a-b").unwrap().picture(), "spaced");
    }

    #[test]
    fn test_not_found() {
        let empty: ContentStore<ImagePath> = ContentStore::default();
        let err = empty.get_by_slug("anything").unwrap_err();
        assert_eq!(err.kind, "post");

        let store = ContentStore::new(vec![post("Foo Bar", (2024, 1, 1), "")]);
        assert!(store.get_by_slug("Foo Bar").is_err());
        assert!(store.get_by_slug("foo-bar").is_err());
    }

    #[test]
    fn test_tags_are_counted() {
        let renderer = MarkdownRenderer::new();
        let a: Post = parse_str("A\n2024-01-01\n\ngo,web\n", &renderer).unwrap();
        let b: Post = parse_str("B\n2024-01-02\n\ngo\n", &renderer).unwrap();
        let c: Post = parse_str("C\n2024-01-03\n\n\n", &renderer).unwrap();

        let store = ContentStore::new(vec![a, b, c]);
        assert_eq!(
            store.tags(),
            vec![("go".to_string(), 2), ("web".to_string(), 1)]
        );
    }

    #[test]
    fn test_load_round_trip() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a"),
            "Hello World\n2024-01-01\nimg.png\ngo,web\n\nBody line one\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b"),
            "Second Post\n2024-06-01\nimg2.png\ngo\n\nBody two\n",
        )
        .unwrap();

        let store: ContentStore<ImagePath> =
            ContentStore::load(dir.path(), &MarkdownRenderer::new()).unwrap();
        let titles: Vec<_> = store.get_all().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Second Post", "Hello World"]);

        let hello = store.get_by_slug("Hello-World").unwrap();
        assert_eq!(hello.tags, vec!["go", "web"]);
        assert_eq!(hello.picture(), "img.png");
    }

    #[test]
    fn test_load_with_bad_file_yields_no_store() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok"), "Ok\n2024-01-01\n\n\n\n").unwrap();
        fs::write(dir.path().join("bad"), "Bad\n01/02/2024\n\n\n\n").unwrap();

        let result = ContentStore::<ExternalLink>::load(dir.path(), &MarkdownRenderer::new());
        assert!(matches!(result, Err(LoadError::InvalidDate { .. })));
    }

    #[test]
    fn test_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContentStore<ImagePath>>();
        assert_send_sync::<ContentStore<ExternalLink>>();
    }
}
