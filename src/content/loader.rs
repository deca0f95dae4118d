//! Content loader - loads every record file from a directory

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use walkdir::WalkDir;

use super::error::LoadError;
use super::markdown::MarkdownRenderer;
use super::parser;
use super::record::{ContentRecord, SecondaryField};

/// Load and parse every regular file directly inside `dir`
///
/// Any failure aborts the whole load. The result is sorted newest first;
/// records sharing a date keep directory enumeration order.
pub fn load_all<F: SecondaryField>(
    dir: &Path,
    renderer: &MarkdownRenderer,
) -> Result<Vec<ContentRecord<F>>, LoadError> {
    let mut records = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if !entry.file_type().is_file() {
            tracing::debug!("Skipping non-file entry {:?}", entry.path());
            continue;
        }

        let record = load_file(entry.path(), renderer)?;
        tracing::debug!("Loaded {} {:?} from {:?}", F::KIND, record.title, entry.path());
        records.push(record);
    }

    sort_by_date(&mut records);

    tracing::info!("Loaded {} {}s from {:?}", records.len(), F::KIND, dir);

    Ok(records)
}

/// Load a single record file
pub fn load_file<F: SecondaryField>(
    path: &Path,
    renderer: &MarkdownRenderer,
) -> Result<ContentRecord<F>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::FileUnreadable {
        file: path.to_path_buf(),
        source,
    })?;

    parser::parse(BufReader::new(file), renderer)
        .map_err(|e| LoadError::from_parse(path.to_path_buf(), e))
}

/// Sort newest first, keeping the relative order of equal dates
pub fn sort_by_date<F>(records: &mut [ContentRecord<F>]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

fn walk_error(dir: &Path, err: walkdir::Error) -> LoadError {
    if err.depth() == 0 {
        LoadError::DirectoryUnreadable {
            dir: dir.to_path_buf(),
            source: err.into(),
        }
    } else {
        let file = err.path().unwrap_or(dir).to_path_buf();
        LoadError::FileUnreadable {
            file,
            source: io::Error::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::error::LoadErrorKind;
    use crate::content::record::{Event, Post};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_load_sorts_newest_first() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "a.md",
            "Hello World\n2024-01-01\nimg.png\ngo,web\n\nBody line one\n",
        );
        write(&dir, "b.md", "Second Post\n2024-06-01\nimg2.png\ngo\n\nBody two\n");

        let posts: Vec<Post> = load_all(dir.path(), &MarkdownRenderer::new()).unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Second Post", "Hello World"]);
    }

    #[test]
    fn test_any_extension_is_loaded() {
        let dir = TempDir::new().unwrap();
        write(&dir, "note", "A\n2023-01-01\n\n\n\n");
        write(&dir, "note.txt", "B\n2023-01-02\n\n\n\n");

        let events: Vec<Event> = load_all(dir.path(), &MarkdownRenderer::new()).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_subdirectories_are_not_descended() {
        let dir = TempDir::new().unwrap();
        write(&dir, "top.md", "Top\n2023-01-01\n\n\n\n");
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/deep.md"), "Deep\nbad\n").unwrap();

        let posts: Vec<Post> = load_all(dir.path(), &MarkdownRenderer::new()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Top");
    }

    #[test]
    fn test_bad_date_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.md", "Good\n2024-01-01\n\n\n\n");
        write(&dir, "bad.md", "Bad\nnot-a-date\n\n\n\n");

        let err = load_all::<crate::content::ImagePath>(dir.path(), &MarkdownRenderer::new())
            .unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::InvalidDate);
        match err {
            LoadError::InvalidDate { file, line } => {
                assert!(file.ends_with("bad.md"));
                assert_eq!(line, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_latin1_body_still_loads() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a", "Plain\n2024-02-01\n\n\n\n");
        fs::write(
            dir.path().join("b"),
            b"Cafe Night\n2024-01-01\nimg.png\ngo\n\nCaf\xe9 au lait\n",
        )
        .unwrap();

        let posts: Vec<Post> = load_all(dir.path(), &MarkdownRenderer::new()).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].title, "Cafe Night");
        assert!(posts[1].content.contains("au lait"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_is_unreadable() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.md", "Good\n2024-01-01\n\n\n\n");
        let link = dir.path().join("broken.md");
        std::os::unix::fs::symlink(dir.path().join("missing.md"), &link).unwrap();

        let err = load_all::<crate::content::ImagePath>(dir.path(), &MarkdownRenderer::new())
            .unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::FileUnreadable);
        match err {
            LoadError::FileUnreadable { file, .. } => assert_eq!(file, link),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_failure_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.md");

        let err = load_file::<crate::content::ImagePath>(&missing, &MarkdownRenderer::new())
            .unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::FileUnreadable);
        assert!(err.to_string().contains("gone.md"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err =
            load_all::<crate::content::ExternalLink>(&missing, &MarkdownRenderer::new()).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::DirectoryUnreadable);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let posts: Vec<Post> = load_all(dir.path(), &MarkdownRenderer::new()).unwrap();
        assert!(posts.is_empty());
    }
}
