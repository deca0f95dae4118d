//! Errors raised while turning content files into records

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to parse a single record file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid date {line:?}, expected YYYY-MM-DD")]
    InvalidDate { line: String },

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// Failure to load a content directory
///
/// Loading is all-or-nothing: any of these aborts the whole directory.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read the directory {dir:?}: {source}")]
    DirectoryUnreadable {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open the file {file:?}: {source}")]
    FileUnreadable {
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid date {line:?} in {file:?}, expected YYYY-MM-DD")]
    InvalidDate { file: PathBuf, line: String },

    #[error("malformed record {file:?}: {source}")]
    MalformedRecord {
        file: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Coarse classification of a [`LoadError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    DirectoryUnreadable,
    FileUnreadable,
    InvalidDate,
    MalformedRecord,
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::DirectoryUnreadable { .. } => LoadErrorKind::DirectoryUnreadable,
            Self::FileUnreadable { .. } => LoadErrorKind::FileUnreadable,
            Self::InvalidDate { .. } => LoadErrorKind::InvalidDate,
            Self::MalformedRecord { .. } => LoadErrorKind::MalformedRecord,
        }
    }

    /// Attach the offending file to a parse failure
    pub(crate) fn from_parse(file: PathBuf, err: ParseError) -> Self {
        match err {
            ParseError::InvalidDate { line } => Self::InvalidDate { file, line },
            other => Self::MalformedRecord {
                file,
                source: other,
            },
        }
    }
}

/// No record matches the requested slug
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} not found: {slug}")]
pub struct NotFound {
    pub kind: &'static str,
    pub slug: String,
}
