// src/error.rs
//! Error taxonomy, one enum per layer.
//!
//! Chapter discovery does not use errors to stop: see `scrape::book::StopReason`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fetch failure unrelated to "this chapter does not exist".
/// Aborts the assembly of the book that hit it, nothing else.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with server error {status}")]
    ServerStatus { url: String, status: u16 },
}

/// A verse or chapter marker whose label is not a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("verse marker without numeric label: {0:?}")]
    VerseLabel(String),

    #[error("chapter heading without numeric label: {0:?}")]
    ChapterHeading(String),
}

/// Violations of the Book/Chapter/Verse ordering invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{chapter}: verse {found} does not follow verse {last}")]
    VerseOutOfOrder { chapter: String, last: u32, found: u32 },

    #[error("{book}: expected chapter {expected}, found chapter {found}")]
    ChapterOutOfSequence { book: String, expected: u32, found: u32 },

    #[error("{0} has no verses")]
    EmptyChapter(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("serialized XML is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum OsisReadError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("verse osisID {0:?} is not of the form Book.Chapter.Verse")]
    BadVerseId(String),

    #[error("verse element without osisID")]
    MissingVerseId,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("cannot read back {path}: {source}")]
    Verify {
        path: PathBuf,
        #[source]
        source: OsisReadError,
    },

    #[error("unknown book {0:?} (see --list-books)")]
    UnknownBook(String),
}
