// src/document.rs
//! Document assembly: header + books in canon order.

use chrono::{DateTime, TimeZone};

use crate::canon::Canon;
use crate::config::consts::{TIMESTAMP_FMT, WORK_ID, WORK_LANG, WORK_NAME, WORK_TITLE};
use crate::model::{Book, Document, Header, HeaderDetail};

/// What to do with books that came back with zero chapters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyBooks {
    /// Keep them so scraping gaps stay visible in the output.
    #[default]
    Keep,
    Drop,
}

impl Header {
    /// Header for one run. `source_base` goes into the provenance statement.
    pub fn build<Tz>(detail: HeaderDetail, source_base: &str, now: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            title: s!(WORK_TITLE),
            work_id: s!(WORK_ID),
            work_name: s!(WORK_NAME),
            provenance: format!(
                "Scraped from {source_base}, and converted to OSIS by {}.",
                env!("CARGO_PKG_NAME")
            ),
            timestamp: now.format(TIMESTAMP_FMT).to_string(),
            lang: s!(WORK_LANG),
            detail,
        }
    }
}

/// Merge finished books into one document.
///
/// The output order is the canon's declaration order, whatever order the books
/// arrive in. Books the canon does not know go last, in arrival order.
pub fn assemble(mut books: Vec<Book>, canon: &Canon, header: Header, empty: EmptyBooks) -> Document {
    for b in &books {
        if canon.position(&b.id.osis).is_none() {
            logw!("{} is not part of the canon; placing it last", b.id.osis);
        }
    }
    // stable sort keeps arrival order among unknowns
    books.sort_by_key(|b| canon.position(&b.id.osis).unwrap_or(usize::MAX));

    if empty == EmptyBooks::Drop {
        books.retain(|b| {
            if b.is_empty() {
                logf!("Dropping empty book {}", b.id.osis);
            }
            !b.is_empty()
        });
    }

    Document { header, books }
}

/// A single-book document sharing the run's header.
pub fn single(book: Book, header: Header) -> Document {
    Document { header, books: vec![book] }
}
