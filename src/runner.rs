// src/runner.rs
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    canon::Canon,
    config::options::{AppOptions, BookSelector},
    core::net::Fetcher,
    document::{self, EmptyBooks},
    error::{ExportError, RunError},
    file::{write_aggregate, write_per_book},
    model::{Book, BookId, Header},
    osis,
    progress::Progress,
    scrape::{collect_books, BookOutcome},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookStatus {
    Complete { chapters: usize, verses: usize },
    /// Zero chapters assembled; the book is still in the output.
    Empty,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookReport {
    pub book: BookId,
    pub status: BookStatus,
}

impl BookReport {
    fn from_outcome(outcome: &BookOutcome) -> Self {
        let book = &outcome.book;
        let status = match &outcome.failure {
            Some(reason) => BookStatus::Failed(reason.clone()),
            None if book.is_empty() => BookStatus::Empty,
            None => BookStatus::Complete { chapters: book.chapters().len(), verses: book.verse_count() },
        };
        Self { book: book.id.clone(), status }
    }
}

/// Summary of what was produced.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    /// One entry per requested book, in canon order.
    pub report: Vec<BookReport>,
    pub verses_written: usize,
}

impl RunSummary {
    pub fn complete(&self) -> impl Iterator<Item = &BookReport> {
        self.report.iter().filter(|r| matches!(r.status, BookStatus::Complete { .. }))
    }

    pub fn empty(&self) -> impl Iterator<Item = &BookReport> {
        self.report.iter().filter(|r| r.status == BookStatus::Empty)
    }

    pub fn failed(&self) -> impl Iterator<Item = &BookReport> {
        self.report.iter().filter(|r| matches!(r.status, BookStatus::Failed(_)))
    }

    /// Operator-facing summary, one line per book.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} books: {} complete, {} empty, {} failed; {} verses",
            self.report.len(),
            self.complete().count(),
            self.empty().count(),
            self.failed().count(),
            self.verses_written,
        );
        for r in &self.report {
            let line = match &r.status {
                BookStatus::Complete { chapters, verses } => {
                    format!("  ok     {:<8} {chapters} chapters, {verses} verses", r.book.osis)
                }
                BookStatus::Empty => format!("  empty  {:<8} no chapters found", r.book.osis),
                BookStatus::Failed(reason) => format!("  FAILED {:<8} {reason}", r.book.osis),
            };
            let _ = writeln!(out, "{line}");
        }
        for path in &self.files_written {
            let _ = writeln!(out, "wrote {}", path.display());
        }
        out
    }
}

/// The books this run asks for, in canon order.
pub fn resolve_canon(selector: &BookSelector) -> Result<Canon, RunError> {
    let canon = Canon::kjv_apocrypha();
    match selector {
        BookSelector::All => Ok(canon),
        BookSelector::Some(keys) => canon.select(keys).map_err(RunError::UnknownBook),
    }
}

/// Top-level runner: scrape, assemble, write, verify.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub async fn run(
    options: &AppOptions,
    fetcher: Arc<dyn Fetcher>,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, RunError> {
    let canon = resolve_canon(&options.scrape.books)?;
    logf!("Assembling {} books from {}", canon.len(), options.scrape.source.base_url);

    let outcomes = collect_books(fetcher, &canon, &options.scrape, progress).await;

    let mut report: Vec<BookReport> = outcomes.iter().map(BookReport::from_outcome).collect();
    report.sort_by_key(|r| canon.position(&r.book.osis).unwrap_or(usize::MAX));
    for r in &report {
        if r.status == BookStatus::Empty {
            logw!("{} ({}) has no chapters; it stays in the output empty", r.book.name, r.book.osis);
        }
    }

    let books: Vec<Book> = outcomes.into_iter().map(|o| o.book).collect();
    let header = Header::build(options.export.header, &options.scrape.source.base_url, chrono::Local::now());
    let doc = document::assemble(books, &canon, header.clone(), options.export.empty_books);

    let mut files_written = Vec::new();
    if options.export.per_book {
        let singles: Vec<_> = doc
            .books
            .iter()
            .filter(|b| options.export.empty_books == EmptyBooks::Keep || !b.is_empty())
            .map(|b| document::single(b.clone(), header.clone()))
            .collect();
        files_written.extend(write_per_book(&options.export, &singles)?);
    }
    let aggregate = write_aggregate(&options.export, &doc)?;

    let verses_written = verify(&aggregate, doc.verse_count())?;
    files_written.push(aggregate);

    Ok(RunSummary { files_written, report, verses_written })
}

/// Read the aggregate back and compare its verse count with what we meant to write.
fn verify(path: &Path, expected: usize) -> Result<usize, RunError> {
    let xml = std::fs::read_to_string(path)
        .map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
    let verses = osis::read_verses(&xml).map_err(|source| RunError::Verify { path: path.to_path_buf(), source })?;

    if verses.len() == expected {
        logd!("{}: {} verses verified", path.display(), expected);
    } else {
        loge!("{}: wrote {} verses but read back {}", path.display(), expected, verses.len());
    }
    Ok(verses.len())
}
