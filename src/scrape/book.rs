// src/scrape/book.rs
//! Book assembly: chapter discovery + page extraction for one book.
//!
//! Per-chapter sources have no table of contents, so the extent of a book is
//! discovered by asking for chapter 1, 2, 3, … until a page says "no such
//! chapter". That decision is [`evaluate_step`]; the loop only acts on it.

use std::time::Duration;

use crate::config::options::Source;
use crate::core::net::{FetchResponse, Fetcher, same_address};
use crate::error::TransportError;
use crate::model::{Book, BookId, Chapter};
use crate::specs::{ChapterParse, Shape};

/// Why discovery of a per-chapter book ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The server sent us somewhere else: the chapter does not exist.
    Redirected { requested: String, landed: String },
    /// 4xx for the chapter page.
    Missing { status: u16 },
    /// The page exists but holds no verse markers.
    EmptyPage,
    /// Safety cap reached.
    ChapterLimit(u32),
}

/// Outcome of one discovery step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Chapter(Chapter),
    Stop(StopReason),
}

/// The termination predicate for per-chapter discovery.
/// Redirect is checked first: a redirect target may well be a page full of
/// verses from another chapter.
pub fn evaluate_step(requested: &str, resp: &FetchResponse, book: &BookId, chapter: u32) -> Step {
    if !same_address(requested, &resp.final_url) {
        return Step::Stop(StopReason::Redirected {
            requested: s!(requested),
            landed: resp.final_url.clone(),
        });
    }
    if resp.is_client_error() {
        return Step::Stop(StopReason::Missing { status: resp.status });
    }
    match Shape::PerChapter.extract(&resp.body, book, chapter) {
        ChapterParse::Verses(verses) => {
            let (ch, _) = Chapter::from_verses(book, chapter, verses);
            Step::Chapter(ch)
        }
        ChapterParse::Chapters(_) | ChapterParse::Empty => Step::Stop(StopReason::EmptyPage),
    }
}

/// Assemble one book from `source`.
///
/// Only transport failures are errors. Every other way a page can fail to
/// deliver ends discovery and returns whatever was assembled so far, possibly
/// a book with zero chapters.
pub async fn assemble_book(
    fetcher: &dyn Fetcher,
    book: &BookId,
    source: &Source,
    chapter_delay: Duration,
    max_chapters: u32,
) -> Result<Book, TransportError> {
    match source.shape {
        Shape::PerChapter => {
            let (out, _) = discover_chapters(fetcher, book, source, chapter_delay, max_chapters).await?;
            Ok(out)
        }
        Shape::PerBook => fetch_whole_book(fetcher, book, source).await,
    }
}

async fn discover_chapters(
    fetcher: &dyn Fetcher,
    book: &BookId,
    source: &Source,
    chapter_delay: Duration,
    max_chapters: u32,
) -> Result<(Book, StopReason), TransportError> {
    let mut out = Book::new(book.clone());

    let reason = loop {
        let chapter = out.next_chapter();
        let step = if chapter > max_chapters {
            Step::Stop(StopReason::ChapterLimit(max_chapters))
        } else {
            if chapter > 1 && !chapter_delay.is_zero() {
                tokio::time::sleep(chapter_delay).await;
            }
            let url = source.page_url(book, chapter);
            logd!("{} chapter {}: GET {}", book.osis, chapter, url);
            let resp = fetcher.fetch(&url).await?;
            evaluate_step(&url, &resp, book, chapter)
        };

        match step {
            Step::Chapter(ch) => {
                logd!("{}: {} verses", ch.osis_id, ch.verses().len());
                if let Err(e) = out.push_chapter(ch) {
                    // evaluate_step numbers the chapter itself; this is a bug, not a page fault
                    loge!("{e}");
                    break StopReason::EmptyPage;
                }
            }
            Step::Stop(reason @ StopReason::ChapterLimit(_)) => {
                logw!("{} hit {:?}; the site may not be signalling the end", book.osis, reason);
                break reason;
            }
            Step::Stop(reason) => {
                logd!("{} ends after {} chapters: {:?}", book.osis, chapter - 1, reason);
                break reason;
            }
        }
    };

    Ok((out, reason))
}

async fn fetch_whole_book(
    fetcher: &dyn Fetcher,
    book: &BookId,
    source: &Source,
) -> Result<Book, TransportError> {
    let mut out = Book::new(book.clone());
    let url = source.page_url(book, 1);
    logd!("{}: GET {}", book.osis, url);
    let resp = fetcher.fetch(&url).await?;

    if resp.is_client_error() {
        logw!("{}: {} answered {}", book.osis, url, resp.status);
        return Ok(out);
    }

    match Shape::PerBook.extract(&resp.body, book, 1) {
        ChapterParse::Chapters(chapters) => {
            for ch in chapters {
                // A gap means the page skipped or mislabeled a heading.
                if let Err(e) = out.push_chapter(ch) {
                    logw!("parsing fault: {e}");
                }
            }
        }
        ChapterParse::Verses(_) | ChapterParse::Empty => {
            logd!("{}: no chapters on {}", book.osis, url);
        }
    }
    Ok(out)
}
