// src/specs/per_book.rs
//! Extractor for one-page-per-book sources.
//!
//! Layout (everything may be nested in `<p>`/`<div>` wrappers):
//! ```text
//! <center><h3>THE FIRST BOOK OF ESDRAS</h3> ...navigation...</center>
//! <h3>Book 1.</h3>
//! <p><b>1</b> And Josias held the feast ... <b>2</b> And he set the priests ...</p>
//! <h3>Book 1.2</h3>
//! <p><b>1</b> ...</p>
//! ```
//! - `<h3>` with a numeric suffix after the last `.` opens that chapter;
//!   a bare trailing dot (`Book 1.`) is chapter 1.
//! - `<b>` holding a number opens a verse; its text runs until the next
//!   `<b>` or `<h3>`, through any inline markup.
//! - `center`, `script` and `style` subtrees are layout, never content.
//!
//! The walk is a single document-order pass over the tree.

use scraper::{ElementRef, Html};

use super::{ChapterParse, NON_CANONICAL_CLASSES};
use crate::core::html::{class_contains, text_of};
use crate::core::sanitize::{clean_verse_text, parse_label};
use crate::error::MarkerError;
use crate::model::{BookId, Chapter, Verse};

const CHAPTER_TAG: &str = "h3";
const VERSE_TAG: &str = "b";
const SKIPPED_CONTAINERS: &[&str] = &["center", "script", "style", "head"];

pub fn extract(page: &str, book: &BookId) -> ChapterParse {
    let doc = Html::parse_document(page);
    let mut walk = Walk::new(book);
    walk.visit(doc.root_element());
    let chapters = walk.finish();

    if chapters.is_empty() { ChapterParse::Empty } else { ChapterParse::Chapters(chapters) }
}

/// Heading text → chapter number.
/// `Ok(None)` means "not a chapter heading at all" (no separator).
fn heading_chapter(text: &str) -> Result<Option<u32>, MarkerError> {
    let Some((prefix, suffix)) = text.rsplit_once('.') else { return Ok(None) };
    let suffix = suffix.trim();
    if suffix.is_empty() {
        // "Book 1." names the first chapter; "Chap." or "etc." names nothing.
        return if prefix.trim_end().ends_with(|c: char| c.is_ascii_digit()) {
            Ok(Some(1))
        } else {
            Ok(None)
        };
    }
    parse_label(suffix)
        .map(Some)
        .ok_or_else(|| MarkerError::ChapterHeading(s!(text)))
}

struct OpenVerse {
    number: u32,
    canonical: bool,
    text: String,
}

struct Walk<'b> {
    book: &'b BookId,
    chapters: Vec<Chapter>,
    current: Option<Chapter>,
    verse: Option<OpenVerse>,
    /// Set after a malformed heading: verses are dropped until the next good one.
    lost_chapter: bool,
    /// `current` was opened by a verse marker, not by a heading.
    implicit: bool,
}

impl<'b> Walk<'b> {
    fn new(book: &'b BookId) -> Self {
        Self { book, chapters: Vec::new(), current: None, verse: None, lost_chapter: false, implicit: false }
    }

    fn visit(&mut self, el: ElementRef<'_>) {
        for child in el.children() {
            if let Some(text) = child.value().as_text() {
                if let Some(verse) = self.verse.as_mut() {
                    verse.text.push_str(text);
                }
                continue;
            }
            let Some(child_el) = ElementRef::wrap(child) else { continue };
            match child_el.value().name() {
                CHAPTER_TAG => self.heading(child_el),
                VERSE_TAG => self.marker(child_el),
                name if SKIPPED_CONTAINERS.contains(&name) => {}
                _ => self.visit(child_el),
            }
        }
    }

    fn heading(&mut self, el: ElementRef<'_>) {
        let text = text_of(el);
        match heading_chapter(&text) {
            Ok(Some(number)) => {
                if self.implicit && number == 1 {
                    // Numbered lines ahead of "Book 1." were front matter.
                    self.verse = None;
                    if let Some(ch) = self.current.take() {
                        logw!("{}: {} verses before the first heading dropped", ch.osis_id, ch.verses().len());
                    }
                }
                self.close_chapter();
                self.current = Some(Chapter::new(self.book, number));
                self.lost_chapter = false;
                self.implicit = false;
            }
            Ok(None) => {
                logd!("{}: ignoring heading {:?}", self.book.osis, text);
                self.flush_verse();
            }
            Err(e) => {
                logw!("{}: {}", self.book.osis, e);
                self.close_chapter();
                self.lost_chapter = true;
                self.implicit = false;
            }
        }
    }

    fn marker(&mut self, el: ElementRef<'_>) {
        let label = text_of(el);
        let Some(number) = parse_label(&label) else {
            // Plain bold text before any chapter is page furniture, not a marker.
            if self.current.is_some() {
                logw!("{}: {}", self.chapter_ref(), MarkerError::VerseLabel(label));
                self.flush_verse();
            }
            return;
        };

        if self.current.is_none() {
            if self.lost_chapter || !self.chapters.is_empty() {
                return;
            }
            // Single-chapter books may carry no heading at all.
            self.current = Some(Chapter::new(self.book, 1));
            self.implicit = true;
        }

        self.flush_verse();
        self.verse = Some(OpenVerse {
            number,
            canonical: !class_contains(el, NON_CANONICAL_CLASSES),
            text: s!(),
        });
    }

    fn chapter_ref(&self) -> String {
        self.current.as_ref().map(|c| c.osis_id.clone()).unwrap_or_else(|| s!(&self.book.osis))
    }

    fn flush_verse(&mut self) {
        let Some(open) = self.verse.take() else { return };
        let Some(chapter) = self.current.as_mut() else { return };

        let text = clean_verse_text(&open.text);
        if text.is_empty() {
            logw!("{}.{}: empty verse text, skipped", chapter.osis_id, open.number);
            return;
        }
        let verse = Verse::new(self.book, chapter.number, open.number, text, open.canonical);
        if let Err(e) = chapter.push_verse(verse) {
            logw!("{e}");
        }
    }

    fn close_chapter(&mut self) {
        self.flush_verse();
        if let Some(chapter) = self.current.take() {
            if chapter.is_empty() {
                logd!("{}: heading without verses, dropped", chapter.osis_id);
            } else {
                self.chapters.push(chapter);
            }
        }
    }

    fn finish(mut self) -> Vec<Chapter> {
        self.close_chapter();
        self.chapters
    }
}
