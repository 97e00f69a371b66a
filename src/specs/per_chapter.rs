// src/specs/per_chapter.rs
//! Extractor for one-chapter-per-page sources.
//!
//! Layout:
//! ```text
//! <div id="div">
//!   <a href="..."><span class="versehover">1</span> And Josias held the feast ...</a>
//!   <a href="..."><span class="versehover">2</span> And he set the priests ...</a>
//! </div>
//! ```
//! Every anchor inside `#div` that carries a `span.versehover` label is a verse
//! marker; anchors without one (navigation, footnotes) are not.

use scraper::Html;

use super::{ChapterParse, NON_CANONICAL_CLASSES};
use crate::core::html::{class_contains, selector, text_of, text_without};
use crate::core::sanitize::{clean_verse_text, parse_label};
use crate::error::MarkerError;
use crate::model::{BookId, Chapter, Verse};

pub fn extract(page: &str, book: &BookId, chapter: u32) -> ChapterParse {
    let doc = Html::parse_document(page);
    let anchor_sel = selector("#div a");
    let label_sel = selector("span.versehover");

    let mut verses = Vec::new();
    for anchor in doc.select(&anchor_sel) {
        let Some(label) = anchor.select(&label_sel).next() else { continue };

        let raw_label = text_of(label);
        let Some(number) = parse_label(&raw_label) else {
            logw!("{}: {}", book.chapter_osis(chapter), MarkerError::VerseLabel(raw_label));
            continue;
        };

        let text = clean_verse_text(&text_without(anchor, Some(label)));
        if text.is_empty() {
            logw!("{}: empty verse text, skipped", book.verse_osis(chapter, number));
            continue;
        }

        let canonical = !(class_contains(anchor, NON_CANONICAL_CLASSES)
            || class_contains(label, NON_CANONICAL_CLASSES));
        verses.push(Verse::new(book, chapter, number, text, canonical));
    }

    // Drop out-of-order verses here so the caller always gets a valid sequence.
    let (checked, rejected) = Chapter::from_verses(book, chapter, verses);
    for e in rejected {
        logw!("{e}");
    }

    if checked.is_empty() {
        ChapterParse::Empty
    } else {
        ChapterParse::Verses(checked.verses().to_vec())
    }
}
