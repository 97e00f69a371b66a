// src/specs/mod.rs
//! # Page specs
//!
//! This module knows **how to read the pages**. Each source lays its verses
//! out differently; each layout (a [`Shape`]) gets one extractor module that turns
//! raw page text into the shared `model` types.
//!
//! ## What lives here
//! - **Pure HTML parsing** of one page at a time (no networking).
//! - **Marker recognition**: which element is a verse number, which is a
//!   chapter heading, which containers are layout noise.
//! - **Text cleanup** of verse bodies via `core::sanitize`.
//!
//! ## What does **not** live here
//! - Fetching, delays and chapter discovery (`scrape::book`).
//! - Ordering books or building the document (`document`).
//!
//! ## Conventions
//! - A marker whose label is not a number is logged and skipped; the text after
//!   it, up to the next marker, is not attributed to any verse.
//! - A page with no usable verse at all parses to [`ChapterParse::Empty`]. For
//!   per-chapter sources that is the end-of-book signal, not an error.
//! - Markers with a class containing `noncanon` or `editorial` produce
//!   non-canonical verses.
//! - `scraper::Html` is not `Send`: parse and drop it inside these synchronous
//!   functions, never across an `.await`.
//!
//! ## Shapes
//! - `per_chapter` – one page per chapter, verse anchors inside `#div`
//!   (kingjamesbibleonline.org).
//! - `per_book` – one page per book, `<h3>` chapter headings and `<b>` verse
//!   numbers (sacred-texts.com).

pub mod per_book;
pub mod per_chapter;

use crate::model::{BookId, Chapter, Verse};

const NON_CANONICAL_CLASSES: &[&str] = &["noncanon", "editorial"];

/// Page layout of a source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Shape A: each chapter is its own page.
    PerChapter,
    /// Shape B: one page carries the whole book.
    PerBook,
}

/// What one page yielded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChapterParse {
    /// Verses of the single requested chapter (per-chapter pages).
    Verses(Vec<Verse>),
    /// Every chapter found on the page, in page order (per-book pages).
    Chapters(Vec<Chapter>),
    /// No recognizable verse markers.
    Empty,
}

impl ChapterParse {
    pub fn is_empty(&self) -> bool {
        matches!(self, ChapterParse::Empty)
    }
}

impl Shape {
    /// Parse one page. `chapter` is the chapter the page was requested for;
    /// per-book pages ignore it.
    pub fn extract(&self, page: &str, book: &BookId, chapter: u32) -> ChapterParse {
        match self {
            Shape::PerChapter => per_chapter::extract(page, book, chapter),
            Shape::PerBook => per_book::extract(page, book),
        }
    }
}
