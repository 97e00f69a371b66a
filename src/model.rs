// src/model.rs
//! The OSIS-shaped data model: Document → Book → Chapter → Verse.
//!
//! Every container owns its children outright. The push methods enforce the
//! ordering invariants, so a `Book` built through them always has chapters
//! `1..=n` and every chapter has strictly increasing, non-empty verses.

use crate::error::ModelError;

/// Canonical OSIS book identifier plus its display name, e.g. `1Esd` / `1 Esdras`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BookId {
    pub osis: String,
    pub name: String,
}

impl BookId {
    pub fn new(osis: impl Into<String>, name: impl Into<String>) -> Self {
        Self { osis: osis.into(), name: name.into() }
    }

    /// `1Esd.3`
    pub fn chapter_osis(&self, chapter: u32) -> String {
        format!("{}.{}", self.osis, chapter)
    }

    /// `1Esd.3.14`
    pub fn verse_osis(&self, chapter: u32, verse: u32) -> String {
        format!("{}.{}.{}", self.osis, chapter, verse)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verse {
    pub osis_id: String,
    pub number: u32,
    pub text: String,
    pub canonical: bool,
}

impl Verse {
    pub fn new(book: &BookId, chapter: u32, number: u32, text: impl Into<String>, canonical: bool) -> Self {
        Self {
            osis_id: book.verse_osis(chapter, number),
            number,
            text: text.into(),
            canonical,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chapter {
    pub osis_id: String,
    pub number: u32,
    verses: Vec<Verse>,
}

impl Chapter {
    pub fn new(book: &BookId, number: u32) -> Self {
        Self { osis_id: book.chapter_osis(number), number, verses: Vec::new() }
    }

    /// Build a chapter from already-extracted verses, dropping (and reporting)
    /// any that break the ordering.
    pub fn from_verses(book: &BookId, number: u32, verses: Vec<Verse>) -> (Self, Vec<ModelError>) {
        let mut chapter = Self::new(book, number);
        let mut rejected = Vec::new();
        for verse in verses {
            if let Err(e) = chapter.push_verse(verse) {
                rejected.push(e);
            }
        }
        (chapter, rejected)
    }

    pub fn push_verse(&mut self, verse: Verse) -> Result<(), ModelError> {
        if let Some(last) = self.verses.last() {
            if verse.number <= last.number {
                return Err(ModelError::VerseOutOfOrder {
                    chapter: self.osis_id.clone(),
                    last: last.number,
                    found: verse.number,
                });
            }
        }
        self.verses.push(verse);
        Ok(())
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    chapters: Vec<Chapter>,
}

impl Book {
    pub fn new(id: BookId) -> Self {
        Self { id, chapters: Vec::new() }
    }

    /// Number the next chapter must carry.
    pub fn next_chapter(&self) -> u32 {
        self.chapters.len() as u32 + 1
    }

    /// Append a chapter. It must be non-empty and numbered `next_chapter()`.
    pub fn push_chapter(&mut self, chapter: Chapter) -> Result<(), ModelError> {
        if chapter.is_empty() {
            return Err(ModelError::EmptyChapter(chapter.osis_id));
        }
        let expected = self.next_chapter();
        if chapter.number != expected {
            return Err(ModelError::ChapterOutOfSequence {
                book: self.id.osis.clone(),
                expected,
                found: chapter.number,
            });
        }
        self.chapters.push(chapter);
        Ok(())
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.iter().map(|c| c.verses.len()).sum()
    }
}

/// How much metadata goes into the OSIS `<header>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderDetail {
    /// Work title, type and a revision entry with timestamp + provenance.
    #[default]
    Full,
    /// Only the `<work>` element carrying the work identifier.
    Minimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub work_id: String,
    pub work_name: String,
    pub provenance: String,
    /// `YYYY.MM.DDTHH:MM:SS`
    pub timestamp: String,
    pub lang: String,
    pub detail: HeaderDetail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub header: Header,
    pub books: Vec<Book>,
}

impl Document {
    pub fn verse_count(&self) -> usize {
        self.books.iter().map(Book::verse_count).sum()
    }
}
