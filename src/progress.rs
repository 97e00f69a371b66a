// src/progress.rs
use crate::model::BookId;

/// Lightweight progress reporting for a scrape run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of books.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A book finished assembling (possibly with zero chapters).
    fn item_done(&mut self, _book: &BookId, _chapters: usize) {}

    /// A book was abandoned after a transport failure.
    fn item_failed(&mut self, _book: &BookId, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
