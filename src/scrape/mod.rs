// src/scrape/mod.rs
mod book;
mod collect;

pub use book::{assemble_book, evaluate_step, Step, StopReason};
pub use collect::{collect_books, BookOutcome};
