// src/scrape/collect.rs
use std::sync::Arc;

use tokio::sync::mpsc;

use super::book::assemble_book;
use crate::{
    canon::Canon,
    config::options::ScrapeOptions,
    core::net::Fetcher,
    model::{Book, BookId},
    progress::Progress,
};

/// Result of one book task. `book` is always present; after a failure it is empty.
#[derive(Debug)]
pub struct BookOutcome {
    pub book: Book,
    pub failure: Option<String>,
}

impl BookOutcome {
    fn failed(id: BookId, reason: String) -> Self {
        Self { book: Book::new(id), failure: Some(reason) }
    }
}

/// Assemble every canon book concurrently, one task per book.
///
/// Outcomes come back in **completion order**; ordering by canon is the
/// document assembler's job. A failing (or panicking) book never cancels
/// its siblings: it comes back as an empty book with a failure reason.
pub async fn collect_books(
    fetcher: Arc<dyn Fetcher>,
    canon: &Canon,
    scrape: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<BookOutcome> {
    let total = canon.len();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<(usize, BookOutcome)>();

    for (idx, id) in canon.books().iter().cloned().enumerate() {
        let tx = tx.clone();
        let fetcher = Arc::clone(&fetcher);
        let source = scrape.source.clone();
        let delay = scrape.chapter_delay;
        let max_chapters = scrape.max_chapters;

        tokio::spawn(async move {
            logf!("Scraping {} ({})", id.name, id.osis);
            let result = assemble_book(fetcher.as_ref(), &id, &source, delay, max_chapters).await;
            let outcome = match result {
                Ok(book) => BookOutcome { book, failure: None },
                Err(e) => {
                    loge!("{}: {}", id.osis, e);
                    BookOutcome::failed(id, e.to_string())
                }
            };
            let _ = tx.send((idx, outcome));
        });
    }
    drop(tx); // we are the sole receiver now

    let mut arrived = vec![false; total];
    let mut outcomes = Vec::with_capacity(total);

    while let Some((idx, outcome)) = rx.recv().await {
        arrived[idx] = true;
        if let Some(p) = progress.as_deref_mut() {
            match &outcome.failure {
                None => p.item_done(&outcome.book.id, outcome.book.chapters().len()),
                Some(reason) => p.item_failed(&outcome.book.id, reason),
            }
        }
        outcomes.push(outcome);
    }

    // A task that panicked dropped its sender without reporting.
    for (idx, id) in canon.books().iter().enumerate() {
        if !arrived[idx] {
            let reason = s!("book task aborted");
            loge!("{}: {}", id.osis, reason);
            if let Some(p) = progress.as_deref_mut() {
                p.item_failed(id, &reason);
            }
            outcomes.push(BookOutcome::failed(id.clone(), reason));
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    outcomes
}
