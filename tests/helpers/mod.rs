// tests/helpers/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use apocrypha_scrape::config::options::{AppOptions, BookSelector, Source};
use apocrypha_scrape::core::net::{FetchResponse, Fetcher};
use apocrypha_scrape::error::TransportError;
use apocrypha_scrape::specs::Shape;
use async_trait::async_trait;
use tokio::time::Instant;

pub const BASE: &str = "http://scripted.test/";

enum Reply {
    Page { resp: FetchResponse, delay: Duration },
    Fail { status: u16 },
}

/// In-memory fetcher. Unscripted URLs answer 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, body: impl Into<String>) -> Self {
        self.page_after(url, body, Duration::ZERO)
    }

    pub fn page_after(mut self, url: &str, body: impl Into<String>, delay: Duration) -> Self {
        self.replies
            .insert(url.to_string(), Reply::Page { resp: FetchResponse::ok(url, body), delay });
        self
    }

    /// `url` lands on `target` with the given body.
    pub fn redirect(mut self, url: &str, target: &str, body: impl Into<String>) -> Self {
        self.replies.insert(
            url.to_string(),
            Reply::Page { resp: FetchResponse::ok(target, body), delay: Duration::ZERO },
        );
        self
    }

    /// Transport-level failure (5xx).
    pub fn fail(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), Reply::Fail { status: 503 });
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    /// When each request was made, on tokio's clock (virtual under a paused runtime).
    pub fn requests_at(&self) -> Vec<(String, Instant)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError> {
        self.requests.lock().unwrap().push((url.to_string(), Instant::now()));
        match self.replies.get(url) {
            Some(Reply::Page { resp, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(resp.clone())
            }
            Some(Reply::Fail { status }) => {
                Err(TransportError::ServerStatus { url: url.to_string(), status: *status })
            }
            None => Ok(FetchResponse { final_url: url.to_string(), status: 404, body: String::new() }),
        }
    }
}

pub fn per_chapter_source() -> Source {
    Source { shape: Shape::PerChapter, base_url: BASE.to_string(), page_template: "{id}/{chapter}".to_string() }
}

pub fn per_book_source() -> Source {
    Source { shape: Shape::PerBook, base_url: BASE.to_string(), page_template: "{id_lower}.htm".to_string() }
}

pub fn chapter_url(osis: &str, chapter: u32) -> String {
    format!("{BASE}{osis}/{chapter}")
}

/// A per-chapter page in the `#div a span.versehover` layout.
pub fn chapter_page(verses: &[(&str, &str)]) -> String {
    let anchors: String = verses
        .iter()
        .map(|(label, text)| format!(r##"<a href="#v"><span class="versehover">{label}</span> {text}</a>"##))
        .collect();
    format!(r#"<html><body><div id="nav"><a href="/">Home</a></div><div id="div">{anchors}</div></body></html>"#)
}

/// Options for a zero-delay run over `books` from `source`, writing to `out_dir`.
pub fn options(source: Source, books: &[&str], out_dir: &std::path::Path) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.scrape.source = source;
    opts.scrape.books = BookSelector::Some(books.iter().map(|b| b.to_string()).collect());
    opts.scrape.chapter_delay = Duration::ZERO;
    opts.export.out_dir = out_dir.to_path_buf();
    opts
}
