// src/cli.rs
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;

use crate::canon::Canon;
use crate::config::options::{AppOptions, BookSelector, Source};
use crate::core::net::HttpFetcher;
use crate::document::EmptyBooks;
use crate::model::{BookId, HeaderDetail};
use crate::progress::Progress;

/// Scrape the KJV Apocrypha and write it out as OSIS XML.
#[derive(Debug, Parser)]
#[command(name = "apocrypha_scrape")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Site layout preset
    #[arg(long, value_enum, default_value_t = SourceKind::Kjv)]
    pub source: SourceKind,

    /// Override the preset's base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the preset's page template ({name}, {id}, {id_lower}, {chapter})
    #[arg(long)]
    pub page_template: Option<String>,

    /// Only these books (OSIS ids or names), comma separated
    #[arg(long, value_delimiter = ',')]
    pub books: Vec<String>,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// File name of the full-canon document
    #[arg(long)]
    pub aggregate: Option<String>,

    /// Skip the one-file-per-book output
    #[arg(long)]
    pub no_per_book: bool,

    /// Pause between chapter requests of one book, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// OSIS header detail
    #[arg(long, value_enum, default_value_t = HeaderKind::Full)]
    pub header: HeaderKind,

    /// Leave books with no chapters out of the output
    #[arg(long)]
    pub drop_empty: bool,

    /// Print the canon and exit
    #[arg(long)]
    pub list_books: bool,

    /// Append log lines to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging for this crate
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// kingjamesbibleonline.org, one page per chapter
    Kjv,
    /// sacred-texts.com, one page per book
    SacredTexts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeaderKind {
    Full,
    Minimal,
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();

        let mut source = match self.source {
            SourceKind::Kjv => Source::kjv_online(),
            SourceKind::SacredTexts => Source::sacred_texts(),
        };
        if let Some(base) = &self.base_url {
            source.base_url = base.clone();
        }
        if let Some(template) = &self.page_template {
            source.page_template = template.clone();
        }
        opts.scrape.source = source;

        if !self.books.is_empty() {
            opts.scrape.books = BookSelector::Some(self.books.clone());
        }
        if let Some(ms) = self.delay_ms {
            opts.scrape.chapter_delay = Duration::from_millis(ms);
        }

        if let Some(out) = &self.out {
            opts.export.out_dir = out.clone();
        }
        if let Some(name) = &self.aggregate {
            opts.export.aggregate_file = name.clone();
        }
        opts.export.per_book = !self.no_per_book;
        opts.export.header = match self.header {
            HeaderKind::Full => HeaderDetail::Full,
            HeaderKind::Minimal => HeaderDetail::Minimal,
        };
        if self.drop_empty {
            opts.export.empty_books = EmptyBooks::Drop;
        }
        opts
    }
}

/// Prints one line per finished book to stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl ConsoleProgress {
    fn tick(&mut self) -> String {
        self.done += 1;
        format!("[{}/{}]", self.done, self.total)
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Scraping {total} books...");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, book: &BookId, chapters: usize) {
        let tick = self.tick();
        eprintln!("{tick} {} ({chapters} chapters)", book.name);
    }

    fn item_failed(&mut self, book: &BookId, reason: &str) {
        let tick = self.tick();
        eprintln!("{tick} {} FAILED: {reason}", book.name);
    }
}

pub async fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose, args.log_file.as_deref()).wrap_err("cannot open log file")?;

    if args.list_books {
        for book in Canon::kjv_apocrypha().books() {
            println!("{},{}", book.osis, book.name);
        }
        return Ok(());
    }

    let options = args.to_options();
    let fetcher = Arc::new(HttpFetcher::new().wrap_err("cannot build HTTP client")?);
    let mut progress = ConsoleProgress::default();

    let summary = crate::runner::run(&options, fetcher, Some(&mut progress as &mut dyn Progress)).await?;
    print!("{}", summary.render());
    Ok(())
}
