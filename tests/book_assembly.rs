// tests/book_assembly.rs
mod helpers;

use std::time::Duration;

use apocrypha_scrape::model::BookId;
use apocrypha_scrape::scrape::assemble_book;
use helpers::*;

fn tobit() -> BookId {
    BookId::new("Tob", "Tobit")
}

#[tokio::test]
async fn redirect_after_two_chapters_ends_the_book() {
    let fetcher = ScriptedFetcher::new()
        .page(&chapter_url("Tob", 1), chapter_page(&[("1", "The book of the words of Tobit"), ("2", "Who in the time")]))
        .page(&chapter_url("Tob", 2), chapter_page(&[("1", "Now when I was come home")]))
        // past the end the site bounces to its landing page, which has verses of its own
        .redirect(&chapter_url("Tob", 3), BASE, chapter_page(&[("1", "landing")]));

    let book = assemble_book(&fetcher, &tobit(), &per_chapter_source(), Duration::ZERO, 200)
        .await
        .unwrap();

    let ids: Vec<_> = book.chapters().iter().map(|c| c.osis_id.as_str()).collect();
    assert_eq!(ids, vec!["Tob.1", "Tob.2"]);
    assert_eq!(book.verse_count(), 3);
    assert_eq!(fetcher.requests().len(), 3);
}

#[tokio::test]
async fn missing_page_ends_the_book() {
    // chapter 2 is unscripted: 404
    let fetcher = ScriptedFetcher::new().page(&chapter_url("Tob", 1), chapter_page(&[("1", "only")]));
    let book = assemble_book(&fetcher, &tobit(), &per_chapter_source(), Duration::ZERO, 200)
        .await
        .unwrap();
    assert_eq!(book.chapters().len(), 1);
}

#[tokio::test]
async fn first_fetch_terminating_gives_empty_book() {
    let fetcher = ScriptedFetcher::new().page(&chapter_url("Tob", 1), "<html><body>nothing here</body></html>");
    let book = assemble_book(&fetcher, &tobit(), &per_chapter_source(), Duration::ZERO, 200)
        .await
        .unwrap();
    assert!(book.is_empty());
    assert_eq!(book.id, tobit());
}

#[tokio::test]
async fn non_numeric_label_is_skipped_rest_kept() {
    let fetcher = ScriptedFetcher::new().page(
        &chapter_url("Tob", 1),
        chapter_page(&[("1", "first"), ("a", "stray"), ("2", "second")]),
    );
    let book = assemble_book(&fetcher, &tobit(), &per_chapter_source(), Duration::ZERO, 200)
        .await
        .unwrap();
    let texts: Vec<_> = book.chapters()[0].verses().iter().map(|v| v.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn chapter_cap_stops_runaway_discovery() {
    let mut fetcher = ScriptedFetcher::new();
    for n in 1..=5 {
        fetcher = fetcher.page(&chapter_url("Tob", n), chapter_page(&[("1", "again")]));
    }
    let book = assemble_book(&fetcher, &tobit(), &per_chapter_source(), Duration::ZERO, 3)
        .await
        .unwrap();
    assert_eq!(book.chapters().len(), 3);
    assert_eq!(fetcher.requests().len(), 3);
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    let fetcher = ScriptedFetcher::new()
        .page(&chapter_url("Tob", 1), chapter_page(&[("1", "first")]))
        .fail(&chapter_url("Tob", 2));
    let result = assemble_book(&fetcher, &tobit(), &per_chapter_source(), Duration::ZERO, 200).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn whole_book_page_is_fetched_once() {
    let esd = BookId::new("1Esd", "1 Esdras");
    let page = "<html><body><center><h3>THE FIRST BOOK OF ESDRAS</h3></center>\
                <h3>Book 1.</h3><p><b>1</b> text one <b>2</b> text two</p>\
                <h3>Book 1.2</h3><p><b>1</b> chapter two verse one</p></body></html>";
    let fetcher = ScriptedFetcher::new().page(&format!("{BASE}1esd.htm"), page);

    let book = assemble_book(&fetcher, &esd, &per_book_source(), Duration::ZERO, 200)
        .await
        .unwrap();

    assert_eq!(fetcher.requests(), vec![format!("{BASE}1esd.htm")]);
    assert_eq!(book.chapters().len(), 2);
    let first: Vec<_> = book.chapters()[0].verses().iter().map(|v| v.text.as_str()).collect();
    assert_eq!(first, vec!["text one", "text two"]);
    assert_eq!(book.chapters()[1].verses().len(), 1);
}

#[tokio::test]
async fn whole_book_gap_is_skipped() {
    let esd = BookId::new("1Esd", "1 Esdras");
    let page = "<h3>Book 1.</h3><b>1</b> one <h3>Book 1.3</h3><b>1</b> three";
    let fetcher = ScriptedFetcher::new().page(&format!("{BASE}1esd.htm"), page);
    let book = assemble_book(&fetcher, &esd, &per_book_source(), Duration::ZERO, 200)
        .await
        .unwrap();
    assert_eq!(book.chapters().len(), 1);
}

#[tokio::test]
async fn whole_book_missing_is_empty() {
    let esd = BookId::new("1Esd", "1 Esdras");
    let fetcher = ScriptedFetcher::new();
    let book = assemble_book(&fetcher, &esd, &per_book_source(), Duration::ZERO, 200)
        .await
        .unwrap();
    assert!(book.is_empty());
}

#[tokio::test]
async fn whole_book_front_matter_does_not_displace_chapter_one() {
    let esd = BookId::new("1Esd", "1 Esdras");
    let page = "<p><b>1</b> Esdras, introduction</p>\
                <h3>Book 1.</h3><b>1</b> real one <b>2</b> real two \
                <h3>Book 1.2</h3><b>1</b> two";
    let fetcher = ScriptedFetcher::new().page(&format!("{BASE}1esd.htm"), page);
    let book = assemble_book(&fetcher, &esd, &per_book_source(), Duration::ZERO, 200)
        .await
        .unwrap();

    let texts: Vec<Vec<&str>> = book
        .chapters()
        .iter()
        .map(|c| c.verses().iter().map(|v| v.text.as_str()).collect())
        .collect();
    assert_eq!(texts, vec![vec!["real one", "real two"], vec!["two"]]);
}
