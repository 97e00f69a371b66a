// src/core/html.rs
// Thin helpers over `scraper` shared by the page specs.

use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;

/// Compile a CSS selector known at compile time.
/// Only fed literals from the extractors, so a failure is a programming error.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("bad selector {css:?}: {e:?}"))
}

/// All text beneath `el`, except text inside `skip` (and its descendants).
/// Returned raw; callers normalize.
pub fn text_without(el: ElementRef<'_>, skip: Option<ElementRef<'_>>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        let Some(text) = node.value().as_text() else { continue };
        if let Some(skip) = skip {
            if node.ancestors().any(|a| a.id() == skip.id()) {
                continue;
            }
        }
        out.push_str(text);
    }
    out
}

/// Whitespace-normalized text content of `el`.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// True when `el`'s class attribute contains any of `needles` (case-insensitive substring).
pub fn class_contains(el: ElementRef<'_>, needles: &[&str]) -> bool {
    el.value()
        .attr("class")
        .map(|c| {
            let lc = c.to_ascii_lowercase();
            needles.iter().any(|n| lc.contains(n))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn text_without_skips_label_subtree() {
        let doc = Html::parse_fragment(r#"<a><span class="v"><b>7</b></span> And <i>he</i> said</a>"#);
        let a = doc.select(&selector("a")).next().unwrap();
        let label = a.select(&selector("span.v")).next();
        assert_eq!(normalize_ws(&text_without(a, label)), "And he said");
        assert_eq!(normalize_ws(&text_without(a, None)), "7 And he said");
    }

    #[test]
    fn class_contains_is_case_insensitive() {
        let doc = Html::parse_fragment(r#"<b class="Verse NonCanon">3</b><b>4</b>"#);
        let b = selector("b");
        let mut bs = doc.select(&b);
        assert!(class_contains(bs.next().unwrap(), &["noncanon"]));
        assert!(!class_contains(bs.next().unwrap(), &["noncanon"]));
    }

    #[test]
    fn text_of_normalizes() {
        let doc = Html::parse_fragment("<h3> Book\n 1.2 </h3>");
        let h = doc.select(&selector("h3")).next().unwrap();
        assert_eq!(text_of(h), "Book 1.2");
    }
}
