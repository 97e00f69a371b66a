// src/core/sanitize.rs

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove `[ ... ]` editorial markers sitting at either edge of `s`
/// (e.g. `[Page 12] And it came to pass [p. 13]` → `And it came to pass`).
/// Brackets inside the text are left alone. No nesting.
pub fn trim_bracket_markers(s: &str) -> &str {
    let mut t = s.trim();
    loop {
        let before = t.len();
        if t.starts_with('[') {
            if let Some(close) = t.find(']') {
                t = t[close + 1..].trim_start();
            }
        }
        if t.ends_with(']') {
            if let Some(open) = t.rfind('[') {
                t = t[..open].trim_end();
            }
        }
        if t.len() == before { return t; }
    }
}

/// Full verse-text cleanup: collapse whitespace, then drop edge markers.
pub fn clean_verse_text(raw: &str) -> String {
    let collapsed = normalize_ws(raw);
    s!(trim_bracket_markers(&collapsed))
}

/// Parse a marker label such as ` 12 ` or `12.` into a number.
pub fn parse_label(label: &str) -> Option<u32> {
    let t = label.trim().trim_end_matches(['.', ':']).trim();
    if t.is_empty() || !t.chars().all(|c| c.is_ascii_digit()) { return None; }
    t.parse().ok()
}

/// File stem for a book's own document: whitespace runs become `_`,
/// anything outside `[A-Za-z0-9_-]` is dropped (`"1 Esdras"` → `1_Esdras`).
pub fn book_file_stem(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' { out.push(ch); last_us = false; }
        else if ch.is_whitespace() || ch == '_' { if !last_us { out.push('_'); last_us = true; } }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_newlines() {
        assert_eq!(normalize_ws("  And\n\tit   came \r\n to pass "), "And it came to pass");
    }

    #[test]
    fn bracket_markers_trimmed_only_at_edges() {
        assert_eq!(trim_bracket_markers("[Page 12] text [p. 13]"), "text");
        assert_eq!(trim_bracket_markers("[a] [b] text"), "text");
        assert_eq!(trim_bracket_markers("the [great] king"), "the [great] king");
        assert_eq!(trim_bracket_markers("[only]"), "");
        assert_eq!(trim_bracket_markers("unclosed ["), "unclosed [");
    }

    #[test]
    fn clean_verse_text_combines_both() {
        assert_eq!(clean_verse_text("\n [12]  And Josias\n held the feast "), "And Josias held the feast");
    }

    #[test]
    fn labels() {
        assert_eq!(parse_label(" 12 "), Some(12));
        assert_eq!(parse_label("3."), Some(3));
        assert_eq!(parse_label("iv"), None);
        assert_eq!(parse_label(""), None);
        assert_eq!(parse_label("1a"), None);
    }

    #[test]
    fn file_stems() {
        assert_eq!(book_file_stem("1 Esdras", "1Esd"), "1_Esdras");
        assert_eq!(book_file_stem("Bel and the Dragon", "Bel"), "Bel_and_the_Dragon");
        assert_eq!(book_file_stem("  ??  ", "Bel"), "Bel");
    }
}
