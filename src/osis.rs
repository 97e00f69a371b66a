// src/osis.rs
//! OSIS XML writer, plus a reader for the verse tuples we write.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{ExportError, OsisReadError};
use crate::model::{Book, Document, Header, HeaderDetail};

const OSIS_NS: &str = "http://www.bibletechnologies.net/2003/OSIS/namespace";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const OSIS_SCHEMA: &str = "http://www.bibletechnologies.net/2003/OSIS/namespace \
                           http://www.bibletechnologies.net/osisCore.2.1.1.xsd";

type XmlWriter = Writer<Vec<u8>>;
type XmlResult = Result<(), quick_xml::Error>;

/// Serialize a document to an indented, UTF-8 OSIS string.
pub fn to_xml(doc: &Document) -> Result<String, ExportError> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);

    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.write_event(Event::Start(BytesStart::new("osis").with_attributes([
        ("xmlns", OSIS_NS),
        ("xmlns:xsi", XSI_NS),
        ("xsi:schemaLocation", OSIS_SCHEMA),
    ])))?;
    w.write_event(Event::Start(BytesStart::new("osisText").with_attributes([
        ("osisIDWork", doc.header.work_id.as_str()),
        ("osisRefWork", "Bible"),
        ("xml:lang", doc.header.lang.as_str()),
    ])))?;

    write_header(&mut w, &doc.header)?;
    for book in &doc.books {
        write_book(&mut w, book)?;
    }

    w.write_event(Event::End(BytesEnd::new("osisText")))?;
    w.write_event(Event::End(BytesEnd::new("osis")))?;

    Ok(String::from_utf8(w.into_inner())?)
}

fn text_element(w: &mut XmlWriter, start: BytesStart<'_>, text: &str) -> XmlResult {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    w.write_event(Event::Start(start))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(name)))
}

fn write_header(w: &mut XmlWriter, h: &Header) -> XmlResult {
    w.write_event(Event::Start(BytesStart::new("header")))?;

    if h.detail == HeaderDetail::Full {
        w.write_event(Event::Start(BytesStart::new("revisionDesc")))?;
        text_element(
            w,
            BytesStart::new("date").with_attributes([("event", "eversion"), ("xml:lang", h.lang.as_str())]),
            &h.timestamp,
        )?;
        text_element(w, BytesStart::new("p"), &h.provenance)?;
        w.write_event(Event::End(BytesEnd::new("revisionDesc")))?;
    }

    let work = BytesStart::new("work").with_attributes([("osisWork", h.work_name.as_str())]);
    match h.detail {
        HeaderDetail::Full => {
            w.write_event(Event::Start(work))?;
            text_element(w, BytesStart::new("title"), &h.title)?;
            text_element(w, BytesStart::new("type").with_attributes([("type", "OSIS")]), "Bible")?;
            w.write_event(Event::End(BytesEnd::new("work")))?;
        }
        HeaderDetail::Minimal => w.write_event(Event::Empty(work))?,
    }

    w.write_event(Event::End(BytesEnd::new("header")))
}

fn write_book(w: &mut XmlWriter, book: &Book) -> XmlResult {
    w.write_event(Event::Start(
        BytesStart::new("div").with_attributes([("type", "book"), ("osisID", book.id.osis.as_str())]),
    ))?;
    text_element(w, BytesStart::new("head"), &book.id.name)?;

    for chapter in book.chapters() {
        w.write_event(Event::Start(
            BytesStart::new("chapter").with_attributes([("osisID", chapter.osis_id.as_str())]),
        ))?;
        for verse in chapter.verses() {
            let canonical = if verse.canonical { "true" } else { "false" };
            text_element(
                w,
                BytesStart::new("verse")
                    .with_attributes([("osisID", verse.osis_id.as_str()), ("canonical", canonical)]),
                &verse.text,
            )?;
        }
        w.write_event(Event::End(BytesEnd::new("chapter")))?;
    }

    w.write_event(Event::End(BytesEnd::new("div")))
}

/// One verse as read back from OSIS XML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerseRecord {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    pub canonical: bool,
}

/// Read every `<verse>` of an OSIS document, in document order.
/// A missing `canonical` attribute means canonical.
pub fn read_verses(xml: &str) -> Result<Vec<VerseRecord>, OsisReadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut out = Vec::new();
    let mut open: Option<VerseRecord> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"verse" => {
                open = Some(verse_from_attrs(&e)?);
            }
            Event::Empty(e) if e.name().as_ref() == b"verse" => {
                out.push(verse_from_attrs(&e)?);
            }
            Event::Text(t) => {
                if let Some(v) = open.as_mut() {
                    v.text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) if e.name().as_ref() == b"verse" => {
                if let Some(v) = open.take() {
                    out.push(v);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out)
}

fn verse_from_attrs(e: &BytesStart<'_>) -> Result<VerseRecord, OsisReadError> {
    let id = e
        .try_get_attribute("osisID")?
        .ok_or(OsisReadError::MissingVerseId)?
        .unescape_value()?
        .into_owned();
    let canonical = match e.try_get_attribute("canonical")? {
        Some(a) => a.unescape_value()? != "false",
        None => true,
    };

    let bad_id = || OsisReadError::BadVerseId(id.clone());
    let mut parts = id.rsplitn(3, '.');
    let verse = parts.next().and_then(|v| v.parse().ok()).ok_or_else(bad_id)?;
    let chapter = parts.next().and_then(|c| c.parse().ok()).ok_or_else(bad_id)?;
    let book = parts.next().filter(|b| !b.is_empty()).ok_or_else(bad_id)?;

    Ok(VerseRecord { book: s!(book), chapter, verse, text: s!(), canonical })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookId, Chapter, Verse};

    fn header(detail: HeaderDetail) -> Header {
        Header {
            title: s!("King James Version--Apocrypha"),
            work_id: s!("kjv-apocrypha"),
            work_name: s!("King James Version Apocrypha"),
            provenance: s!("Scraped from https://example.org/"),
            timestamp: s!("2024.01.02T03:04:05"),
            lang: s!("en"),
            detail,
        }
    }

    fn doc(detail: HeaderDetail) -> Document {
        let id = BookId::new("Sus", "Susanna");
        let mut book = Book::new(id.clone());
        let (ch, _) = Chapter::from_verses(
            &id,
            1,
            vec![
                Verse::new(&id, 1, 1, "There dwelt a man in Babylon, called Joacim:", true),
                Verse::new(&id, 1, 2, "Tom & Jerry <said> \"hi\"", false),
            ],
        );
        book.push_chapter(ch).unwrap();
        Document { header: header(detail), books: vec![book] }
    }

    #[test]
    fn full_header_layout() {
        let xml = to_xml(&doc(HeaderDetail::Full)).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<osisText osisIDWork="kjv-apocrypha" osisRefWork="Bible" xml:lang="en">"#));
        assert!(xml.contains(r#"<date event="eversion" xml:lang="en">2024.01.02T03:04:05</date>"#));
        assert!(xml.contains(r#"<work osisWork="King James Version Apocrypha">"#));
        assert!(xml.contains("<title>King James Version--Apocrypha</title>"));
        assert!(xml.contains(r#"<type type="OSIS">Bible</type>"#));
        assert!(xml.contains(r#"<div type="book" osisID="Sus">"#));
        assert!(xml.contains("<head>Susanna</head>"));
        assert!(xml.contains(r#"<chapter osisID="Sus.1">"#));
        assert!(xml.contains(
            r#"<verse osisID="Sus.1.1" canonical="true">There dwelt a man in Babylon, called Joacim:</verse>"#
        ));
    }

    #[test]
    fn minimal_header_has_only_work() {
        let xml = to_xml(&doc(HeaderDetail::Minimal)).unwrap();
        assert!(xml.contains(r#"<work osisWork="King James Version Apocrypha"/>"#));
        assert!(!xml.contains("revisionDesc"));
        assert!(!xml.contains("<title>"));
    }

    #[test]
    fn text_is_escaped_and_read_back() {
        let xml = to_xml(&doc(HeaderDetail::Full)).unwrap();
        assert!(xml.contains("Tom &amp; Jerry &lt;said&gt;"));

        let verses = read_verses(&xml).unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(
            verses[1],
            VerseRecord {
                book: s!("Sus"),
                chapter: 1,
                verse: 2,
                text: s!("Tom & Jerry <said> \"hi\""),
                canonical: false,
            }
        );
    }

    #[test]
    fn reader_rejects_bad_ids() {
        let xml = r#"<osis><verse osisID="Sus.x.1">a</verse></osis>"#;
        assert!(matches!(read_verses(xml), Err(OsisReadError::BadVerseId(_))));
        let xml = r#"<osis><verse>a</verse></osis>"#;
        assert!(matches!(read_verses(xml), Err(OsisReadError::MissingVerseId)));
    }

    #[test]
    fn book_ids_with_digits_parse() {
        let xml = r#"<osis><verse osisID="1Macc.16.24">x</verse><verse osisID="2Esd.3.1" canonical="true">y</verse></osis>"#;
        let v = read_verses(xml).unwrap();
        assert_eq!((v[0].book.as_str(), v[0].chapter, v[0].verse), ("1Macc", 16, 24));
        assert!(v[1].canonical);
    }
}
