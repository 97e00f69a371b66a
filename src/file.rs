// src/file.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::config::consts::XML_EXT;
use crate::config::options::ExportOptions;
use crate::core::sanitize::book_file_stem;
use crate::error::ExportError;
use crate::model::Document;
use crate::osis;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io { path: path.to_path_buf(), source }
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(io_err(dir))?;
    }
    Ok(())
}

/// Duplicate handling **only within this run**
pub fn resolve_book_filename(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<String, usize>,
) -> PathBuf {
    let count = seen_names.entry(s!(stem)).or_insert(0);

    // First occurrence: "<stem>.xml"
    // Subsequent:       "<stem> (N).xml" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{XML_EXT}")
    } else {
        format!("{stem} ({}).{XML_EXT}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}

/// Serialize `doc` and write it to `path`, creating the parent directory.
pub fn write_document(path: &Path, doc: &Document) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let xml = osis::to_xml(doc)?;
    fs::write(path, xml).map_err(io_err(path))
}

/// One file per single-book document, named after the book.
pub fn write_per_book(export: &ExportOptions, docs: &[Document]) -> Result<Vec<PathBuf>, ExportError> {
    ensure_directory(&export.out_dir)?;

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut written = Vec::with_capacity(docs.len());

    for doc in docs {
        let Some(book) = doc.books.first() else { continue };
        let stem = book_file_stem(&book.id.name, &book.id.osis);
        let path = resolve_book_filename(&export.out_dir, &stem, &mut seen);
        write_document(&path, doc)?;
        logd!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// The full-canon document, at `export.aggregate_path()`.
pub fn write_aggregate(export: &ExportOptions, doc: &Document) -> Result<PathBuf, ExportError> {
    ensure_directory(&export.out_dir)?;
    let path = export.aggregate_path();
    write_document(&path, doc)?;
    logd!("Wrote {}", path.display());
    Ok(path)
}
