// src/canon.rs

use crate::model::BookId;

/// The KJV Apocrypha in declaration order: (OSIS id, display name).
const KJV_APOCRYPHA: &[(&str, &str)] = &[
    ("1Esd", "1 Esdras"),
    ("2Esd", "2 Esdras"),
    ("Tob", "Tobit"),
    ("Jdt", "Judith"),
    ("AddEsth", "Additions to Esther"),
    ("Wis", "Wisdom of Solomon"),
    ("Sir", "Ecclesiasticus"),
    ("Bar", "Baruch"),
    ("EpJer", "Letter of Jeremiah"),
    ("PrAzar", "Prayer of Azariah"),
    ("Sus", "Susanna"),
    ("Bel", "Bel and the Dragon"),
    ("PrMan", "Prayer of Manasseh"),
    ("1Macc", "1 Maccabees"),
    ("2Macc", "2 Maccabees"),
];

/// Ordered list of books making up one output document.
/// The order here is the ordering contract for the assembled document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canon {
    books: Vec<BookId>,
}

impl Canon {
    pub fn new(books: Vec<BookId>) -> Self {
        Self { books }
    }

    pub fn kjv_apocrypha() -> Self {
        Self::new(KJV_APOCRYPHA.iter().map(|(id, name)| BookId::new(*id, *name)).collect())
    }

    pub fn books(&self) -> &[BookId] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn position(&self, osis: &str) -> Option<usize> {
        self.books.iter().position(|b| b.osis == osis)
    }

    /// Look up by OSIS id or display name, case-insensitive.
    pub fn find(&self, key: &str) -> Option<&BookId> {
        let key = key.trim();
        self.books
            .iter()
            .find(|b| b.osis.eq_ignore_ascii_case(key) || b.name.eq_ignore_ascii_case(key))
    }

    /// Subset of this canon, still in canon order.
    /// Returns the first key that matches nothing as the error.
    pub fn select<S: AsRef<str>>(&self, keys: &[S]) -> Result<Canon, String> {
        let mut wanted = Vec::with_capacity(keys.len());
        for key in keys {
            let book = self.find(key.as_ref()).ok_or_else(|| s!(key.as_ref()))?;
            wanted.push(book.osis.clone());
        }
        let books = self
            .books
            .iter()
            .filter(|b| wanted.contains(&b.osis))
            .cloned()
            .collect();
        Ok(Canon::new(books))
    }
}

impl Default for Canon {
    fn default() -> Self {
        Self::kjv_apocrypha()
    }
}
