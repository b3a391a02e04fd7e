//! Corpus records shared by the data source, the read API and the reader.
//!
//! Field names serialize in camelCase so the JSON payloads line up with the
//! column aliases used by the read API.

use serde::{Deserialize, Serialize};

/// Primary-corpus book identifier. Numbers are sparse (10, 20, 30, ...) and
/// gaps are meaningful.
pub type BookNumber = u32;

/// Book metadata from the primary corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_number: BookNumber,
    pub short_name: String,
    pub long_name: String,
    #[serde(default)]
    pub book_color: String,
    /// Derived from the cross-reference table, never stored on the row.
    #[serde(default)]
    pub has_secondary_text: bool,
}

/// A French verse row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    pub book_number: BookNumber,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// A Hebrew verse row. `book` uses the secondary numbering scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryVerse {
    pub book: u32,
    pub chapter: u32,
    pub verse: u32,
    pub scripture: String,
}

/// One loaded chapter in the reader's window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterData {
    pub chapter: u32,
    pub primary_verses: Vec<Verse>,
    pub secondary_verses: Vec<SecondaryVerse>,
}

impl ChapterData {
    pub fn new(chapter: u32, primary_verses: Vec<Verse>, secondary_verses: Vec<SecondaryVerse>) -> Self {
        Self {
            chapter,
            primary_verses,
            secondary_verses,
        }
    }

    /// Highest verse number in the chapter, or 1 for an empty chapter.
    pub fn max_verse(&self) -> u32 {
        self.primary_verses
            .iter()
            .map(|verse| verse.verse)
            .max()
            .unwrap_or(1)
    }

    pub fn primary_verse(&self, verse: u32) -> Option<&Verse> {
        self.primary_verses.iter().find(|row| row.verse == verse)
    }

    /// Hebrew text aligned to a French verse number.
    pub fn secondary_text(&self, verse: u32) -> Option<&str> {
        self.secondary_verses
            .iter()
            .find(|row| row.verse == verse)
            .map(|row| row.scripture.as_str())
    }
}

/// A fully qualified verse position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseRef {
    pub book: BookNumber,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    pub fn new(book: BookNumber, chapter: u32, verse: u32) -> Self {
        Self {
            book,
            chapter,
            verse,
        }
    }
}

impl std::fmt::Display for VerseRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}
