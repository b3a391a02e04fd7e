//! Read-only access to the two corpora.
//!
//! The French store holds the `books` and `verses` tables; the Hebrew store a
//! single `bible` table numbered 1..=39. Each store sits behind one lazily
//! opened connection shared for the life of the process. "Not found" is
//! always an empty result; only storage failures are errors.

use anyhow::{Context, Result, anyhow};
use chouraqui_core::crossref::{has_secondary_text, secondary_book_number};
use chouraqui_core::model::{Book, BookNumber, SecondaryVerse, Verse};
use once_cell::sync::OnceCell;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// One SQLite file, opened on first use.
pub struct CorpusHandle {
    label: &'static str,
    path: PathBuf,
    conn: OnceCell<Mutex<Connection>>,
}

impl CorpusHandle {
    pub fn new(label: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            label,
            path: path.into(),
            conn: OnceCell::new(),
        }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        let conn = self.conn.get_or_try_init(|| {
            let conn = Connection::open_with_flags(
                &self.path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .with_context(|| {
                format!(
                    "Failed to open {} corpus at {}",
                    self.label,
                    self.path.display()
                )
            })?;
            info!(corpus = self.label, path = %self.path.display(), "Opened corpus");
            Ok::<_, anyhow::Error>(Mutex::new(conn))
        })?;
        conn.lock()
            .map_err(|_| anyhow!("{} corpus connection lock poisoned", self.label))
    }
}

pub struct VerseDataSource {
    primary: CorpusHandle,
    secondary: CorpusHandle,
}

impl VerseDataSource {
    pub fn new(primary: CorpusHandle, secondary: CorpusHandle) -> Self {
        Self { primary, secondary }
    }

    pub fn open(primary_path: impl Into<PathBuf>, secondary_path: impl Into<PathBuf>) -> Self {
        Self::new(
            CorpusHandle::new("primary", primary_path),
            CorpusHandle::new("secondary", secondary_path),
        )
    }

    pub fn books(&self) -> Result<Vec<Book>> {
        let conn = self.primary.connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT book_number, short_name, long_name, book_color
                 FROM books
                 ORDER BY book_number",
            )
            .context("Failed to prepare book list query")?;
        let rows = stmt
            .query_map([], book_from_row)
            .context("Failed to list books")?;
        let books = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read book rows")?;
        debug!(count = books.len(), "Loaded book list");
        Ok(books)
    }

    pub fn book(&self, number: BookNumber) -> Result<Option<Book>> {
        let conn = self.primary.connection()?;
        conn.query_row(
            "SELECT book_number, short_name, long_name, book_color
             FROM books
             WHERE book_number = ?1",
            params![number],
            book_from_row,
        )
        .optional()
        .with_context(|| format!("Failed to load book {number}"))
    }

    /// Highest chapter holding verses, `None` for a book without verses.
    pub fn max_chapter(&self, book: BookNumber) -> Result<Option<u32>> {
        let conn = self.primary.connection()?;
        conn.query_row(
            "SELECT MAX(chapter) FROM verses WHERE book_number = ?1",
            params![book],
            |row| row.get::<_, Option<u32>>(0),
        )
        .with_context(|| format!("Failed to read max chapter of book {book}"))
    }

    pub fn last_verse(&self, book: BookNumber, chapter: u32) -> Result<Option<u32>> {
        let conn = self.primary.connection()?;
        conn.query_row(
            "SELECT MAX(verse) FROM verses WHERE book_number = ?1 AND chapter = ?2",
            params![book, chapter],
            |row| row.get::<_, Option<u32>>(0),
        )
        .with_context(|| format!("Failed to read last verse of {book} {chapter}"))
    }

    pub fn verses(&self, book: BookNumber, chapter: u32) -> Result<Vec<Verse>> {
        let conn = self.primary.connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT book_number, chapter, verse, text
                 FROM verses
                 WHERE book_number = ?1 AND chapter = ?2
                 ORDER BY verse",
            )
            .context("Failed to prepare verse query")?;
        let rows = stmt
            .query_map(params![book, chapter], |row| {
                Ok(Verse {
                    book_number: row.get(0)?,
                    chapter: row.get(1)?,
                    verse: row.get(2)?,
                    text: row.get(3)?,
                })
            })
            .with_context(|| format!("Failed to query verses of {book} {chapter}"))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read verses of {book} {chapter}"))
    }

    /// Hebrew verses aligned to a French book. Empty, without touching the
    /// Hebrew store, when the book has no Hebrew edition.
    pub fn secondary_verses(&self, book: BookNumber, chapter: u32) -> Result<Vec<SecondaryVerse>> {
        let Some(secondary_book) = secondary_book_number(book) else {
            return Ok(Vec::new());
        };
        let conn = self.secondary.connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT book, chapter, verse, scripture
                 FROM bible
                 WHERE book = ?1 AND chapter = ?2
                 ORDER BY verse",
            )
            .context("Failed to prepare Hebrew verse query")?;
        let rows = stmt
            .query_map(params![secondary_book, chapter], secondary_from_row)
            .with_context(|| format!("Failed to query Hebrew verses of {book} {chapter}"))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read Hebrew verses of {book} {chapter}"))
    }

    pub fn has_secondary_text(&self, book: BookNumber) -> bool {
        has_secondary_text(book)
    }
}

fn book_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Book> {
    let book_number: BookNumber = row.get(0)?;
    Ok(Book {
        book_number,
        short_name: row.get(1)?,
        long_name: row.get(2)?,
        book_color: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        has_secondary_text: has_secondary_text(book_number),
    })
}

fn secondary_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SecondaryVerse> {
    Ok(SecondaryVerse {
        book: row.get(0)?,
        chapter: row.get(1)?,
        verse: row.get(2)?,
        scripture: row.get(3)?,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::VerseDataSource;
    use rusqlite::{Connection, params};
    use std::path::PathBuf;

    /// Book 10 has chapters of 3 and 2 verses, book 20 one chapter of 2,
    /// book 470 one chapter of 1 and no Hebrew edition.
    pub(crate) const FIXTURE_BOOKS: [(u32, &str, &str, &[u32]); 3] = [
        (10, "Ent", "Entête", &[3, 2]),
        (20, "Noms", "Noms", &[2]),
        (470, "Mt", "Matyah", &[1]),
    ];

    fn temp_path(name: &str, suffix: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "chouraqui-{}-{name}-{suffix}.sqlite",
            std::process::id()
        ))
    }

    /// Build both fixture stores under a per-process temp path.
    pub(crate) fn fixture_source(name: &str) -> VerseDataSource {
        let primary = temp_path(name, "fr");
        let secondary = temp_path(name, "he");
        let _ = std::fs::remove_file(&primary);
        let _ = std::fs::remove_file(&secondary);

        let conn = Connection::open(&primary).expect("create primary fixture");
        conn.execute_batch(
            "CREATE TABLE books (
                book_number INTEGER, short_name TEXT, long_name TEXT, book_color TEXT
             );
             CREATE TABLE verses (
                book_number INTEGER, chapter INTEGER, verse INTEGER, text TEXT
             );",
        )
        .expect("create primary tables");
        for (number, short, long, chapters) in FIXTURE_BOOKS {
            conn.execute(
                "INSERT INTO books VALUES (?1, ?2, ?3, '#ccccff')",
                params![number, short, long],
            )
            .expect("insert book");
            for (idx, count) in chapters.iter().enumerate() {
                for verse in 1..=*count {
                    conn.execute(
                        "INSERT INTO verses VALUES (?1, ?2, ?3, ?4)",
                        params![
                            number,
                            idx as u32 + 1,
                            verse,
                            format!("IHVH-Adonaï parle {number} {}:{verse}", idx + 1)
                        ],
                    )
                    .expect("insert verse");
                }
            }
        }

        let conn = Connection::open(&secondary).expect("create secondary fixture");
        conn.execute_batch(
            "CREATE TABLE bible (book INTEGER, chapter INTEGER, verse INTEGER, scripture TEXT);",
        )
        .expect("create secondary table");
        for (book, chapters) in [(1u32, [3u32, 2].as_slice()), (2, [2].as_slice())] {
            for (idx, count) in chapters.iter().enumerate() {
                for verse in 1..=*count {
                    conn.execute(
                        "INSERT INTO bible VALUES (?1, ?2, ?3, ?4)",
                        params![book, idx as u32 + 1, verse, format!("בראשית {verse}")],
                    )
                    .expect("insert Hebrew verse");
                }
            }
        }

        VerseDataSource::open(primary, secondary)
    }
}
