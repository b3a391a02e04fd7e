//! Synchronous page-level loading on top of the data source.
//!
//! Builds everything a reading context needs up front: the resolved entry
//! position, the seed chapter and the adjacency inputs. The read API reuses
//! the per-chapter builder.

use crate::data_source::VerseDataSource;
use anyhow::{Context, Result};
use chouraqui_core::adjacency::{BookEnd, VerseAdjacency};
use chouraqui_core::crossref::{BookGroup, group_for_book};
use chouraqui_core::links::{CorpusIndex, EntryParams, resolve_entry};
use chouraqui_core::model::{Book, BookNumber, ChapterData, VerseRef};
use chouraqui_core::wire::{BookSummary, ChapterResponse};
use tracing::{debug, warn};

/// Books that have verses, with their chapter counts.
pub struct CorpusView<'a> {
    source: &'a VerseDataSource,
    books: Vec<(Book, u32)>,
}

impl<'a> CorpusView<'a> {
    pub fn load(source: &'a VerseDataSource) -> Result<Self> {
        let mut books = Vec::new();
        for book in source.books()? {
            match source.max_chapter(book.book_number)? {
                Some(max_chapter) => books.push((book, max_chapter)),
                None => debug!(book = book.book_number, "Skipping book without verses"),
            }
        }
        Ok(Self { source, books })
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().map(|(book, _)| book)
    }

    fn position_of(&self, book: BookNumber) -> Option<usize> {
        self.books.iter().position(|(b, _)| b.book_number == book)
    }

    fn book_end(&self, idx: usize) -> Result<Option<BookEnd>> {
        let Some((book, last_chapter)) = self.books.get(idx) else {
            return Ok(None);
        };
        let last_verse = self
            .source
            .last_verse(book.book_number, *last_chapter)?
            .unwrap_or(1);
        Ok(Some(BookEnd {
            book: book.book_number,
            last_chapter: *last_chapter,
            last_verse,
        }))
    }
}

impl CorpusView<'_> {
    fn adjacency(
        &self,
        idx: usize,
        position: VerseRef,
        max_verse_in_chapter: u32,
        max_chapter_in_book: u32,
    ) -> Result<VerseAdjacency> {
        let prev_chapter_last_verse = match position.chapter {
            1 => None,
            chapter => self.source.last_verse(position.book, chapter - 1)?,
        };
        let prev_book = match idx.checked_sub(1) {
            Some(prev) => self.book_end(prev)?,
            None => None,
        };
        let next_book = self.books.get(idx + 1).map(|(b, _)| b.book_number);
        Ok(VerseAdjacency {
            position,
            max_verse_in_chapter,
            max_chapter_in_book,
            prev_chapter_last_verse,
            prev_book,
            next_book,
        })
    }
}

impl CorpusIndex for CorpusView<'_> {
    fn book_numbers(&self) -> Vec<BookNumber> {
        self.books.iter().map(|(book, _)| book.book_number).collect()
    }

    fn max_chapter(&self, book: BookNumber) -> Option<u32> {
        self.books
            .iter()
            .find(|(b, _)| b.book_number == book)
            .map(|(_, max)| *max)
    }

    fn last_verse(&self, book: BookNumber, chapter: u32) -> Option<u32> {
        self.source
            .last_verse(book, chapter)
            .unwrap_or_else(|err| {
                warn!(book, chapter, "Could not read last verse: {err:#}");
                None
            })
    }
}

/// Everything a reading page needs for its initial render.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub group: &'static BookGroup,
    pub book: Book,
    pub position: VerseRef,
    pub max_chapter: u32,
    pub seed: ChapterData,
    pub adjacency: VerseAdjacency,
    pub books: Vec<Book>,
}

/// Resolve entry parameters and load the seed chapter. `None` only when the
/// corpus holds no verses at all.
pub fn load_page_context(
    source: &VerseDataSource,
    params: &EntryParams,
) -> Result<Option<PageContext>> {
    let corpus = CorpusView::load(source)?;
    let Some(entry) = resolve_entry(params, &corpus) else {
        warn!("Corpus has no books with verses");
        return Ok(None);
    };
    let position = entry.position;
    let idx = corpus
        .position_of(position.book)
        .context("Resolved book missing from corpus")?;
    let (book, max_chapter) = corpus.books[idx].clone();

    let seed = ChapterData::new(
        position.chapter,
        source.verses(position.book, position.chapter)?,
        source.secondary_verses(position.book, position.chapter)?,
    );

    let adjacency = corpus.adjacency(idx, position, seed.max_verse(), max_chapter)?;

    debug!(
        %position,
        group = entry.group.key,
        max_chapter,
        verses = seed.primary_verses.len(),
        hebrew = seed.secondary_verses.len(),
        "Built page context"
    );

    Ok(Some(PageContext {
        group: entry.group,
        book,
        position,
        max_chapter,
        seed,
        adjacency,
        books: corpus.books().cloned().collect(),
    }))
}

/// Adjacency inputs for an arbitrary position, e.g. a verse picked inside an
/// already loaded chapter.
pub fn resolve_adjacency(source: &VerseDataSource, position: VerseRef) -> Result<VerseAdjacency> {
    let corpus = CorpusView::load(source)?;
    let idx = corpus
        .position_of(position.book)
        .with_context(|| format!("Book {} has no verses", position.book))?;
    let max_chapter = corpus.books[idx].1;
    let max_verse = source
        .last_verse(position.book, position.chapter)?
        .with_context(|| format!("Chapter {} {} has no verses", position.book, position.chapter))?;
    corpus.adjacency(idx, position, max_verse, max_chapter)
}

/// Body of one read API call. A chapter past the end yields no verses and
/// `has_next_chapter == false`.
pub fn chapter_response(
    source: &VerseDataSource,
    book: BookNumber,
    chapter: u32,
) -> Result<ChapterResponse> {
    let max_chapter = source.max_chapter(book)?;
    Ok(ChapterResponse {
        book: source.book(book)?,
        chapter,
        verses: source.verses(book, chapter)?,
        hebrew_verses: source.secondary_verses(book, chapter)?,
        has_hebrew: source.has_secondary_text(book),
        max_chapter,
        has_next_chapter: max_chapter.is_some_and(|max| chapter < max),
    })
}

pub fn book_summaries(source: &VerseDataSource) -> Result<Vec<BookSummary>> {
    source
        .books()?
        .into_iter()
        .map(|book| {
            let max_chapter = source.max_chapter(book.book_number)?;
            Ok(BookSummary {
                group: group_for_book(book.book_number).key.to_string(),
                max_chapter,
                book,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::test_support::fixture_source;

    fn params(book: &str, chapter: &str, verse: &str) -> EntryParams {
        EntryParams {
            group: None,
            book: Some(book.to_string()),
            chapter: Some(chapter.to_string()),
            verse: Some(verse.to_string()),
        }
    }

    #[test]
    fn context_for_the_first_verse_of_the_corpus() {
        let source = fixture_source("loader-first");
        let context = load_page_context(&source, &EntryParams::default())
            .expect("load")
            .expect("corpus not empty");
        assert_eq!(context.position, VerseRef::new(10, 1, 1));
        assert_eq!(context.max_chapter, 2);
        assert_eq!(context.seed.primary_verses.len(), 3);
        assert_eq!(context.seed.secondary_verses.len(), 3);
        assert_eq!(context.adjacency.previous(), None);
        assert_eq!(context.adjacency.next(), Some(VerseRef::new(10, 1, 2)));
    }

    #[test]
    fn adjacency_crosses_into_neighbouring_books() {
        let source = fixture_source("loader-cross");
        let context = load_page_context(&source, &params("20", "1", "1"))
            .expect("load")
            .expect("context");
        assert_eq!(context.adjacency.previous(), Some(VerseRef::new(10, 2, 2)));

        let context = load_page_context(&source, &params("20", "1", "2"))
            .expect("load")
            .expect("context");
        assert_eq!(context.adjacency.next(), Some(VerseRef::new(470, 1, 1)));
    }

    #[test]
    fn previous_chapter_last_verse_is_loaded() {
        let source = fixture_source("loader-prev");
        let context = load_page_context(&source, &params("10", "2", "1"))
            .expect("load")
            .expect("context");
        assert_eq!(context.adjacency.previous(), Some(VerseRef::new(10, 1, 3)));
    }

    #[test]
    fn last_verse_of_the_corpus_has_no_next() {
        let source = fixture_source("loader-last");
        let context = load_page_context(&source, &params("470", "1", "1"))
            .expect("load")
            .expect("context");
        assert_eq!(context.adjacency.next(), None);
        assert!(context.seed.secondary_verses.is_empty());
        assert_eq!(context.group.key, "nouveau-testament");
    }

    #[test]
    fn adjacency_for_a_picked_verse() {
        let source = fixture_source("loader-picked");
        let adjacency = resolve_adjacency(&source, VerseRef::new(10, 1, 3)).expect("adjacency");
        assert_eq!(adjacency.max_verse_in_chapter, 3);
        assert_eq!(adjacency.next(), Some(VerseRef::new(10, 2, 1)));
        assert_eq!(adjacency.previous(), Some(VerseRef::new(10, 1, 2)));
        assert!(resolve_adjacency(&source, VerseRef::new(30, 1, 1)).is_err());
    }

    #[test]
    fn chapter_past_the_end_is_empty() {
        let source = fixture_source("loader-past-end");
        let response = chapter_response(&source, 10, 5).expect("response");
        assert!(response.verses.is_empty());
        assert!(!response.has_next_chapter);
        assert_eq!(response.max_chapter, Some(2));
    }

    #[test]
    fn summaries_carry_group_and_chapter_count() {
        let source = fixture_source("loader-summaries");
        let summaries = book_summaries(&source).expect("summaries");
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].group, "torah");
        assert_eq!(summaries[0].max_chapter, Some(2));
        assert_eq!(summaries[2].group, "nouveau-testament");
    }
}
