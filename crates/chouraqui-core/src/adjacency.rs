//! Previous/next verse targets across chapter and book boundaries.
//!
//! The resolver never touches the data source. Everything it needs about the
//! neighbouring chapter and books is precomputed by the page loader.

use crate::model::{BookNumber, VerseRef};

/// Last chapter and last verse of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEnd {
    pub book: BookNumber,
    pub last_chapter: u32,
    pub last_verse: u32,
}

/// Inputs for one position. Built once per page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseAdjacency {
    pub position: VerseRef,
    pub max_verse_in_chapter: u32,
    pub max_chapter_in_book: u32,
    /// Last verse of `position.chapter - 1`; only meaningful when chapter > 1.
    pub prev_chapter_last_verse: Option<u32>,
    pub prev_book: Option<BookEnd>,
    pub next_book: Option<BookNumber>,
}

impl VerseAdjacency {
    pub fn previous(&self) -> Option<VerseRef> {
        let VerseRef {
            book,
            chapter,
            verse,
        } = self.position;
        if verse > 1 {
            return Some(VerseRef::new(book, chapter, verse - 1));
        }
        if chapter > 1 {
            return self
                .prev_chapter_last_verse
                .map(|last| VerseRef::new(book, chapter - 1, last));
        }
        self.prev_book
            .map(|end| VerseRef::new(end.book, end.last_chapter, end.last_verse))
    }

    pub fn next(&self) -> Option<VerseRef> {
        let VerseRef {
            book,
            chapter,
            verse,
        } = self.position;
        if verse < self.max_verse_in_chapter {
            return Some(VerseRef::new(book, chapter, verse + 1));
        }
        if chapter < self.max_chapter_in_book {
            return Some(VerseRef::new(book, chapter + 1, 1));
        }
        self.next_book.map(|next| VerseRef::new(next, 1, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tiny corpus: book number -> verse count per chapter.
    fn corpus() -> Vec<(BookNumber, Vec<u32>)> {
        vec![(10, vec![3, 2]), (20, vec![1]), (40, vec![2, 1, 4])]
    }

    fn adjacency_for(corpus: &[(BookNumber, Vec<u32>)], position: VerseRef) -> VerseAdjacency {
        let idx = corpus
            .iter()
            .position(|(book, _)| *book == position.book)
            .expect("book in corpus");
        let chapters = &corpus[idx].1;
        let prev_book = idx.checked_sub(1).map(|prev| {
            let (book, chapters) = &corpus[prev];
            BookEnd {
                book: *book,
                last_chapter: chapters.len() as u32,
                last_verse: *chapters.last().expect("non-empty book"),
            }
        });
        VerseAdjacency {
            position,
            max_verse_in_chapter: chapters[position.chapter as usize - 1],
            max_chapter_in_book: chapters.len() as u32,
            prev_chapter_last_verse: position
                .chapter
                .checked_sub(2)
                .map(|c| chapters[c as usize]),
            prev_book,
            next_book: corpus.get(idx + 1).map(|(book, _)| *book),
        }
    }

    fn all_positions(corpus: &[(BookNumber, Vec<u32>)]) -> Vec<VerseRef> {
        let mut out = Vec::new();
        for (book, chapters) in corpus {
            for (c, count) in chapters.iter().enumerate() {
                for v in 1..=*count {
                    out.push(VerseRef::new(*book, c as u32 + 1, v));
                }
            }
        }
        out
    }

    #[test]
    fn previous_walks_back_across_chapters_and_books() {
        let corpus = corpus();
        let at = |b, c, v| adjacency_for(&corpus, VerseRef::new(b, c, v));
        assert_eq!(at(10, 1, 3).previous(), Some(VerseRef::new(10, 1, 2)));
        assert_eq!(at(10, 2, 1).previous(), Some(VerseRef::new(10, 1, 3)));
        assert_eq!(at(20, 1, 1).previous(), Some(VerseRef::new(10, 2, 2)));
    }

    #[test]
    fn next_walks_forward_across_chapters_and_books() {
        let corpus = corpus();
        let at = |b, c, v| adjacency_for(&corpus, VerseRef::new(b, c, v));
        assert_eq!(at(10, 1, 1).next(), Some(VerseRef::new(10, 1, 2)));
        assert_eq!(at(10, 1, 3).next(), Some(VerseRef::new(10, 2, 1)));
        assert_eq!(at(10, 2, 2).next(), Some(VerseRef::new(20, 1, 1)));
        assert_eq!(at(20, 1, 1).next(), Some(VerseRef::new(40, 1, 1)));
    }

    #[test]
    fn first_verse_of_corpus_has_no_previous() {
        let corpus = corpus();
        assert_eq!(adjacency_for(&corpus, VerseRef::new(10, 1, 1)).previous(), None);
    }

    #[test]
    fn last_verse_of_corpus_has_no_next() {
        let corpus = corpus();
        assert_eq!(adjacency_for(&corpus, VerseRef::new(40, 3, 4)).next(), None);
    }

    #[test]
    fn next_then_previous_round_trips_everywhere_but_the_end() {
        let corpus = corpus();
        let positions = all_positions(&corpus);
        for (idx, position) in positions.iter().enumerate() {
            let next = adjacency_for(&corpus, *position).next();
            match positions.get(idx + 1) {
                Some(expected) => {
                    assert_eq!(next, Some(*expected), "next of {position}");
                    let back = adjacency_for(&corpus, *expected).previous();
                    assert_eq!(back, Some(*position), "previous of {expected}");
                }
                None => assert_eq!(next, None),
            }
        }
    }

    #[test]
    fn missing_previous_chapter_input_yields_none() {
        let adjacency = VerseAdjacency {
            position: VerseRef::new(10, 2, 1),
            max_verse_in_chapter: 5,
            max_chapter_in_book: 3,
            prev_chapter_last_verse: None,
            prev_book: None,
            next_book: None,
        };
        assert_eq!(adjacency.previous(), None);
    }
}
