//! Reading-page entry parameters, verse anchors and deep links.

use crate::crossref::{BookGroup, group_by_key, group_for_book};
use crate::model::{BookNumber, VerseRef};
use serde::Deserialize;

pub const ANCHOR_PREFIX: &str = "verset-";

pub fn verse_anchor(verse: u32) -> String {
    format!("{ANCHOR_PREFIX}{verse}")
}

/// Parse an anchor id back into a verse number.
pub fn verse_from_anchor(anchor: &str) -> Option<u32> {
    anchor
        .trim_start_matches('#')
        .strip_prefix(ANCHOR_PREFIX)?
        .parse()
        .ok()
        .filter(|verse| *verse > 0)
}

/// Deep link to a verse on the reading page.
pub fn reader_url(position: VerseRef) -> String {
    let group = group_for_book(position.book);
    format!(
        "/?group={}&book={}&chapter={}&verse={}#{}",
        group.key,
        position.book,
        position.chapter,
        position.verse,
        verse_anchor(position.verse)
    )
}

/// Raw query parameters of the reading page. Everything stays textual until
/// resolved so junk input degrades to defaults instead of a rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntryParams {
    pub group: Option<String>,
    pub book: Option<String>,
    pub chapter: Option<String>,
    pub verse: Option<String>,
}

impl EntryParams {
    /// Parameters that land exactly on `position`.
    pub fn for_position(position: VerseRef) -> Self {
        Self {
            group: Some(group_for_book(position.book).key.to_string()),
            book: Some(position.book.to_string()),
            chapter: Some(position.chapter.to_string()),
            verse: Some(position.verse.to_string()),
        }
    }
}

/// Strictly positive integer, or `None` for absent, zero and garbage.
pub fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

/// Where an entry request lands after defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub group: &'static BookGroup,
    pub position: VerseRef,
}

/// Corpus facts entry resolution needs.
pub trait CorpusIndex {
    /// Books that have verses, ascending.
    fn book_numbers(&self) -> Vec<BookNumber>;
    fn max_chapter(&self, book: BookNumber) -> Option<u32>;
    fn last_verse(&self, book: BookNumber, chapter: u32) -> Option<u32>;
}

/// Resolve page entry parameters against the corpus.
///
/// Unknown books fall back to the first book. A known group whose members do
/// not include the book switches to the group's first book. Chapter and verse
/// are clamped into range. Returns `None` only for an empty corpus.
pub fn resolve_entry(params: &EntryParams, corpus: &impl CorpusIndex) -> Option<ResolvedEntry> {
    let books = corpus.book_numbers();
    let first_book = *books.first()?;

    let requested_group = params.group.as_deref().and_then(group_by_key);
    let mut book = parse_positive(params.book.as_deref())
        .filter(|book| books.contains(book))
        .unwrap_or(first_book);

    let group = match requested_group {
        Some(group) if group_for_book(book).key != group.key => {
            match books.iter().find(|b| group_for_book(**b).key == group.key) {
                Some(first_in_group) => {
                    book = *first_in_group;
                    group
                }
                None => group_for_book(book),
            }
        }
        Some(group) => group,
        None => group_for_book(book),
    };

    let max_chapter = corpus.max_chapter(book).unwrap_or(1).max(1);
    let chapter = parse_positive(params.chapter.as_deref())
        .unwrap_or(1)
        .clamp(1, max_chapter);
    let last_verse = corpus.last_verse(book, chapter).unwrap_or(1).max(1);
    let verse = parse_positive(params.verse.as_deref())
        .unwrap_or(1)
        .clamp(1, last_verse);

    Some(ResolvedEntry {
        group,
        position: VerseRef::new(book, chapter, verse),
    })
}

/// Chapter selector options for a book.
pub fn chapter_options(max_chapter: u32) -> Vec<u32> {
    (1..=max_chapter.max(1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// book -> verses per chapter
    struct Fixture(BTreeMap<BookNumber, Vec<u32>>);

    impl CorpusIndex for Fixture {
        fn book_numbers(&self) -> Vec<BookNumber> {
            self.0.keys().copied().collect()
        }

        fn max_chapter(&self, book: BookNumber) -> Option<u32> {
            self.0.get(&book).map(|chapters| chapters.len() as u32)
        }

        fn last_verse(&self, book: BookNumber, chapter: u32) -> Option<u32> {
            self.0
                .get(&book)?
                .get(chapter.checked_sub(1)? as usize)
                .copied()
        }
    }

    fn fixture() -> Fixture {
        Fixture(BTreeMap::from([
            (10, vec![31, 25, 24]),
            (20, vec![22, 25]),
            (60, vec![18]),
            (470, vec![25, 23]),
        ]))
    }

    fn params(group: Option<&str>, book: &str, chapter: &str, verse: &str) -> EntryParams {
        EntryParams {
            group: group.map(str::to_string),
            book: Some(book.to_string()),
            chapter: Some(chapter.to_string()),
            verse: Some(verse.to_string()),
        }
    }

    #[test]
    fn anchors_round_trip() {
        assert_eq!(verse_anchor(12), "verset-12");
        assert_eq!(verse_from_anchor("#verset-12"), Some(12));
        assert_eq!(verse_from_anchor("verset-0"), None);
        assert_eq!(verse_from_anchor("chapitre-3"), None);
    }

    #[test]
    fn reader_url_carries_group_and_anchor() {
        assert_eq!(
            reader_url(VerseRef::new(20, 3, 7)),
            "/?group=torah&book=20&chapter=3&verse=7#verset-7"
        );
    }

    #[test]
    fn empty_params_land_on_the_first_verse_of_the_first_book() {
        let entry = resolve_entry(&EntryParams::default(), &fixture()).expect("non-empty corpus");
        assert_eq!(entry.position, VerseRef::new(10, 1, 1));
        assert_eq!(entry.group.key, "torah");
    }

    #[test]
    fn garbage_and_zero_values_use_defaults() {
        let entry = resolve_entry(&params(None, "abc", "0", "-3"), &fixture()).expect("entry");
        assert_eq!(entry.position, VerseRef::new(10, 1, 1));
    }

    #[test]
    fn chapter_and_verse_are_clamped() {
        let entry = resolve_entry(&params(None, "20", "9", "99"), &fixture()).expect("entry");
        assert_eq!(entry.position, VerseRef::new(20, 2, 25));
    }

    #[test]
    fn book_outside_the_group_switches_to_the_group_start() {
        let entry =
            resolve_entry(&params(Some("neviim"), "20", "2", "3"), &fixture()).expect("entry");
        assert_eq!(entry.group.key, "neviim");
        assert_eq!(entry.position, VerseRef::new(60, 1, 3));
    }

    #[test]
    fn unknown_group_is_derived_from_the_book() {
        let entry =
            resolve_entry(&params(Some("apocryphes"), "470", "2", "1"), &fixture()).expect("entry");
        assert_eq!(entry.group.key, "nouveau-testament");
        assert_eq!(entry.position, VerseRef::new(470, 2, 1));
    }

    #[test]
    fn empty_corpus_resolves_to_nothing() {
        let empty = Fixture(BTreeMap::new());
        assert!(resolve_entry(&EntryParams::default(), &empty).is_none());
    }

    #[test]
    fn params_for_a_position_resolve_back_to_it() {
        let position = VerseRef::new(20, 1, 2);
        let resolved = resolve_entry(&EntryParams::for_position(position), &fixture())
            .expect("resolved");
        assert_eq!(resolved.position, position);
    }

    #[test]
    fn chapter_options_cover_the_book() {
        assert_eq!(chapter_options(3), vec![1, 2, 3]);
        assert_eq!(chapter_options(0), vec![1]);
    }
}
