//! Chapter header labels that follow the current chapter.

use crate::crossref::{common_french_name, hebrew_book_name};
use crate::gematria::to_hebrew_numeral;
use crate::model::BookNumber;

/// `"Genèse (Entête) Chapitre 3"`, or just the long name when the book has
/// no common French name.
pub fn french_chapter_label(book: BookNumber, long_name: &str, chapter: u32) -> String {
    match common_french_name(book) {
        Some(common) => format!("{common} ({long_name}) Chapitre {chapter}"),
        None => format!("{long_name} Chapitre {chapter}"),
    }
}

/// `"בְּרֵאשִׁית פרק ג"`; `None` for books without Hebrew text.
pub fn hebrew_chapter_label(book: BookNumber, chapter: u32) -> Option<String> {
    let name = hebrew_book_name(book)?;
    Some(format!("{name} פרק {}", to_hebrew_numeral(chapter)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_label_prefers_the_common_name() {
        assert_eq!(
            french_chapter_label(10, "Entête", 3),
            "Genèse (Entête) Chapitre 3"
        );
        assert_eq!(french_chapter_label(470, "Matyah", 2), "Matyah Chapitre 2");
    }

    #[test]
    fn hebrew_label_uses_gematria() {
        let label = hebrew_chapter_label(10, 16).expect("Genesis has Hebrew");
        assert!(label.ends_with("פרק טז"));
        assert!(hebrew_chapter_label(470, 1).is_none());
    }
}
