//! JSON shapes exchanged between the read API and the fetch client.

use crate::model::{Book, SecondaryVerse, Verse};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/verses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterResponse {
    pub book: Option<Book>,
    pub chapter: u32,
    pub verses: Vec<Verse>,
    #[serde(default)]
    pub hebrew_verses: Vec<SecondaryVerse>,
    #[serde(default)]
    pub has_hebrew: bool,
    pub max_chapter: Option<u32>,
    pub has_next_chapter: bool,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Entry of `GET /api/books`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    #[serde(flatten)]
    pub book: Book,
    pub group: String,
    pub max_chapter: Option<u32>,
}

/// What the window store needs from one fetched chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPayload {
    pub primary_verses: Vec<Verse>,
    pub secondary_verses: Vec<SecondaryVerse>,
    pub max_chapter: Option<u32>,
    pub has_next_chapter: bool,
}

impl From<ChapterResponse> for ChapterPayload {
    fn from(response: ChapterResponse) -> Self {
        Self {
            primary_verses: response.verses,
            secondary_verses: response.hebrew_verses,
            max_chapter: response.max_chapter,
            has_next_chapter: response.has_next_chapter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_hebrew_fields_still_parses() {
        let raw = r#"{
            "book": null,
            "chapter": 4,
            "verses": [],
            "maxChapter": 3,
            "hasNextChapter": false
        }"#;
        let parsed: ChapterResponse = serde_json::from_str(raw).expect("parse response");
        assert!(parsed.hebrew_verses.is_empty());
        assert!(!parsed.has_hebrew);
        assert_eq!(parsed.max_chapter, Some(3));
    }

    #[test]
    fn response_missing_verses_is_rejected() {
        let raw = r#"{ "chapter": 4, "maxChapter": 3, "hasNextChapter": false }"#;
        assert!(serde_json::from_str::<ChapterResponse>(raw).is_err());
    }
}
