//! Remembers where the reader left off.
//!
//! The position lives in `.cache/last-position.toml` as a tiny TOML file with
//! the book, chapter and verse last shown.

use chouraqui_core::model::VerseRef;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CACHE_DIR: &str = ".cache";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
struct CacheEntry {
    book: u32,
    chapter: u32,
    verse: u32,
}

pub fn last_position_path() -> PathBuf {
    Path::new(CACHE_DIR).join("last-position.toml")
}

pub fn load_last_position() -> Option<VerseRef> {
    load_position_from(&last_position_path())
}

/// Persist the current position. Errors are logged and otherwise ignored to
/// keep the UI responsive.
pub fn save_last_position(position: VerseRef) {
    save_position_to(&last_position_path(), position);
}

fn load_position_from(path: &Path) -> Option<VerseRef> {
    let data = fs::read_to_string(path).ok()?;
    let entry: CacheEntry = toml::from_str(&data)
        .inspect_err(|err| warn!(path = %path.display(), "Ignoring unreadable position cache: {err}"))
        .ok()?;
    Some(VerseRef::new(entry.book, entry.chapter, entry.verse))
}

fn save_position_to(path: &Path, position: VerseRef) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let entry = CacheEntry {
        book: position.book,
        chapter: position.chapter,
        verse: position.verse,
    };
    match toml::to_string(&entry) {
        Ok(contents) => match fs::write(path, contents) {
            Ok(()) => debug!(%position, "Saved last position"),
            Err(err) => warn!(path = %path.display(), "Failed to save last position: {err}"),
        },
        Err(err) => warn!("Failed to encode last position: {err}"),
    }
}
