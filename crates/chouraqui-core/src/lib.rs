//! Shared reading engine for the Chouraqui reader.
//!
//! Everything here is free of I/O: corpus tables, the chapter window state
//! machine, scroll geometry, verse adjacency and the wire types. The binary
//! crate adds storage, HTTP and the desktop view on top.

pub mod adjacency;
pub mod crossref;
pub mod gematria;
pub mod history;
pub mod labels;
pub mod links;
pub mod markup;
pub mod model;
pub mod scroll;
pub mod window;
pub mod wire;

pub use adjacency::{BookEnd, VerseAdjacency};
pub use model::{Book, BookNumber, ChapterData, SecondaryVerse, Verse, VerseRef};
pub use window::{ChapterWindowStore, FetchRequest, GrowDirection, GrowOutcome, GrowSkip};
pub use wire::{ChapterPayload, ChapterResponse};
