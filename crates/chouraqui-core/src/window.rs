//! The chapter window: a contiguous run of loaded chapters that grows at
//! either end as the reader scrolls.
//!
//! Growth is split into two steps so the store never holds a borrow across an
//! await point. `begin_grow_*` checks the preconditions, raises the in-flight
//! flag and hands back a [`FetchRequest`]; the runtime performs the fetch and
//! feeds the result to [`ChapterWindowStore::complete_grow`], which splices the
//! chapter in and always clears the flag.
//!
//! Every request carries the epoch of the window it was issued for. A reset
//! bumps the epoch, so completions that arrive for a previous book or seed
//! chapter are dropped instead of corrupting the new window.

use crate::model::{BookNumber, ChapterData};
use crate::wire::ChapterPayload;
use std::collections::VecDeque;
use std::fmt::Display;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowDirection {
    Forward,
    Backward,
}

impl Display for GrowDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowDirection::Forward => write!(f, "forward"),
            GrowDirection::Backward => write!(f, "backward"),
        }
    }
}

/// A chapter fetch the runtime must perform on behalf of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub direction: GrowDirection,
    pub book: BookNumber,
    pub chapter: u32,
    epoch: u64,
}

/// Why a grow trigger did not start a fetch. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowSkip {
    /// A fetch in the same direction is still outstanding.
    InFlight,
    /// The window already reaches chapter 1 or the book's last chapter.
    AtBoundary,
    /// Backward growth is held until the initial scroll has settled.
    NotPermitted,
}

/// Result of applying a fetch completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowOutcome {
    Appended(u32),
    Prepended(u32),
    /// The fetch failed; the window is unchanged.
    Failed,
    /// The fetch succeeded but the chapter had no verses.
    EmptyChapter,
    /// The completion belongs to a window that has since been reset.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ChapterWindowStore {
    book: BookNumber,
    max_chapter: u32,
    chapters: VecDeque<ChapterData>,
    growing_forward: bool,
    growing_backward: bool,
    epoch: u64,
}

impl ChapterWindowStore {
    pub fn new(book: BookNumber, seed: ChapterData, max_chapter: u32) -> Self {
        let mut store = Self {
            book,
            max_chapter,
            chapters: VecDeque::new(),
            growing_forward: false,
            growing_backward: false,
            epoch: 0,
        };
        store.reset(book, seed, max_chapter);
        store
    }

    /// Replace the whole window with a single seed chapter.
    ///
    /// Used on fresh navigation only. Pagination never calls this.
    pub fn reset(&mut self, book: BookNumber, seed: ChapterData, max_chapter: u32) {
        self.epoch = self.epoch.wrapping_add(1);
        debug!(
            book,
            chapter = seed.chapter,
            max_chapter,
            epoch = self.epoch,
            "Reset chapter window"
        );
        self.book = book;
        self.max_chapter = max_chapter.max(seed.chapter);
        self.chapters.clear();
        self.chapters.push_back(seed);
        self.growing_forward = false;
        self.growing_backward = false;
    }

    pub fn book(&self) -> BookNumber {
        self.book
    }

    pub fn max_chapter(&self) -> u32 {
        self.max_chapter
    }

    pub fn chapters(&self) -> impl Iterator<Item = &ChapterData> {
        self.chapters.iter()
    }

    pub fn chapter_numbers(&self) -> Vec<u32> {
        self.chapters.iter().map(|c| c.chapter).collect()
    }

    pub fn chapter(&self, chapter: u32) -> Option<&ChapterData> {
        let first = self.first_chapter();
        let idx = chapter.checked_sub(first)? as usize;
        self.chapters.get(idx)
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn first_chapter(&self) -> u32 {
        self.chapters.front().map(|c| c.chapter).unwrap_or(1)
    }

    pub fn last_chapter(&self) -> u32 {
        self.chapters.back().map(|c| c.chapter).unwrap_or(1)
    }

    pub fn has_next(&self) -> bool {
        self.last_chapter() < self.max_chapter
    }

    pub fn has_previous(&self) -> bool {
        self.first_chapter() > 1
    }

    pub fn is_growing(&self, direction: GrowDirection) -> bool {
        match direction {
            GrowDirection::Forward => self.growing_forward,
            GrowDirection::Backward => self.growing_backward,
        }
    }

    pub fn begin_grow_forward(&mut self) -> Result<FetchRequest, GrowSkip> {
        if self.growing_forward {
            return Err(GrowSkip::InFlight);
        }
        if !self.has_next() {
            return Err(GrowSkip::AtBoundary);
        }
        self.growing_forward = true;
        Ok(self.request(GrowDirection::Forward, self.last_chapter() + 1))
    }

    /// `permitted` is the scroll coordinator's gate on backward loading.
    pub fn begin_grow_backward(&mut self, permitted: bool) -> Result<FetchRequest, GrowSkip> {
        if self.growing_backward {
            return Err(GrowSkip::InFlight);
        }
        if !self.has_previous() {
            return Err(GrowSkip::AtBoundary);
        }
        if !permitted {
            return Err(GrowSkip::NotPermitted);
        }
        self.growing_backward = true;
        Ok(self.request(GrowDirection::Backward, self.first_chapter() - 1))
    }

    pub fn begin_grow(
        &mut self,
        direction: GrowDirection,
        backward_permitted: bool,
    ) -> Result<FetchRequest, GrowSkip> {
        match direction {
            GrowDirection::Forward => self.begin_grow_forward(),
            GrowDirection::Backward => self.begin_grow_backward(backward_permitted),
        }
    }

    fn request(&self, direction: GrowDirection, chapter: u32) -> FetchRequest {
        debug!(
            book = self.book,
            chapter,
            %direction,
            epoch = self.epoch,
            "Requesting chapter"
        );
        FetchRequest {
            direction,
            book: self.book,
            chapter,
            epoch: self.epoch,
        }
    }

    /// Apply a fetch completion. The direction's flag is cleared whatever the
    /// outcome, unless the request is stale.
    pub fn complete_grow<E: Display>(
        &mut self,
        request: FetchRequest,
        result: Result<ChapterPayload, E>,
    ) -> GrowOutcome {
        if request.epoch != self.epoch {
            debug!(
                book = request.book,
                chapter = request.chapter,
                direction = %request.direction,
                "Dropping completion for a previous window"
            );
            return GrowOutcome::Stale;
        }

        match request.direction {
            GrowDirection::Forward => self.growing_forward = false,
            GrowDirection::Backward => self.growing_backward = false,
        }

        let payload = match result {
            Ok(payload) => payload,
            Err(err) => {
                warn!(
                    book = request.book,
                    chapter = request.chapter,
                    direction = %request.direction,
                    "Failed to fetch chapter: {err}"
                );
                return GrowOutcome::Failed;
            }
        };

        if payload.primary_verses.is_empty() {
            warn!(
                book = request.book,
                chapter = request.chapter,
                max_chapter = self.max_chapter,
                direction = %request.direction,
                "Chapter expected from metadata came back without verses"
            );
            return GrowOutcome::EmptyChapter;
        }

        let data = ChapterData::new(
            request.chapter,
            payload.primary_verses,
            payload.secondary_verses,
        );
        match request.direction {
            GrowDirection::Forward if request.chapter == self.last_chapter() + 1 => {
                self.chapters.push_back(data);
                info!(
                    book = self.book,
                    chapter = request.chapter,
                    loaded = self.chapters.len(),
                    "Appended chapter"
                );
                GrowOutcome::Appended(request.chapter)
            }
            GrowDirection::Backward if request.chapter + 1 == self.first_chapter() => {
                self.chapters.push_front(data);
                info!(
                    book = self.book,
                    chapter = request.chapter,
                    loaded = self.chapters.len(),
                    "Prepended chapter"
                );
                GrowOutcome::Prepended(request.chapter)
            }
            _ => {
                // Single-flight per direction plus the epoch check make this
                // unreachable; keep contiguity regardless.
                warn!(
                    chapter = request.chapter,
                    first = self.first_chapter(),
                    last = self.last_chapter(),
                    "Discarding non-adjacent chapter"
                );
                GrowOutcome::Stale
            }
        }
    }
}
