use chouraqui_core::links::EntryParams;
use chouraqui_core::model::VerseRef;
use chouraqui_core::window::FetchRequest;
use std::time::Duration;

mod appearance;
mod core;
mod navigation;
mod scroll;
mod window;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    FetchChapter(FetchRequest),
    /// Absolute vertical offset of the reader scrollable.
    ScrollTo(f32),
    ScheduleInitialScroll {
        generation: u64,
        delay: Duration,
    },
    LoadContext {
        params: EntryParams,
        record_history: bool,
    },
    ResolveAdjacency(VerseRef),
    SavePosition(VerseRef),
}
