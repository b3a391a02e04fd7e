use super::state::{BookOption, GroupOption};
use crate::fetch_client::FetchFailure;
use crate::loader::PageContext;
use chouraqui_core::adjacency::VerseAdjacency;
use chouraqui_core::model::VerseRef;
use chouraqui_core::window::FetchRequest;
use chouraqui_core::wire::ChapterPayload;
use iced::keyboard::{Key, Modifiers};

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    Scrolled {
        scroll_top: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    },
    ChapterFetched {
        request: FetchRequest,
        result: Result<ChapterPayload, FetchFailure>,
    },
    /// Try to bring the selected verse into view; `generation` ties the tick
    /// to the context that scheduled it.
    InitialScrollTick {
        generation: u64,
    },
    VerseClicked(VerseRef),
    AdjacencyResolved {
        position: VerseRef,
        result: Result<VerseAdjacency, String>,
    },
    PreviousVerse,
    NextVerse,
    GroupSelected(GroupOption),
    BookSelected(BookOption),
    ChapterSelected(u32),
    VerseSelected(u32),
    HistoryBack,
    HistoryForward,
    ContextLoaded {
        result: Result<Box<PageContext>, String>,
        record_history: bool,
    },
    ToggleTheme,
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
}
