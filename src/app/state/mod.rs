mod constants;
mod options;
mod reader;

use super::layout::{self, ChapterLayout, LayoutMetrics};
use super::messages::Message;
use super::update::Effect;
use crate::config::AppConfig;
use crate::data_source::VerseDataSource;
use crate::fetch_client::ChapterFetchClient;
use crate::loader::PageContext;
use chouraqui_core::crossref::has_secondary_text;
use chouraqui_core::history::NavigationHistory;
use chouraqui_core::labels::{french_chapter_label, hebrew_chapter_label};
use chouraqui_core::scroll::{ScrollCoordinator, Viewport};
use chouraqui_core::window::ChapterWindowStore;
use iced::Task;
use std::sync::Arc;

pub(crate) use constants::*;
pub use options::{BookOption, GroupOption};
pub(in crate::app) use options::{book_options, group_options};
pub(in crate::app) use reader::{SelectionState, ViewportState};

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) source: Arc<VerseDataSource>,
    pub(super) client: ChapterFetchClient,
    pub(super) context: PageContext,
    pub(super) window: ChapterWindowStore,
    pub(super) scroll: ScrollCoordinator,
    pub(super) history: NavigationHistory,
    pub(super) selection: SelectionState,
    pub(super) viewport: ViewportState,
    /// Bumped whenever a new reading context replaces the window.
    pub(super) generation: u64,
    pub(super) loading: bool,
    pub(super) error: Option<String>,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        context: PageContext,
        client: ChapterFetchClient,
        source: Arc<VerseDataSource>,
    ) -> (App, Task<Message>) {
        let (mut app, effects) = App::seeded(config, context, client, source);
        tracing::info!(
            position = %app.context.position,
            max_chapter = app.context.max_chapter,
            "Reader started"
        );
        let task = Task::batch(effects.into_iter().map(|effect| app.run_effect(effect)));
        (app, task)
    }

    /// State for a freshly loaded context plus the effects that start it.
    pub(super) fn seeded(
        config: AppConfig,
        context: PageContext,
        client: ChapterFetchClient,
        source: Arc<VerseDataSource>,
    ) -> (App, Vec<Effect>) {
        let window = ChapterWindowStore::new(
            context.position.book,
            context.seed.clone(),
            context.max_chapter,
        );
        let scroll = ScrollCoordinator::new(config.scroll_settings(), context.position.chapter);
        let mut history = NavigationHistory::new(config.history_limit);
        history.visit(context.position);
        let viewport = ViewportState::new(config.window_width, config.window_height);

        let mut app = App {
            selection: SelectionState::new(context.position, Some(context.adjacency)),
            source,
            client,
            window,
            scroll,
            history,
            viewport,
            generation: 0,
            loading: false,
            error: None,
            context,
            config,
        };

        let mut effects = Vec::new();
        app.start_reading_context(&mut effects);
        (app, effects)
    }

    /// Two columns side by side unless the window is narrower than the
    /// mobile breakpoint.
    pub(super) fn two_columns(&self) -> bool {
        self.viewport.width >= self.scroll.settings().mobile_breakpoint_px
    }

    pub(super) fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            font_size: self.config.font_size as f32,
            hebrew_font_size: self.config.hebrew_font_size as f32,
            viewport_width: self.viewport.width,
            has_secondary: has_secondary_text(self.window.book()),
            two_columns: self.two_columns(),
        }
    }

    pub(super) fn estimated_layout(&self) -> Vec<ChapterLayout> {
        layout::estimate_layout(&self.layout_metrics(), self.window.chapters())
    }

    pub(super) fn layout_scale(&self, layouts: &[ChapterLayout]) -> f32 {
        layout::scale_factor(layouts, self.viewport.content_height)
    }

    /// Viewport as last reported, with the estimated content height standing
    /// in until the scrollable has measured it.
    pub(super) fn current_viewport(&self, layouts: &[ChapterLayout], scale: f32) -> Viewport {
        Viewport {
            scroll_top: self.viewport.scroll_top,
            width: self.viewport.width,
            height: self.viewport.height,
            content_height: self
                .viewport
                .content_height
                .unwrap_or_else(|| layout::estimated_content_height(layouts) * scale),
        }
    }

    pub(super) fn french_header(&self) -> String {
        french_chapter_label(
            self.window.book(),
            &self.context.book.long_name,
            self.scroll.current_chapter(),
        )
    }

    pub(super) fn hebrew_header(&self) -> Option<String> {
        hebrew_chapter_label(self.window.book(), self.scroll.current_chapter())
    }

    pub(super) fn is_night(&self) -> bool {
        matches!(self.config.theme, crate::config::ThemeMode::Night)
    }
}

#[cfg(test)]
pub(in crate::app) mod test_support {
    use super::*;
    use crate::data_source::test_support::fixture_source;
    use crate::loader::load_page_context;
    use chouraqui_core::links::EntryParams;
    use chouraqui_core::model::VerseRef;
    use std::time::Duration;

    /// Reader opened on a fixture corpus at `position`, with the effects its
    /// startup asked for.
    pub(in crate::app) fn reader_at(name: &str, position: VerseRef) -> (App, Vec<Effect>) {
        let source = Arc::new(fixture_source(name));
        let context = load_page_context(&source, &EntryParams::for_position(position))
            .expect("load")
            .expect("context");
        let client = ChapterFetchClient::new("http://127.0.0.1:9", Duration::from_secs(1))
            .expect("client");
        App::seeded(AppConfig::default(), context, client, source)
    }
}
