use super::super::layout;
use super::super::state::App;
use super::Effect;
use crate::fetch_client::FetchFailure;
use chouraqui_core::window::{FetchRequest, GrowDirection, GrowOutcome};
use chouraqui_core::wire::ChapterPayload;
use tracing::debug;

impl App {
    /// Ask the store for the next chapter in `direction`; a skip is only
    /// worth a debug line.
    pub(super) fn request_growth(&mut self, direction: GrowDirection, effects: &mut Vec<Effect>) {
        match self
            .window
            .begin_grow(direction, self.scroll.backward_permitted())
        {
            Ok(request) => effects.push(Effect::FetchChapter(request)),
            Err(skip) => debug!(%direction, ?skip, "Growth skipped"),
        }
    }

    pub(super) fn handle_chapter_fetched(
        &mut self,
        request: FetchRequest,
        result: Result<ChapterPayload, FetchFailure>,
        effects: &mut Vec<Effect>,
    ) {
        let layouts = self.estimated_layout();
        let scale = self.layout_scale(&layouts);
        let estimated_before = layout::estimated_content_height(&layouts);
        let content_before = self.current_viewport(&layouts, scale).content_height;

        let outcome = self.window.complete_grow(request, result);
        if !matches!(outcome, GrowOutcome::Appended(_) | GrowOutcome::Prepended(_)) {
            return;
        }
        let estimated_after = layout::estimated_content_height(&self.estimated_layout());
        let added = (estimated_after - estimated_before) * scale;

        // The measured height predates the new chapter; keep it consistent
        // until the scrollable reports again.
        if let Some(measured) = self.viewport.content_height.as_mut() {
            *measured += added;
        }

        if let GrowOutcome::Prepended(_) = outcome {
            self.scroll.record_prepend(content_before);
            if let Some(adjusted) = self
                .scroll
                .finish_prepend(self.viewport.scroll_top, content_before + added)
            {
                self.viewport.scroll_top = adjusted;
                effects.push(Effect::ScrollTo(adjusted));
            }
        }

        self.scroll.grow_succeeded(request.direction);
        self.refresh_scroll(effects);
    }
}
