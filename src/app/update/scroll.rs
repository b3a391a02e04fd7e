use super::super::layout;
use super::super::state::App;
use super::Effect;
use chouraqui_core::scroll::InitialScrollStep;
use tracing::{debug, trace};

impl App {
    pub(super) fn handle_scrolled(
        &mut self,
        scroll_top: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        trace!(
            scroll_top,
            viewport_width,
            viewport_height,
            content_height,
            "Reader scrolled"
        );
        self.viewport.scroll_top = scroll_top.max(0.0);
        self.viewport.width = viewport_width;
        self.viewport.height = viewport_height;
        if content_height.is_finite() && content_height > 0.0 {
            self.viewport.content_height = Some(content_height);
        }
        self.refresh_scroll(effects);
    }

    /// Feed the current geometry to the coordinator and start any growth its
    /// sentinels ask for.
    pub(super) fn refresh_scroll(&mut self, effects: &mut Vec<Effect>) {
        let layouts = self.estimated_layout();
        let scale = self.layout_scale(&layouts);
        let geometry = layout::geometry(&layouts, scale);
        let viewport = self.current_viewport(&layouts, scale);

        let observation = self.scroll.observe(viewport, &geometry);
        for direction in observation.triggers {
            self.request_growth(direction, effects);
        }
    }

    /// Arm the initial scroll for a freshly seeded window and schedule the
    /// first anchor lookup.
    pub(in crate::app) fn start_reading_context(&mut self, effects: &mut Vec<Effect>) {
        let verse = self.context.position.verse;
        let state = self.scroll.begin_initial_scroll(verse, self.viewport.width);
        if state.is_settled() {
            self.refresh_scroll(effects);
        } else {
            effects.push(Effect::ScheduleInitialScroll {
                generation: self.generation,
                delay: std::time::Duration::ZERO,
            });
        }
    }

    pub(super) fn handle_initial_scroll_tick(&mut self, generation: u64, effects: &mut Vec<Effect>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Ignoring stale initial scroll tick");
            return;
        }
        let Some(verse) = self.scroll.initial_scroll().target_verse() else {
            return;
        };

        let layouts = self.estimated_layout();
        let scale = self.layout_scale(&layouts);
        let anchor = layout::verse_offset(&layouts, self.context.position.chapter, verse, scale);

        match self.scroll.initial_scroll_attempt(anchor) {
            InitialScrollStep::ScrollTo(offset) => self.jump_to_verse(offset, effects),
            InitialScrollStep::RetryLater => effects.push(Effect::ScheduleInitialScroll {
                generation,
                delay: self.config.initial_scroll_retry_delay(),
            }),
            InitialScrollStep::GaveUp => self.refresh_scroll(effects),
            InitialScrollStep::Idle => {}
        }
    }

    /// Bring an already loaded verse into view.
    pub(super) fn scroll_to_loaded_verse(&mut self, chapter: u32, verse: u32, effects: &mut Vec<Effect>) {
        let layouts = self.estimated_layout();
        let scale = self.layout_scale(&layouts);
        if let Some(offset) = layout::verse_offset(&layouts, chapter, verse, scale) {
            self.jump_to_verse(offset, effects);
        }
    }

    /// Scroll so the verse starting at `offset` sits just below the top edge.
    fn jump_to_verse(&mut self, offset: f32, effects: &mut Vec<Effect>) {
        let layouts = self.estimated_layout();
        let scale = self.layout_scale(&layouts);
        let max_scroll_top = self.current_viewport(&layouts, scale).max_scroll_top();
        let target = (offset - layout::VERSE_SCROLL_MARGIN_PX)
            .min(max_scroll_top)
            .max(0.0);
        self.viewport.scroll_top = target;
        effects.push(Effect::ScrollTo(target));
        self.refresh_scroll(effects);
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::messages::Message;
    use super::super::super::state::test_support::reader_at;
    use super::*;
    use chouraqui_core::model::VerseRef;
    use chouraqui_core::window::GrowDirection;

    #[test]
    fn deep_link_waits_for_the_initial_scroll_before_growing_backward() {
        let (mut app, effects) = reader_at("scroll-initial", VerseRef::new(10, 2, 2));
        assert_eq!(
            effects,
            vec![Effect::ScheduleInitialScroll {
                generation: 0,
                delay: std::time::Duration::ZERO,
            }]
        );
        assert!(!app.scroll.backward_permitted());

        let effects = app.reduce(Message::Scrolled {
            scroll_top: 0.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            content_height: 400.0,
        });
        assert!(!effects.iter().any(|effect| matches!(effect, Effect::FetchChapter(_))));

        let effects = app.reduce(Message::InitialScrollTick { generation: 0 });
        assert!(app.scroll.backward_permitted());
        assert!(effects.iter().any(|effect| matches!(effect, Effect::ScrollTo(_))));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::FetchChapter(request) if request.direction == GrowDirection::Backward
        )));
    }

    #[test]
    fn stale_initial_scroll_tick_is_ignored() {
        let (mut app, _) = reader_at("scroll-stale", VerseRef::new(10, 1, 3));
        let effects = app.reduce(Message::InitialScrollTick { generation: 7 });
        assert!(effects.is_empty());
        assert!(!app.scroll.backward_permitted());
    }

    #[test]
    fn narrow_window_skips_the_initial_scroll() {
        let (mut app, _) = reader_at("scroll-narrow", VerseRef::new(10, 1, 3));
        app.viewport.width = 500.0;
        let mut effects = Vec::new();
        app.start_reading_context(&mut effects);
        assert!(app.scroll.backward_permitted());
        assert!(!effects.iter().any(|effect| matches!(effect, Effect::ScheduleInitialScroll { .. })));
    }

    #[test]
    fn scrolling_records_the_measured_geometry() {
        let (mut app, _) = reader_at("scroll-measure", VerseRef::new(10, 1, 1));
        app.reduce(Message::Scrolled {
            scroll_top: 12.0,
            viewport_width: 1000.0,
            viewport_height: 700.0,
            content_height: 1500.0,
        });
        assert_eq!(app.viewport.scroll_top, 12.0);
        assert_eq!(app.viewport.content_height, Some(1500.0));
        assert_eq!(app.scroll.last_viewport().map(|v| v.height), Some(700.0));
    }
}
