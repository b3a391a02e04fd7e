//! Scroll geometry for the chapter window.
//!
//! Everything here works on plain numbers: chapter container offsets,
//! viewport size and scroll offset. Measuring those numbers is the job of the
//! reader's layout adapter.

use crate::window::GrowDirection;
use tracing::{debug, info, trace};

/// Default distance below the scroll top used to pick the current chapter;
/// leaves room for the sticky header.
pub const DEFAULT_REFERENCE_LINE_PX: f32 = 350.0;
pub const DEFAULT_SENTINEL_THRESHOLD_PX: f32 = 200.0;
pub const DEFAULT_MOBILE_BREAKPOINT_PX: f32 = 768.0;
pub const DEFAULT_INITIAL_SCROLL_RETRIES: u32 = 1;

/// Vertical extent of one mounted chapter container, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChapterGeometry {
    pub chapter: u32,
    pub top: f32,
    pub height: f32,
}

impl ChapterGeometry {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_top: f32,
    pub width: f32,
    pub height: f32,
    pub content_height: f32,
}

impl Viewport {
    pub fn scroll_bottom(&self) -> f32 {
        self.scroll_top + self.height
    }

    pub fn max_scroll_top(&self) -> f32 {
        (self.content_height - self.height).max(0.0)
    }
}

/// Pick the chapter the reader is looking at.
///
/// Only containers overlapping `[reference, reference + viewport height)` are
/// candidates. The one holding the reference line wins; otherwise the one
/// whose top is closest to it.
pub fn current_chapter(
    chapters: &[ChapterGeometry],
    viewport: &Viewport,
    reference_offset: f32,
) -> Option<u32> {
    let reference = viewport.scroll_top + reference_offset;
    let window_end = reference + viewport.height;

    let visible = chapters
        .iter()
        .filter(|c| c.bottom() > reference && c.top < window_end);

    let mut best: Option<(bool, f32, u32)> = None;
    for chapter in visible {
        let holds = chapter.contains(reference);
        let distance = (reference - chapter.top).abs();
        let better = match best {
            None => true,
            Some((best_holds, best_distance, _)) => {
                (holds && !best_holds) || (holds == best_holds && distance < best_distance)
            }
        };
        if better {
            best = Some((holds, distance, chapter.chapter));
        }
    }
    best.map(|(_, _, chapter)| chapter)
}

/// Scroll offset that keeps the same content under the viewport after
/// content was spliced in above it.
pub fn preserve_scroll_on_prepend(
    scroll_top: f32,
    content_height_before: f32,
    content_height_after: f32,
) -> f32 {
    scroll_top + (content_height_after - content_height_before)
}

pub fn forward_sentinel_visible(viewport: &Viewport, threshold: f32) -> bool {
    viewport.content_height > 0.0
        && viewport.scroll_bottom() >= viewport.content_height - threshold
}

pub fn backward_sentinel_visible(viewport: &Viewport, threshold: f32) -> bool {
    viewport.content_height > 0.0 && viewport.scroll_top <= threshold
}

/// Edge-triggered watch over the two boundary sentinels.
///
/// A trigger fires when a sentinel goes from hidden to visible. `rearm`
/// forgets that a sentinel is visible so the next observation fires again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentinelWatch {
    forward_visible: bool,
    backward_visible: bool,
}

impl SentinelWatch {
    pub fn observe(&mut self, viewport: &Viewport, threshold: f32) -> Vec<GrowDirection> {
        let mut triggers = Vec::new();

        let forward = forward_sentinel_visible(viewport, threshold);
        if forward && !self.forward_visible {
            triggers.push(GrowDirection::Forward);
        }
        self.forward_visible = forward;

        let backward = backward_sentinel_visible(viewport, threshold);
        if backward && !self.backward_visible {
            triggers.push(GrowDirection::Backward);
        }
        self.backward_visible = backward;

        triggers
    }

    pub fn rearm(&mut self, direction: GrowDirection) {
        match direction {
            GrowDirection::Forward => self.forward_visible = false,
            GrowDirection::Backward => self.backward_visible = false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Settle sequence for the initial scroll to a selected verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialScroll {
    Pending { verse: u32, retries_left: u32 },
    Settled,
}

/// What the adapter should do after an anchor lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialScrollStep {
    ScrollTo(f32),
    RetryLater,
    GaveUp,
    Idle,
}

impl InitialScroll {
    pub fn new(verse: u32, viewport_width: f32, mobile_breakpoint: f32, retries: u32) -> Self {
        if verse <= 1 || viewport_width < mobile_breakpoint {
            InitialScroll::Settled
        } else {
            InitialScroll::Pending {
                verse,
                retries_left: retries,
            }
        }
    }

    pub fn target_verse(&self) -> Option<u32> {
        match self {
            InitialScroll::Pending { verse, .. } => Some(*verse),
            InitialScroll::Settled => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, InitialScroll::Settled)
    }

    /// Feed the result of one anchor lookup.
    pub fn attempt(&mut self, anchor_offset: Option<f32>) -> InitialScrollStep {
        let InitialScroll::Pending {
            verse,
            retries_left,
        } = *self
        else {
            return InitialScrollStep::Idle;
        };

        match anchor_offset {
            Some(offset) => {
                debug!(verse, offset, "Initial scroll anchor found");
                *self = InitialScroll::Settled;
                InitialScrollStep::ScrollTo(offset)
            }
            None if retries_left > 0 => {
                *self = InitialScroll::Pending {
                    verse,
                    retries_left: retries_left - 1,
                };
                InitialScrollStep::RetryLater
            }
            None => {
                info!(verse, "Verse anchor never appeared; releasing backward loading");
                *self = InitialScroll::Settled;
                InitialScrollStep::GaveUp
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSettings {
    pub reference_line_px: f32,
    pub sentinel_threshold_px: f32,
    pub mobile_breakpoint_px: f32,
    pub initial_scroll_retries: u32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            reference_line_px: DEFAULT_REFERENCE_LINE_PX,
            sentinel_threshold_px: DEFAULT_SENTINEL_THRESHOLD_PX,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            initial_scroll_retries: DEFAULT_INITIAL_SCROLL_RETRIES,
        }
    }
}

/// Result of one viewport observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollObservation {
    pub current_chapter: u32,
    pub chapter_changed: bool,
    pub triggers: Vec<GrowDirection>,
}

/// Ties current-chapter tracking, the sentinels, the initial scroll and
/// prepend compensation together for one reading context.
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    settings: ScrollSettings,
    initial_chapter: u32,
    current_chapter: u32,
    sentinels: SentinelWatch,
    initial_scroll: InitialScroll,
    pending_prepend_height: Option<f32>,
    last_viewport: Option<Viewport>,
}

impl ScrollCoordinator {
    pub fn new(settings: ScrollSettings, initial_chapter: u32) -> Self {
        Self {
            settings,
            initial_chapter,
            current_chapter: initial_chapter,
            sentinels: SentinelWatch::default(),
            initial_scroll: InitialScroll::Settled,
            pending_prepend_height: None,
            last_viewport: None,
        }
    }

    pub fn settings(&self) -> &ScrollSettings {
        &self.settings
    }

    /// Start over for a freshly seeded window.
    pub fn reset(&mut self, initial_chapter: u32) {
        self.initial_chapter = initial_chapter;
        self.current_chapter = initial_chapter;
        self.sentinels.reset();
        self.initial_scroll = InitialScroll::Settled;
        self.pending_prepend_height = None;
        self.last_viewport = None;
    }

    pub fn current_chapter(&self) -> u32 {
        self.current_chapter
    }

    pub fn last_viewport(&self) -> Option<Viewport> {
        self.last_viewport
    }

    pub fn begin_initial_scroll(&mut self, verse: u32, viewport_width: f32) -> InitialScroll {
        self.initial_scroll = InitialScroll::new(
            verse,
            viewport_width,
            self.settings.mobile_breakpoint_px,
            self.settings.initial_scroll_retries,
        );
        debug!(verse, viewport_width, state = ?self.initial_scroll, "Initial scroll armed");
        self.initial_scroll
    }

    pub fn initial_scroll(&self) -> InitialScroll {
        self.initial_scroll
    }

    pub fn initial_scroll_attempt(&mut self, anchor_offset: Option<f32>) -> InitialScrollStep {
        let step = self.initial_scroll.attempt(anchor_offset);
        if matches!(step, InitialScrollStep::ScrollTo(_) | InitialScrollStep::GaveUp) {
            // A backward trigger swallowed while pending must get another chance.
            self.sentinels.rearm(GrowDirection::Backward);
        }
        step
    }

    pub fn backward_permitted(&self) -> bool {
        self.initial_scroll.is_settled()
    }

    pub fn observe(&mut self, viewport: Viewport, chapters: &[ChapterGeometry]) -> ScrollObservation {
        self.last_viewport = Some(viewport);
        let chapter = current_chapter(chapters, &viewport, self.settings.reference_line_px)
            .unwrap_or(self.initial_chapter);
        let chapter_changed = chapter != self.current_chapter;
        if chapter_changed {
            debug!(
                from = self.current_chapter,
                to = chapter,
                scroll_top = viewport.scroll_top,
                "Current chapter changed"
            );
            self.current_chapter = chapter;
        }
        let triggers = self
            .sentinels
            .observe(&viewport, self.settings.sentinel_threshold_px);
        if !triggers.is_empty() {
            trace!(?triggers, "Sentinel entered viewport");
        }
        ScrollObservation {
            current_chapter: chapter,
            chapter_changed,
            triggers,
        }
    }

    /// A growth at `direction` landed; a still-visible sentinel fires again.
    pub fn grow_succeeded(&mut self, direction: GrowDirection) {
        self.sentinels.rearm(direction);
    }

    /// Remember the content height just before a backward splice.
    pub fn record_prepend(&mut self, content_height_before: f32) {
        self.pending_prepend_height = Some(content_height_before);
    }

    /// Offset to apply once the prepended chapter is laid out.
    pub fn finish_prepend(&mut self, scroll_top: f32, content_height_after: f32) -> Option<f32> {
        let before = self.pending_prepend_height.take()?;
        let adjusted = preserve_scroll_on_prepend(scroll_top, before, content_height_after);
        debug!(
            scroll_top,
            adjusted,
            delta = content_height_after - before,
            "Compensated scroll for prepended chapter"
        );
        Some(adjusted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll_top: f32) -> Viewport {
        Viewport {
            scroll_top,
            width: 1024.0,
            height: 800.0,
            content_height: 4000.0,
        }
    }

    fn stacked(heights: &[(u32, f32)]) -> Vec<ChapterGeometry> {
        let mut top = 0.0;
        heights
            .iter()
            .map(|(chapter, height)| {
                let geometry = ChapterGeometry {
                    chapter: *chapter,
                    top,
                    height: *height,
                };
                top += height;
                geometry
            })
            .collect()
    }

    #[test]
    fn chapter_holding_the_reference_line_wins() {
        let chapters = stacked(&[(1, 1000.0), (2, 1000.0), (3, 2000.0)]);
        assert_eq!(current_chapter(&chapters, &viewport(0.0), 350.0), Some(1));
        assert_eq!(current_chapter(&chapters, &viewport(700.0), 350.0), Some(2));
        assert_eq!(current_chapter(&chapters, &viewport(1700.0), 350.0), Some(3));
    }

    #[test]
    fn short_chapter_above_the_line_falls_back_to_closest_top() {
        // Reference at 350 sits in the gap after a short chapter 1.
        let chapters = vec![
            ChapterGeometry {
                chapter: 1,
                top: 0.0,
                height: 100.0,
            },
            ChapterGeometry {
                chapter: 2,
                top: 400.0,
                height: 500.0,
            },
        ];
        assert_eq!(current_chapter(&chapters, &viewport(0.0), 350.0), Some(2));
    }

    #[test]
    fn nothing_mounted_yields_none() {
        assert_eq!(current_chapter(&[], &viewport(0.0), 350.0), None);
    }

    #[test]
    fn prepend_shifts_scroll_by_exactly_the_inserted_height() {
        let before = 3000.0;
        let inserted = 1234.5;
        let adjusted = preserve_scroll_on_prepend(640.0, before, before + inserted);
        assert_eq!(adjusted, 640.0 + inserted);

        let mut coordinator = ScrollCoordinator::new(ScrollSettings::default(), 5);
        coordinator.record_prepend(before);
        assert_eq!(
            coordinator.finish_prepend(640.0, before + inserted),
            Some(640.0 + inserted)
        );
        assert_eq!(coordinator.finish_prepend(640.0, before + inserted), None);
    }

    #[test]
    fn sentinels_fire_on_entry_only() {
        let mut watch = SentinelWatch::default();
        let near_end = viewport(3100.0);
        assert_eq!(watch.observe(&near_end, 200.0), vec![GrowDirection::Forward]);
        assert!(watch.observe(&near_end, 200.0).is_empty());

        let middle = viewport(1500.0);
        assert!(watch.observe(&middle, 200.0).is_empty());
        assert_eq!(watch.observe(&near_end, 200.0), vec![GrowDirection::Forward]);
    }

    #[test]
    fn rearm_lets_a_still_visible_sentinel_fire_again() {
        let mut watch = SentinelWatch::default();
        let at_top = viewport(0.0);
        assert_eq!(watch.observe(&at_top, 200.0), vec![GrowDirection::Backward]);
        assert!(watch.observe(&at_top, 200.0).is_empty());
        watch.rearm(GrowDirection::Backward);
        assert_eq!(watch.observe(&at_top, 200.0), vec![GrowDirection::Backward]);
    }

    #[test]
    fn unmeasured_content_triggers_nothing() {
        let mut watch = SentinelWatch::default();
        assert!(watch.observe(&Viewport::default(), 200.0).is_empty());
    }

    #[test]
    fn initial_scroll_is_skipped_for_first_verse_and_narrow_viewports() {
        assert!(InitialScroll::new(1, 1200.0, 768.0, 1).is_settled());
        assert!(InitialScroll::new(12, 500.0, 768.0, 1).is_settled());
        assert_eq!(
            InitialScroll::new(12, 1200.0, 768.0, 1).target_verse(),
            Some(12)
        );
    }

    #[test]
    fn initial_scroll_retries_then_gives_up() {
        let mut state = InitialScroll::new(12, 1200.0, 768.0, 1);
        assert_eq!(state.attempt(None), InitialScrollStep::RetryLater);
        assert!(!state.is_settled());
        assert_eq!(state.attempt(None), InitialScrollStep::GaveUp);
        assert!(state.is_settled());
        assert_eq!(state.attempt(Some(10.0)), InitialScrollStep::Idle);
    }

    #[test]
    fn backward_loading_waits_for_the_initial_scroll() {
        let mut coordinator = ScrollCoordinator::new(ScrollSettings::default(), 4);
        coordinator.begin_initial_scroll(9, 1200.0);
        assert!(!coordinator.backward_permitted());

        let observation = coordinator.observe(viewport(0.0), &stacked(&[(4, 4000.0)]));
        assert_eq!(observation.triggers, vec![GrowDirection::Backward]);

        assert_eq!(
            coordinator.initial_scroll_attempt(Some(0.0)),
            InitialScrollStep::ScrollTo(0.0)
        );
        assert!(coordinator.backward_permitted());
        let observation = coordinator.observe(viewport(0.0), &stacked(&[(4, 4000.0)]));
        assert_eq!(observation.triggers, vec![GrowDirection::Backward]);
    }

    #[test]
    fn observation_reports_chapter_changes_and_falls_back_to_initial() {
        let mut coordinator = ScrollCoordinator::new(ScrollSettings::default(), 7);
        let observation = coordinator.observe(viewport(1500.0), &[]);
        assert_eq!(observation.current_chapter, 7);
        assert!(!observation.chapter_changed);

        let chapters = stacked(&[(7, 1000.0), (8, 3000.0)]);
        let observation = coordinator.observe(viewport(1500.0), &chapters);
        assert_eq!(observation.current_chapter, 8);
        assert!(observation.chapter_changed);
        assert_eq!(coordinator.current_chapter(), 8);
    }
}
