use super::super::state::{App, BookOption, GroupOption};
use super::Effect;
use crate::loader::PageContext;
use chouraqui_core::adjacency::VerseAdjacency;
use chouraqui_core::crossref::group_for_book;
use chouraqui_core::links::EntryParams;
use chouraqui_core::model::VerseRef;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_verse_clicked(&mut self, position: VerseRef, effects: &mut Vec<Effect>) {
        if position == self.selection.position {
            return;
        }
        self.select_loaded_verse(position, true, effects);
    }

    pub(super) fn handle_adjacency_resolved(
        &mut self,
        position: VerseRef,
        result: Result<VerseAdjacency, String>,
    ) {
        if position != self.selection.position {
            debug!(%position, "Dropping adjacency for a verse no longer selected");
            return;
        }
        match result {
            Ok(adjacency) => self.selection.adjacency = Some(adjacency),
            Err(err) => warn!(%position, "Failed to resolve neighbouring verses: {err}"),
        }
    }

    pub(super) fn handle_previous_verse(&mut self, effects: &mut Vec<Effect>) {
        match self.selection.adjacency().and_then(VerseAdjacency::previous) {
            Some(target) => self.navigate_to(target, true, effects),
            None => debug!(position = %self.selection.position, "No previous verse"),
        }
    }

    pub(super) fn handle_next_verse(&mut self, effects: &mut Vec<Effect>) {
        match self.selection.adjacency().and_then(VerseAdjacency::next) {
            Some(target) => self.navigate_to(target, true, effects),
            None => debug!(position = %self.selection.position, "No next verse"),
        }
    }

    pub(super) fn handle_group_selected(&mut self, group: GroupOption, effects: &mut Vec<Effect>) {
        if group.0.key == self.context.group.key {
            return;
        }
        self.load_context(
            EntryParams {
                group: Some(group.0.key.to_string()),
                ..EntryParams::default()
            },
            true,
            effects,
        );
    }

    pub(super) fn handle_book_selected(&mut self, book: BookOption, effects: &mut Vec<Effect>) {
        if book.number == self.window.book() {
            return;
        }
        self.load_context(
            EntryParams {
                group: Some(group_for_book(book.number).key.to_string()),
                book: Some(book.number.to_string()),
                ..EntryParams::default()
            },
            true,
            effects,
        );
    }

    pub(super) fn handle_chapter_selected(&mut self, chapter: u32, effects: &mut Vec<Effect>) {
        let target = VerseRef::new(self.window.book(), chapter, 1);
        self.navigate_to(target, true, effects);
    }

    pub(super) fn handle_verse_selected(&mut self, verse: u32, effects: &mut Vec<Effect>) {
        let position = self.selection.position;
        let target = VerseRef::new(position.book, position.chapter, verse);
        self.navigate_to(target, true, effects);
    }

    pub(super) fn handle_history_back(&mut self, effects: &mut Vec<Effect>) {
        if let Some(target) = self.history.back() {
            self.navigate_to(target, false, effects);
        }
    }

    pub(super) fn handle_history_forward(&mut self, effects: &mut Vec<Effect>) {
        if let Some(target) = self.history.forward() {
            self.navigate_to(target, false, effects);
        }
    }

    pub(super) fn handle_context_loaded(
        &mut self,
        result: Result<Box<PageContext>, String>,
        record_history: bool,
        effects: &mut Vec<Effect>,
    ) {
        self.loading = false;
        let context = match result {
            Ok(context) => *context,
            Err(err) => {
                warn!("Failed to load reading context: {err}");
                self.error = Some(err);
                return;
            }
        };

        let position = context.position;
        info!(%position, group = context.group.key, "Reading context loaded");
        self.generation += 1;
        self.error = None;
        self.window
            .reset(position.book, context.seed.clone(), context.max_chapter);
        self.scroll.reset(position.chapter);
        self.selection.position = position;
        self.selection.adjacency = Some(context.adjacency);
        self.viewport.scroll_top = 0.0;
        self.viewport.content_height = None;
        self.context = context;
        if record_history {
            self.history.visit(position);
        }

        effects.push(Effect::ScrollTo(0.0));
        effects.push(Effect::SavePosition(position));
        self.start_reading_context(effects);
    }

    /// Select `target`, staying in the current window when it is already
    /// loaded and reseeding from the local corpus otherwise.
    fn navigate_to(&mut self, target: VerseRef, record_history: bool, effects: &mut Vec<Effect>) {
        let loaded = target.book == self.window.book()
            && self
                .window
                .chapter(target.chapter)
                .is_some_and(|chapter| chapter.primary_verse(target.verse).is_some());
        if loaded {
            self.select_loaded_verse(target, record_history, effects);
            self.scroll_to_loaded_verse(target.chapter, target.verse, effects);
        } else {
            self.load_context(EntryParams::for_position(target), record_history, effects);
        }
    }

    fn select_loaded_verse(
        &mut self,
        position: VerseRef,
        record_history: bool,
        effects: &mut Vec<Effect>,
    ) {
        debug!(%position, "Verse selected");
        self.selection.position = position;
        if record_history {
            self.history.visit(position);
        }
        effects.push(Effect::ResolveAdjacency(position));
        effects.push(Effect::SavePosition(position));
    }

    fn load_context(&mut self, params: EntryParams, record_history: bool, effects: &mut Vec<Effect>) {
        self.loading = true;
        self.error = None;
        effects.push(Effect::LoadContext {
            params,
            record_history,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::messages::Message;
    use super::super::super::state::test_support::reader_at;
    use super::*;
    use crate::loader::load_page_context;
    use iced::keyboard::{Key, Modifiers};

    #[test]
    fn next_verse_inside_the_window_stays_in_place() {
        let (mut app, _) = reader_at("nav-next", VerseRef::new(10, 1, 1));
        let effects = app.reduce(Message::NextVerse);

        let target = VerseRef::new(10, 1, 2);
        assert_eq!(app.selection.position, target);
        assert!(app.selection.adjacency().is_none());
        assert!(effects.contains(&Effect::ResolveAdjacency(target)));
        assert!(effects.contains(&Effect::SavePosition(target)));
        assert!(effects.iter().any(|effect| matches!(effect, Effect::ScrollTo(_))));
        assert!(!effects.iter().any(|effect| matches!(effect, Effect::LoadContext { .. })));
        assert!(app.history.can_go_back());
    }

    #[test]
    fn next_verse_past_the_window_reloads_the_context() {
        let (mut app, _) = reader_at("nav-reload", VerseRef::new(10, 1, 3));
        let effects = app.reduce(Message::NextVerse);

        let target = VerseRef::new(10, 2, 1);
        assert_eq!(
            effects,
            vec![Effect::LoadContext {
                params: EntryParams::for_position(target),
                record_history: true,
            }]
        );
        assert!(app.loading);

        let context = load_page_context(&app.source, &EntryParams::for_position(target))
            .expect("load")
            .expect("context");
        let effects = app.reduce(Message::ContextLoaded {
            result: Ok(Box::new(context)),
            record_history: true,
        });
        assert!(!app.loading);
        assert_eq!(app.generation, 1);
        assert_eq!(app.window.chapter_numbers(), vec![2]);
        assert_eq!(app.selection.position, target);
        assert_eq!(effects[0], Effect::ScrollTo(0.0));
        assert!(effects.contains(&Effect::SavePosition(target)));
        assert_eq!(app.history.current(), Some(target));
    }

    #[test]
    fn failed_context_load_keeps_the_current_window() {
        let (mut app, _) = reader_at("nav-failed", VerseRef::new(10, 1, 1));
        app.loading = true;
        let effects = app.reduce(Message::ContextLoaded {
            result: Err("database is locked".to_string()),
            record_history: true,
        });
        assert!(effects.is_empty());
        assert!(!app.loading);
        assert_eq!(app.error.as_deref(), Some("database is locked"));
        assert_eq!(app.window.chapter_numbers(), vec![1]);
    }

    #[test]
    fn history_walks_back_and_forward_without_recording() {
        let (mut app, _) = reader_at("nav-history", VerseRef::new(10, 1, 1));
        app.reduce(Message::VerseClicked(VerseRef::new(10, 1, 3)));
        assert_eq!(app.history.len(), 2);

        app.reduce(Message::HistoryBack);
        assert_eq!(app.selection.position, VerseRef::new(10, 1, 1));
        assert!(app.history.can_go_forward());

        app.reduce(Message::HistoryForward);
        assert_eq!(app.selection.position, VerseRef::new(10, 1, 3));
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn adjacency_for_an_old_selection_is_dropped() {
        let (mut app, _) = reader_at("nav-adjacency", VerseRef::new(10, 1, 1));
        app.reduce(Message::VerseClicked(VerseRef::new(10, 1, 2)));
        let stale = app.context.adjacency;
        app.reduce(Message::AdjacencyResolved {
            position: VerseRef::new(10, 1, 1),
            result: Ok(stale),
        });
        assert!(app.selection.adjacency().is_none());
    }

    #[test]
    fn keyboard_shortcut_moves_to_the_next_verse() {
        let (mut app, _) = reader_at("nav-keys", VerseRef::new(10, 1, 1));
        app.reduce(Message::KeyPressed {
            key: Key::Character("j".into()),
            modifiers: Modifiers::empty(),
        });
        assert_eq!(app.selection.position, VerseRef::new(10, 1, 2));
    }
}
