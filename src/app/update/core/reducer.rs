use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;

impl App {
    pub(in crate::app) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::Scrolled {
                scroll_top,
                viewport_width,
                viewport_height,
                content_height,
            } => self.handle_scrolled(
                scroll_top,
                viewport_width,
                viewport_height,
                content_height,
                &mut effects,
            ),
            Message::ChapterFetched { request, result } => {
                self.handle_chapter_fetched(request, result, &mut effects);
            }
            Message::InitialScrollTick { generation } => {
                self.handle_initial_scroll_tick(generation, &mut effects);
            }
            Message::VerseClicked(position) => self.handle_verse_clicked(position, &mut effects),
            Message::AdjacencyResolved { position, result } => {
                self.handle_adjacency_resolved(position, result);
            }
            Message::PreviousVerse => self.handle_previous_verse(&mut effects),
            Message::NextVerse => self.handle_next_verse(&mut effects),
            Message::GroupSelected(group) => self.handle_group_selected(group, &mut effects),
            Message::BookSelected(book) => self.handle_book_selected(book, &mut effects),
            Message::ChapterSelected(chapter) => {
                self.handle_chapter_selected(chapter, &mut effects);
            }
            Message::VerseSelected(verse) => self.handle_verse_selected(verse, &mut effects),
            Message::HistoryBack => self.handle_history_back(&mut effects),
            Message::HistoryForward => self.handle_history_forward(&mut effects),
            Message::ContextLoaded {
                result,
                record_history,
            } => self.handle_context_loaded(result, record_history, &mut effects),
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects);
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
        }

        effects
    }
}
