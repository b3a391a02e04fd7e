use super::super::state::App;
use super::Effect;
use crate::config::ThemeMode;
use tracing::debug;

impl App {
    pub(super) fn handle_toggle_theme(&mut self) {
        self.config.theme = match self.config.theme {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        };
        debug!(theme = %self.config.theme, "Toggled theme");
    }

    pub(super) fn handle_window_resized(&mut self, width: f32, height: f32, effects: &mut Vec<Effect>) {
        if (width - self.viewport.width).abs() < f32::EPSILON
            && (height - self.viewport.height).abs() < f32::EPSILON
        {
            return;
        }
        debug!(width, height, "Window resized");
        self.viewport.width = width;
        self.viewport.height = height;
        // Wrapping changes with the width, so the old measurement is void.
        self.viewport.content_height = None;
        self.refresh_scroll(effects);
    }
}
