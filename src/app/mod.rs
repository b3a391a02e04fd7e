mod layout;
mod messages;
mod state;
mod update;
mod view;

use crate::config::{AppConfig, ThemeMode};
use crate::data_source::VerseDataSource;
use crate::fetch_client::ChapterFetchClient;
use crate::loader::PageContext;
use state::App;
use iced::{Size, Theme, window};
use std::sync::Arc;

/// Launch the desktop reader on an already loaded reading context.
pub fn run_app(
    config: AppConfig,
    context: PageContext,
    client: ChapterFetchClient,
    source: Arc<VerseDataSource>,
) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("Chouraqui", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, context, client, source))
}
