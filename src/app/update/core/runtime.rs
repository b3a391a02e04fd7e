use super::super::super::messages::Message;
use super::super::super::state::{App, READER_SCROLL_ID};
use super::super::Effect;
use crate::cache::save_last_position;
use crate::loader::{load_page_context, resolve_adjacency};
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;
use tracing::info;

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchChapter(request) => {
                let client = self.client.clone();
                Task::perform(
                    async move {
                        let result = client.fetch_chapter(request.book, request.chapter).await;
                        Message::ChapterFetched { request, result }
                    },
                    |message| message,
                )
            }
            Effect::ScrollTo(y) => {
                scrollable::scroll_to(READER_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y })
            }
            Effect::ScheduleInitialScroll { generation, delay } => Task::perform(
                async move {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    Message::InitialScrollTick { generation }
                },
                |message| message,
            ),
            Effect::LoadContext {
                params,
                record_history,
            } => {
                let source = self.source.clone();
                info!(?params, "Dispatching reading context load");
                Task::perform(
                    async move {
                        let loaded =
                            tokio::task::spawn_blocking(move || load_page_context(&source, &params))
                                .await;
                        let result = match loaded {
                            Ok(Ok(Some(context))) => Ok(Box::new(context)),
                            Ok(Ok(None)) => Err("Le corpus ne contient aucun verset".to_string()),
                            Ok(Err(err)) => Err(format!("{err:#}")),
                            Err(err) => Err(err.to_string()),
                        };
                        Message::ContextLoaded {
                            result,
                            record_history,
                        }
                    },
                    |message| message,
                )
            }
            Effect::ResolveAdjacency(position) => {
                let source = self.source.clone();
                Task::perform(
                    async move {
                        let resolved =
                            tokio::task::spawn_blocking(move || resolve_adjacency(&source, position))
                                .await;
                        let result = match resolved {
                            Ok(Ok(adjacency)) => Ok(adjacency),
                            Ok(Err(err)) => Err(format!("{err:#}")),
                            Err(err) => Err(err.to_string()),
                        };
                        Message::AdjacencyResolved { position, result }
                    },
                    |message| message,
                )
            }
            Effect::SavePosition(position) => {
                save_last_position(position);
                Task::none()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
