use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

pub(crate) const HEADER_FONT_SIZE_PX: f32 = 22.0;
pub(crate) const VERSE_NUMBER_FONT_SIZE_PX: f32 = 13.0;
pub(crate) const STATUS_FONT_SIZE_PX: f32 = 14.0;
pub(crate) const MISSING_SECONDARY_GLYPH: &str = "—";
pub(crate) static READER_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("reader-scroll"));
