use chouraqui_core::history::DEFAULT_HISTORY_LIMIT;
use chouraqui_core::scroll::{
    DEFAULT_INITIAL_SCROLL_RETRIES, DEFAULT_MOBILE_BREAKPOINT_PX, DEFAULT_REFERENCE_LINE_PX,
    DEFAULT_SENTINEL_THRESHOLD_PX,
};

pub(crate) fn default_data_dir() -> String {
    "data".to_string()
}

pub(crate) fn default_primary_db() -> String {
    "Chouraqui.SQLite3".to_string()
}

pub(crate) fn default_secondary_db() -> String {
    "tanakh.bbl.mybible".to_string()
}

pub(crate) fn default_api_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

pub(crate) fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

pub(crate) fn default_fetch_timeout_secs() -> f32 {
    15.0
}

pub(crate) fn default_reference_line_px() -> f32 {
    DEFAULT_REFERENCE_LINE_PX
}

pub(crate) fn default_sentinel_threshold_px() -> f32 {
    DEFAULT_SENTINEL_THRESHOLD_PX
}

pub(crate) fn default_mobile_breakpoint_px() -> f32 {
    DEFAULT_MOBILE_BREAKPOINT_PX
}

pub(crate) fn default_initial_scroll_retries() -> u32 {
    DEFAULT_INITIAL_SCROLL_RETRIES
}

pub(crate) fn default_initial_scroll_retry_delay_ms() -> u64 {
    150
}

pub(crate) fn default_font_size() -> u32 {
    18
}

pub(crate) fn default_hebrew_font_size() -> u32 {
    22
}

pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    860.0
}

pub(crate) fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

pub(crate) fn default_key_previous_verse() -> String {
    "k".to_string()
}

pub(crate) fn default_key_next_verse() -> String {
    "j".to_string()
}

pub(crate) fn default_key_history_back() -> String {
    "ctrl+b".to_string()
}

pub(crate) fn default_key_history_forward() -> String {
    "ctrl+f".to_string()
}

pub(crate) fn default_key_toggle_theme() -> String {
    "t".to_string()
}
