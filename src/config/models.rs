use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_data_dir")]
    pub data_dir: String,
    #[serde(default = "crate::config::defaults::default_primary_db")]
    pub primary_db: String,
    #[serde(default = "crate::config::defaults::default_secondary_db")]
    pub secondary_db: String,
    #[serde(default = "crate::config::defaults::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "crate::config::defaults::default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_fetch_timeout_secs")]
    pub fetch_timeout_secs: f32,
    #[serde(default = "crate::config::defaults::default_reference_line_px")]
    pub reference_line_px: f32,
    #[serde(default = "crate::config::defaults::default_sentinel_threshold_px")]
    pub sentinel_threshold_px: f32,
    #[serde(default = "crate::config::defaults::default_mobile_breakpoint_px")]
    pub mobile_breakpoint_px: f32,
    #[serde(default = "crate::config::defaults::default_initial_scroll_retries")]
    pub initial_scroll_retries: u32,
    #[serde(default = "crate::config::defaults::default_initial_scroll_retry_delay_ms")]
    pub initial_scroll_retry_delay_ms: u64,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_hebrew_font_size")]
    pub hebrew_font_size: u32,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "crate::config::defaults::default_key_previous_verse")]
    pub key_previous_verse: String,
    #[serde(default = "crate::config::defaults::default_key_next_verse")]
    pub key_next_verse: String,
    #[serde(default = "crate::config::defaults::default_key_history_back")]
    pub key_history_back: String,
    #[serde(default = "crate::config::defaults::default_key_history_forward")]
    pub key_history_forward: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_theme")]
    pub key_toggle_theme: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: crate::config::defaults::default_data_dir(),
            primary_db: crate::config::defaults::default_primary_db(),
            secondary_db: crate::config::defaults::default_secondary_db(),
            api_base_url: crate::config::defaults::default_api_base_url(),
            bind_addr: crate::config::defaults::default_bind_addr(),
            log_level: crate::config::defaults::default_log_level(),
            fetch_timeout_secs: crate::config::defaults::default_fetch_timeout_secs(),
            reference_line_px: crate::config::defaults::default_reference_line_px(),
            sentinel_threshold_px: crate::config::defaults::default_sentinel_threshold_px(),
            mobile_breakpoint_px: crate::config::defaults::default_mobile_breakpoint_px(),
            initial_scroll_retries: crate::config::defaults::default_initial_scroll_retries(),
            initial_scroll_retry_delay_ms:
                crate::config::defaults::default_initial_scroll_retry_delay_ms(),
            font_size: crate::config::defaults::default_font_size(),
            hebrew_font_size: crate::config::defaults::default_hebrew_font_size(),
            theme: ThemeMode::default(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            history_limit: crate::config::defaults::default_history_limit(),
            key_previous_verse: crate::config::defaults::default_key_previous_verse(),
            key_next_verse: crate::config::defaults::default_key_next_verse(),
            key_history_back: crate::config::defaults::default_key_history_back(),
            key_history_forward: crate::config::defaults::default_key_history_forward(),
            key_toggle_theme: crate::config::defaults::default_key_toggle_theme(),
        }
    }
}

impl AppConfig {
    pub fn primary_db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.primary_db)
    }

    pub fn secondary_db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.secondary_db)
    }

    pub fn fetch_timeout(&self) -> Duration {
        if self.fetch_timeout_secs.is_finite() && self.fetch_timeout_secs > 0.0 {
            Duration::from_secs_f32(self.fetch_timeout_secs)
        } else {
            Duration::from_secs_f32(crate::config::defaults::default_fetch_timeout_secs())
        }
    }

    pub fn initial_scroll_retry_delay(&self) -> Duration {
        Duration::from_millis(self.initial_scroll_retry_delay_ms)
    }

    pub fn scroll_settings(&self) -> chouraqui_core::scroll::ScrollSettings {
        chouraqui_core::scroll::ScrollSettings {
            reference_line_px: self.reference_line_px.max(0.0),
            sentinel_threshold_px: self.sentinel_threshold_px.max(0.0),
            mobile_breakpoint_px: self.mobile_breakpoint_px.max(0.0),
            initial_scroll_retries: self.initial_scroll_retries,
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
