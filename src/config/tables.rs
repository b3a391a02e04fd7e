use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use serde::Deserialize;

/// On-disk layout of `conf/config.toml`: one table per concern.
#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    client: ClientConfig,
    #[serde(default)]
    scroll: ScrollConfig,
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            data_dir: tables.storage.data_dir,
            primary_db: tables.storage.primary_db,
            secondary_db: tables.storage.secondary_db,
            bind_addr: tables.server.bind_addr,
            api_base_url: tables.client.api_base_url,
            fetch_timeout_secs: tables.client.fetch_timeout_secs,
            history_limit: tables.client.history_limit,
            reference_line_px: tables.scroll.reference_line_px,
            sentinel_threshold_px: tables.scroll.sentinel_threshold_px,
            mobile_breakpoint_px: tables.scroll.mobile_breakpoint_px,
            initial_scroll_retries: tables.scroll.initial_scroll_retries,
            initial_scroll_retry_delay_ms: tables.scroll.initial_scroll_retry_delay_ms,
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            hebrew_font_size: tables.appearance.hebrew_font_size,
            window_width: tables.appearance.window_width,
            window_height: tables.appearance.window_height,
            log_level: tables.logging.log_level,
            key_previous_verse: tables.keys.previous_verse,
            key_next_verse: tables.keys.next_verse,
            key_history_back: tables.keys.history_back,
            key_history_forward: tables.keys.history_forward,
            key_toggle_theme: tables.keys.toggle_theme,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            storage: StorageConfig {
                data_dir: config.data_dir.clone(),
                primary_db: config.primary_db.clone(),
                secondary_db: config.secondary_db.clone(),
            },
            server: ServerConfig {
                bind_addr: config.bind_addr.clone(),
            },
            client: ClientConfig {
                api_base_url: config.api_base_url.clone(),
                fetch_timeout_secs: config.fetch_timeout_secs,
                history_limit: config.history_limit,
            },
            scroll: ScrollConfig {
                reference_line_px: config.reference_line_px,
                sentinel_threshold_px: config.sentinel_threshold_px,
                mobile_breakpoint_px: config.mobile_breakpoint_px,
                initial_scroll_retries: config.initial_scroll_retries,
                initial_scroll_retry_delay_ms: config.initial_scroll_retry_delay_ms,
            },
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                hebrew_font_size: config.hebrew_font_size,
                window_width: config.window_width,
                window_height: config.window_height,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                previous_verse: config.key_previous_verse.clone(),
                next_verse: config.key_next_verse.clone(),
                history_back: config.key_history_back.clone(),
                history_forward: config.key_history_forward.clone(),
                toggle_theme: config.key_toggle_theme.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct StorageConfig {
    #[serde(default = "defaults::default_data_dir")]
    data_dir: String,
    #[serde(default = "defaults::default_primary_db")]
    primary_db: String,
    #[serde(default = "defaults::default_secondary_db")]
    secondary_db: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: defaults::default_data_dir(),
            primary_db: defaults::default_primary_db(),
            secondary_db: defaults::default_secondary_db(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ServerConfig {
    #[serde(default = "defaults::default_bind_addr")]
    bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: defaults::default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ClientConfig {
    #[serde(default = "defaults::default_api_base_url")]
    api_base_url: String,
    #[serde(default = "defaults::default_fetch_timeout_secs")]
    fetch_timeout_secs: f32,
    #[serde(default = "defaults::default_history_limit")]
    history_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: defaults::default_api_base_url(),
            fetch_timeout_secs: defaults::default_fetch_timeout_secs(),
            history_limit: defaults::default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ScrollConfig {
    #[serde(default = "defaults::default_reference_line_px")]
    reference_line_px: f32,
    #[serde(default = "defaults::default_sentinel_threshold_px")]
    sentinel_threshold_px: f32,
    #[serde(default = "defaults::default_mobile_breakpoint_px")]
    mobile_breakpoint_px: f32,
    #[serde(default = "defaults::default_initial_scroll_retries")]
    initial_scroll_retries: u32,
    #[serde(default = "defaults::default_initial_scroll_retry_delay_ms")]
    initial_scroll_retry_delay_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        ScrollConfig {
            reference_line_px: defaults::default_reference_line_px(),
            sentinel_threshold_px: defaults::default_sentinel_threshold_px(),
            mobile_breakpoint_px: defaults::default_mobile_breakpoint_px(),
            initial_scroll_retries: defaults::default_initial_scroll_retries(),
            initial_scroll_retry_delay_ms: defaults::default_initial_scroll_retry_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_hebrew_font_size")]
    hebrew_font_size: u32,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            hebrew_font_size: defaults::default_hebrew_font_size(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_previous_verse")]
    previous_verse: String,
    #[serde(default = "defaults::default_key_next_verse")]
    next_verse: String,
    #[serde(default = "defaults::default_key_history_back")]
    history_back: String,
    #[serde(default = "defaults::default_key_history_forward")]
    history_forward: String,
    #[serde(default = "defaults::default_key_toggle_theme")]
    toggle_theme: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            previous_verse: defaults::default_key_previous_verse(),
            next_verse: defaults::default_key_next_verse(),
            history_back: defaults::default_key_history_back(),
            history_forward: defaults::default_key_history_forward(),
            toggle_theme: defaults::default_key_toggle_theme(),
        }
    }
}
