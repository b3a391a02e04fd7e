use super::models::AppConfig;
use super::tables::ConfigTables;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from disk, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str::<ConfigTables>(contents).map(AppConfig::from)
}

pub fn serialize_config(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&ConfigTables::from(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};

    #[test]
    fn empty_file_yields_defaults() {
        let parsed = parse_config("").expect("empty config parses");
        assert_eq!(parsed, AppConfig::default());
        assert_eq!(parsed.fetch_timeout_secs, 15.0);
        assert_eq!(parsed.reference_line_px, 350.0);
        assert_eq!(parsed.mobile_breakpoint_px, 768.0);
    }

    #[test]
    fn tables_override_individual_fields() {
        let parsed = parse_config(
            r#"
            [storage]
            data_dir = "/srv/bible"

            [scroll]
            reference_line_px = 120.0

            [appearance]
            theme = "night"

            [logging]
            log_level = "debug"
            "#,
        )
        .expect("config parses");

        assert_eq!(parsed.data_dir, "/srv/bible");
        assert_eq!(parsed.primary_db, "Chouraqui.SQLite3");
        assert_eq!(parsed.reference_line_px, 120.0);
        assert_eq!(parsed.sentinel_threshold_px, 200.0);
        assert_eq!(parsed.theme, ThemeMode::Night);
        assert_eq!(parsed.log_level, LogLevel::Debug);
        assert!(parsed.primary_db_path().ends_with("Chouraqui.SQLite3"));
    }

    #[test]
    fn unknown_enum_value_is_an_error() {
        assert!(parse_config("[logging]\nlog_level = \"loud\"").is_err());
    }

    #[test]
    fn serialized_config_reads_back() {
        let mut config = AppConfig::default();
        config.history_limit = 7;
        config.api_base_url = "http://reader.local".to_string();
        let text = serialize_config(&config).expect("serialize");
        assert_eq!(parse_config(&text).expect("parse"), config);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let loaded = load_config(Path::new("/nonexistent/chouraqui/config.toml"));
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn non_positive_timeout_uses_default() {
        let mut config = AppConfig::default();
        config.fetch_timeout_secs = 0.0;
        assert_eq!(config.fetch_timeout().as_secs(), 15);
    }
}
