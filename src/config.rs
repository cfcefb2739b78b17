use serde::{Deserialize, Serialize};

use crate::calendar::CalendarConfig;

/// Top-level forecaster configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// In-game seconds per day. Stock servers use 1200; some deployments
    /// run modded 1800-second days. Never assume either — read it here.
    #[serde(default = "default_day_length")]
    pub day_length: f64,
}

fn default_day_length() -> f64 {
    1200.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            day_length: default_day_length(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.game.day_length, 1200.0);
        assert!(!config.calendar.api.enabled);
        assert!(!config.calendar.manual.enabled);
    }

    #[test]
    fn partial_config_overrides_day_length() {
        let config: Config = toml::from_str("[game]\nday_length = 1800.0\n").unwrap();
        assert_eq!(config.game.day_length, 1800.0);
    }

    #[test]
    fn calendar_section_parses_dates() {
        let toml_src = r#"
[calendar]
server_start_date = "2026-05-01T00:00:00Z"

[calendar.api]
enabled = true
endpoint = "https://example.com/day"

[calendar.manual]
enabled = true
start_day = 120
start_date = "2026-07-15T18:30:00Z"
"#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert!(config.calendar.api.enabled);
        assert_eq!(config.calendar.api.endpoint, "https://example.com/day");
        assert_eq!(config.calendar.manual.start_day, 120);
        assert_eq!(
            config.calendar.server_start_date.to_rfc3339(),
            "2026-05-01T00:00:00+00:00"
        );
    }
}
