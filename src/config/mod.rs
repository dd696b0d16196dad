//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::BASELINE_RATING;
use crate::mapping::SchemaVersion;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Where the season tables are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Local directory
    #[default]
    Fs,
    /// Static file server
    Http,
}

/// Asset source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Directory (fs) or base URL (http) the asset paths are resolved against
    #[serde(default = "default_root")]
    pub root: String,

    /// Request timeout in seconds (http only)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_root() -> String {
    "./assets".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            root: default_root(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Season configuration: table locations and aggregation constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonConfig {
    #[serde(default = "default_season_name")]
    pub name: String,

    /// Rating every trajectory is replayed from
    #[serde(default = "default_baseline")]
    pub baseline_rating: f64,

    #[serde(default = "default_ratings_path")]
    pub ratings_path: String,

    #[serde(default = "default_players_path")]
    pub players_path: String,

    #[serde(default = "default_placements_path")]
    pub placements_path: String,

    #[serde(default = "default_matches_path")]
    pub matches_path: String,

    /// Optional JSON prize table
    #[serde(default)]
    pub prize_table_path: Option<String>,

    /// Column layout of the tables
    #[serde(default)]
    pub schema: SchemaVersion,

    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_season_name() -> String {
    "CPT 2025".to_string()
}

fn default_baseline() -> f64 {
    BASELINE_RATING
}

fn default_ratings_path() -> String {
    "cpt_2025/player_ratings.tsv".to_string()
}

fn default_players_path() -> String {
    "cpt_2025/all_player.tsv".to_string()
}

fn default_placements_path() -> String {
    "cpt_2025/all_placements.tsv".to_string()
}

fn default_matches_path() -> String {
    "cpt_2025/all_matches.tsv".to_string()
}

fn default_delimiter() -> String {
    "\t".to_string()
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            name: default_season_name(),
            baseline_rating: default_baseline(),
            ratings_path: default_ratings_path(),
            players_path: default_players_path(),
            placements_path: default_placements_path(),
            matches_path: default_matches_path(),
            prize_table_path: None,
            schema: SchemaVersion::default(),
            delimiter: default_delimiter(),
        }
    }
}

impl SeasonConfig {
    /// The delimiter as a single character. Call after `validate`.
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(crate::table::TAB)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub season: SeasonConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            source: SourceConfig::default(),
            season: SeasonConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.season.baseline_rating.is_finite() {
            return Err(ConfigError::ValidationError(
                "Baseline rating must be a finite number".to_string(),
            ));
        }

        let paths = [
            ("ratings_path", &self.season.ratings_path),
            ("players_path", &self.season.players_path),
            ("placements_path", &self.season.placements_path),
            ("matches_path", &self.season.matches_path),
        ];
        for (name, path) in paths {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Season {} must not be empty",
                    name
                )));
            }
        }

        if self.season.delimiter.chars().count() != 1 {
            return Err(ConfigError::ValidationError(
                "Delimiter must be a single character".to_string(),
            ));
        }

        if self.source.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Source timeout must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.source.kind, SourceKind::Fs);
        assert_eq!(config.season.baseline_rating, 1500.0);
        assert_eq!(config.season.schema, SchemaVersion::Cpt2025);
        assert_eq!(config.season.delimiter_char(), '\t');
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_baseline() {
        let mut config = AppConfig::default();
        config.season.baseline_rating = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_path() {
        let mut config = AppConfig::default();
        config.season.matches_path = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_delimiter() {
        let mut config = AppConfig::default();
        config.season.delimiter = "::".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config = AppConfig::default();
        config.source.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [source]
            kind = "http"
            root = "https://example.com/assets/"

            [season]
            name = "CPT 2023"
            schema = "legacy2023"
            prize_table_path = "cpt_2023/prizes.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.source.timeout_seconds, 30);
        assert_eq!(config.season.schema, SchemaVersion::Legacy2023);
        assert_eq!(
            config.season.prize_table_path.as_deref(),
            Some("cpt_2023/prizes.json")
        );
        assert_eq!(config.season.ratings_path, "cpt_2025/player_ratings.tsv");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.season.matches_path, parsed.season.matches_path);
        assert_eq!(config.server.port, parsed.server.port);
    }
}
