use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Board size the public opponent service plays on.
pub const SERVICE_BOARD_SIZE: usize = 4;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub opponent: OpponentConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: SERVICE_BOARD_SIZE,
        }
    }
}

/// Where and how to reach the move-suggestion service.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        OpponentConfig {
            base_url: "https://w0ayb2ph1k.execute-api.us-west-2.amazonaws.com/production"
                .to_string(),
            timeout_ms: 5_000,
            use_system_proxy: true,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Log destination. The terminal belongs to the UI, so without a file
    /// logs are dropped.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: Some(PathBuf::from("drop-token.log")),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.board_size == 0 {
            return Err(ConfigError::Validation(
                "game.board_size must be >= 1".into(),
            ));
        }
        if self.opponent.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "opponent.timeout_ms must be > 0".into(),
            ));
        }
        if let Err(e) = reqwest::Url::parse(&self.opponent.base_url) {
            return Err(ConfigError::Validation(format!(
                "opponent.base_url is not a valid URL: {e}"
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.board_size, 4);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[opponent]
timeout_ms = 250
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.opponent.timeout_ms, 250);
        assert_eq!(config.opponent.base_url, OpponentConfig::default().base_url);
        assert_eq!(config.game.board_size, 4);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.game.board_size, GameConfig::default().board_size);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validation_rejects_zero_board_size() {
        let mut config = AppConfig::default();
        config.game.board_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_large_board() {
        let mut config = AppConfig::default();
        config.game.board_size = 24;
        config.validate().expect("any size from 1 up is playable");
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.opponent.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let mut config = AppConfig::default();
        config.opponent.base_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.board_size, 4);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drop_token.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
board_size = 5

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.board_size, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.opponent.timeout_ms, 5_000);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\nboard_size = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
