use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No s'ha pogut llegir la configuració: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Configuració no vàlida: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("No s'ha pogut desar la configuració: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub database: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    /// Colored dots drawn under a day number, one per event.
    pub max_event_dots: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("op-agenda")
                .join("agenda.db"),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            max_event_dots: 3,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("op-agenda")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_draws_three_dots() {
        let config = Config::default();
        assert_eq!(config.ui.max_event_dots, 3);
    }

    #[test]
    fn default_database_lives_under_op_agenda() {
        let config = Config::default();
        assert!(config.storage.database.ends_with("op-agenda/agenda.db"));
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [storage]
            database = "/tmp/agenda.db"

            [ui]
            theme = "midnight"
            max_event_dots = 5
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.storage.database, PathBuf::from("/tmp/agenda.db"));
        assert_eq!(config.ui.theme, "midnight");
        assert_eq!(config.ui.max_event_dots, 5);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let config = Config::from_toml("[ui]\ntheme = \"dracula\"\nmax_event_dots = 2\n").unwrap();

        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.ui.theme, "dracula");
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = Config::from_toml("[ui]\ntheme = \"contrast\"\n").unwrap();

        assert_eq!(config.ui.theme, "contrast");
        assert_eq!(config.ui.max_event_dots, 3);
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn serialized_default_parses_back() {
        let content = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(Config::from_toml(&content).unwrap(), Config::default());
    }
}
