//! Configuration file handling.
//!
//! Settings live in a TOML file under the platform config directory
//! (`~/.config/lumo/config.toml` on Linux). A missing file yields the
//! defaults; a malformed file is an error rather than a silent reset.

use std::path::PathBuf;

use directories::ProjectDirs;
use lumo_core::AnimationConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Persistent user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Animation variant to start with.
    pub variant: String,
    /// Speed multiplier.
    pub speed: f64,
    /// Base color specification; empty keeps the variant default.
    pub color: String,
    /// Expression source for the custom variant.
    pub custom_code: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: "waves".to_string(),
            speed: 1.0,
            color: String::new(),
            custom_code: None,
        }
    }
}

impl Settings {
    /// Load settings from the platform config file, falling back to the
    /// defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Self::parse(&raw).map_err(|source| ConfigError::Parse { path, source }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Parse settings from TOML text.
    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// The platform config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("rs", "lumo", "lumo").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The mount-time config these settings describe.
    pub fn to_animation_config(&self) -> AnimationConfig {
        AnimationConfig {
            variant: self.variant.clone(),
            speed: self.speed,
            color: self.color.clone(),
            custom_code: self.custom_code.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.variant, "waves");
        assert_eq!(settings.speed, 1.0);
        assert!(settings.color.is_empty());
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let settings = Settings::parse("variant = \"snowfall\"\nspeed = 1.5\n").unwrap();
        assert_eq!(settings.variant, "snowfall");
        assert_eq!(settings.speed, 1.5);
        assert_eq!(settings.color, "");
        assert_eq!(settings.custom_code, None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Settings::parse("variant = [nonsense").is_err());
    }

    #[test]
    fn test_to_animation_config() {
        let settings = Settings::parse(
            "variant = \"custom\"\ncolor = \"#112233\"\ncustom_code = \"sin(x + t)\"\n",
        )
        .unwrap();
        let config = settings.to_animation_config();
        assert_eq!(config.variant, "custom");
        assert_eq!(config.color, "#112233");
        assert_eq!(config.custom_code.as_deref(), Some("sin(x + t)"));
    }
}
