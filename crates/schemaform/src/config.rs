// File: src/config.rs
// Purpose: Configuration parsing from schemaform.toml

use crate::message::Catalog;
use crate::session::ValidationMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub i18n: I18nConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    /// `on-submit` or `on-change`
    #[serde(default)]
    pub mode: ValidationMode,
}

/// Message translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_locale")]
    pub fallback_locale: String,

    /// Directory with `<locale>.toml` catalogs. Bundled catalogs are used when unset.
    #[serde(default)]
    pub locales_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,

    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            fallback_locale: default_locale(),
            locales_dir: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            color: true,
        }
    }
}

impl I18nConfig {
    /// Catalog for `locale` with missing keys taken from the fallback locale
    pub fn catalog(&self, locale: &str) -> Result<Catalog> {
        let primary = self.load_catalog(locale)?;
        if locale == self.fallback_locale {
            return Ok(primary);
        }

        let fallback = self.load_catalog(&self.fallback_locale)?;
        Ok(primary.with_fallback(&fallback))
    }

    fn load_catalog(&self, locale: &str) -> Result<Catalog> {
        match &self.locales_dir {
            Some(dir) => Catalog::load(dir, locale),
            None => Catalog::builtin(locale)
                .with_context(|| format!("No bundled catalog for locale {:?}", locale)),
        }
    }
}

impl Config {
    /// Load configuration from schemaform.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./schemaform.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("schemaform.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.validation.mode, ValidationMode::OnSubmit);
        assert_eq!(config.i18n.locale, "en");
        assert!(config.i18n.locales_dir.is_none());
        assert!(config.output.pretty);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [validation]
            mode = "on-change"

            [i18n]
            locale = "de"
            "#,
        )
        .unwrap();

        assert_eq!(config.validation.mode, ValidationMode::OnChange);
        assert_eq!(config.i18n.locale, "de");
        assert_eq!(config.i18n.fallback_locale, "en");
        assert!(config.output.color);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("does/not/exist/schemaform.toml").unwrap();
        assert_eq!(config.i18n.locale, "en");
    }

    #[test]
    fn test_catalog_with_fallback() {
        let i18n = I18nConfig {
            locale: "de".to_string(),
            ..I18nConfig::default()
        };
        let catalog = i18n.catalog("de").unwrap();
        assert_eq!(catalog.get("FormError.LastNameRequired"), Some("Nachname ist erforderlich"));
        assert!(i18n.catalog("xx").is_err());
    }
}
