// File: src/message.rs
// Purpose: Error message identifiers and translation catalogs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// An error message as emitted by the engine.
///
/// Either literal display text or a translation key resolved later by a
/// [`Translate`] implementation. The engine never resolves keys itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MessageRepr")]
pub enum Message {
    Text(String),
    Key(String),
}

/// Documents may spell a literal message as a bare string
#[derive(Deserialize)]
#[serde(untagged)]
enum MessageRepr {
    Plain(String),
    Tagged(TaggedMessage),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum TaggedMessage {
    Text(String),
    Key(String),
}

impl From<MessageRepr> for Message {
    fn from(repr: MessageRepr) -> Self {
        match repr {
            MessageRepr::Plain(text) | MessageRepr::Tagged(TaggedMessage::Text(text)) => {
                Message::Text(text)
            }
            MessageRepr::Tagged(TaggedMessage::Key(key)) => Message::Key(key),
        }
    }
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text(text.into())
    }

    pub fn key(key: impl Into<String>) -> Self {
        Message::Key(key.into())
    }

    /// Stable identifier: the literal text or the translation key
    pub fn id(&self) -> &str {
        match self {
            Message::Text(s) | Message::Key(s) => s,
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Message::Key(_))
    }

    /// Resolve to display text. Unknown keys render as the key itself.
    pub fn render(&self, translator: &dyn Translate) -> String {
        match self {
            Message::Text(text) => text.clone(),
            Message::Key(key) => translator.translate(key).unwrap_or_else(|| key.clone()),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::text(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

/// Maps translation keys to display strings
pub trait Translate {
    fn translate(&self, key: &str) -> Option<String>;
}

/// Translator that knows no keys; every key renders as itself
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate(&self, _key: &str) -> Option<String> {
        None
    }
}

// Bundled catalogs
const BUILTIN_LOCALES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.toml")),
    ("de", include_str!("../locales/de.toml")),
];

/// Flat key → text catalog for one locale.
///
/// Loaded from TOML where nested tables become dotted keys:
///
/// ```toml
/// [FormError]
/// FirstNameRequired = "First name is required"
/// ```
///
/// yields `FormError.FirstNameRequired`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    locale: String,
    entries: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn from_toml_str(locale: impl Into<String>, content: &str) -> Result<Self> {
        let locale = locale.into();
        let table: toml::Table = toml::from_str(content)
            .with_context(|| format!("Failed to parse catalog for locale {:?}", locale))?;

        let mut catalog = Self::new(locale);
        flatten_into(&mut catalog.entries, "", &table);
        Ok(catalog)
    }

    /// Load `<dir>/<locale>.toml`
    pub fn load(dir: impl AsRef<Path>, locale: &str) -> Result<Self> {
        let path = dir.as_ref().join(format!("{}.toml", locale));
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        Self::from_toml_str(locale, &content)
    }

    /// Catalog bundled with the crate, if one exists for `locale`
    pub fn builtin(locale: &str) -> Option<Self> {
        BUILTIN_LOCALES
            .iter()
            .find(|(name, _)| *name == locale)
            .and_then(|(name, content)| Self::from_toml_str(*name, content).ok())
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fill keys missing here from `fallback`
    pub fn with_fallback(mut self, fallback: &Catalog) -> Self {
        for (key, text) in &fallback.entries {
            self.entries
                .entry(key.clone())
                .or_insert_with(|| text.clone());
        }
        self
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

fn flatten_into(out: &mut BTreeMap<String, String>, prefix: &str, table: &toml::Table) {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };

        match value {
            toml::Value::Table(nested) => flatten_into(out, &key, nested),
            toml::Value::String(text) => {
                out.insert(key, text.clone());
            }
            other => {
                out.insert(key, other.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_tables_flatten_to_dotted_keys() {
        let catalog = Catalog::from_toml_str(
            "en",
            r#"
            SomeText = "Hello"
            [FormError]
            FirstNameRequired = "First name is required"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.get("SomeText"), Some("Hello"));
        assert_eq!(
            catalog.get("FormError.FirstNameRequired"),
            Some("First name is required")
        );
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_render_falls_back_to_key() {
        let catalog = Catalog::new("en");
        assert_eq!(Message::key("FormError.Missing").render(&catalog), "FormError.Missing");
        assert_eq!(Message::text("Literal").render(&catalog), "Literal");
    }

    #[test]
    fn test_builtin_catalogs() {
        let en = Catalog::builtin("en").unwrap();
        let de = Catalog::builtin("de").unwrap();
        assert_eq!(en.get("FormError.FirstNameRequired"), Some("First name is required"));
        assert_eq!(de.get("FormError.FirstNameRequired"), Some("Vorname ist erforderlich"));
        assert!(Catalog::builtin("xx").is_none());
    }

    #[test]
    fn test_fallback_fills_missing_keys() {
        let mut primary = Catalog::new("de");
        primary.insert("A", "de-a");
        let mut fallback = Catalog::new("en");
        fallback.insert("A", "en-a");
        fallback.insert("B", "en-b");

        let merged = primary.with_fallback(&fallback);
        assert_eq!(merged.get("A"), Some("de-a"));
        assert_eq!(merged.get("B"), Some("en-b"));
    }

    #[test]
    fn test_message_deserializes_plain_or_tagged() {
        let plain: Message = serde_json::from_str(r#""Required""#).unwrap();
        let key: Message = serde_json::from_str(r#"{"key": "FormError.X"}"#).unwrap();
        let text: Message = serde_json::from_str(r#"{"text": "Y"}"#).unwrap();
        assert_eq!(plain, Message::text("Required"));
        assert_eq!(key, Message::key("FormError.X"));
        assert_eq!(text, Message::text("Y"));
    }
}
