//! Bilingual text values for the English/German forum surface

use serde::{Deserialize, Serialize};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

/// A text value carried in both languages
///
/// German falls back to English when empty, so seeding a category with only
/// an English name is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default)]
    pub de: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, de: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            de: de.into(),
        }
    }

    /// English-only value; German falls back to English on lookup
    pub fn english(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            de: String::new(),
        }
    }

    /// Resolve for a language, falling back to English
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::De => {
                if self.de.is_empty() {
                    &self.en
                } else {
                    &self.de
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.de.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let text = LocalizedText::new("General", "Allgemein");
        assert_eq!(text.get(Language::En), "General");
        assert_eq!(text.get(Language::De), "Allgemein");

        let english_only = LocalizedText::english("Announcements");
        assert_eq!(english_only.get(Language::De), "Announcements");
    }

    #[test]
    fn test_serde_shape() {
        let text = LocalizedText::new("Rules", "Regeln");
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["en"], "Rules");
        assert_eq!(json["de"], "Regeln");

        // Missing "de" deserializes as empty
        let partial: LocalizedText = serde_json::from_str(r#"{"en":"Rules"}"#).unwrap();
        assert_eq!(partial.de, "");
    }
}
