//! Site setting entity - branding and customization key/value pairs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::LocalizedText;

/// Visibility scope of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingScope {
    /// Served to anonymous visitors (branding, colors, site name)
    #[default]
    Public,
    /// Admin surface only
    Admin,
}

impl SettingScope {
    pub fn as_str(self) -> &'static str {
        match self {
            SettingScope::Public => "public",
            SettingScope::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Self::Public),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// A setting value: plain string or bilingual text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    Localized(LocalizedText),
}

/// One site setting row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSetting {
    pub key: String,
    pub value: SettingValue,
    pub scope: SettingScope,
    pub updated_at: DateTime<Utc>,
}

impl SiteSetting {
    pub fn new(key: String, value: SettingValue, scope: SettingScope) -> Self {
        Self {
            key,
            value,
            scope,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_serde_untagged() {
        let plain: SettingValue = serde_json::from_str("\"#ff8800\"").unwrap();
        assert_eq!(plain, SettingValue::Text("#ff8800".to_string()));

        let bilingual: SettingValue =
            serde_json::from_str(r#"{"en":"My Forum","de":"Mein Forum"}"#).unwrap();
        assert!(matches!(bilingual, SettingValue::Localized(_)));
    }

    #[test]
    fn test_scope_roundtrip() {
        assert_eq!(SettingScope::parse("public"), Some(SettingScope::Public));
        assert_eq!(SettingScope::parse("admin"), Some(SettingScope::Admin));
        assert_eq!(SettingScope::parse("secret"), None);
    }
}
