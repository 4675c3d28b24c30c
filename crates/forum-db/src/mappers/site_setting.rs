//! Site setting entity <-> model mapper

use forum_core::entities::{SettingScope, SettingValue, SiteSetting};
use forum_core::error::DomainError;
use forum_core::traits::RepoResult;

use crate::models::SiteSettingModel;

/// Convert a stored setting row into the domain entity
pub fn setting_from_model(model: SiteSettingModel) -> RepoResult<SiteSetting> {
    let scope = SettingScope::parse(&model.scope).ok_or_else(|| {
        DomainError::InternalError(format!(
            "unknown setting scope for key {}: {}",
            model.key, model.scope
        ))
    })?;

    let value: SettingValue = serde_json::from_value(model.value).map_err(|e| {
        DomainError::InternalError(format!("malformed setting value for key {}: {e}", model.key))
    })?;

    Ok(SiteSetting {
        key: model.key,
        value,
        scope,
        updated_at: model.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_plain_and_bilingual_values_map() {
        let plain = SiteSettingModel {
            key: "accent_color".to_string(),
            value: json!("#ff8800"),
            scope: "public".to_string(),
            updated_at: Utc::now(),
        };
        let setting = setting_from_model(plain).unwrap();
        assert_eq!(setting.value, SettingValue::Text("#ff8800".to_string()));

        let bilingual = SiteSettingModel {
            key: "site_name".to_string(),
            value: json!({"en": "My Forum", "de": "Mein Forum"}),
            scope: "public".to_string(),
            updated_at: Utc::now(),
        };
        let setting = setting_from_model(bilingual).unwrap();
        assert!(matches!(setting.value, SettingValue::Localized(_)));
    }

    #[test]
    fn test_unknown_scope_is_rejected() {
        let row = SiteSettingModel {
            key: "x".to_string(),
            value: json!("y"),
            scope: "secret".to_string(),
            updated_at: Utc::now(),
        };
        assert!(setting_from_model(row).is_err());
    }
}
