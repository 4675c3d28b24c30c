//! Category entity <-> model mapper

use forum_core::entities::Category;
use forum_core::value_objects::{LocalizedText, Snowflake};

use crate::models::CategoryModel;

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: Snowflake::new(model.id),
            name: LocalizedText::new(model.name_en, model.name_de),
            description: LocalizedText::new(model.description_en, model.description_de),
            slug: model.slug,
            position: model.position,
            color: model.color,
            icon: model.icon,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
