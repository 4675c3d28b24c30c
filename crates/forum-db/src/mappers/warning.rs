//! Warning entity <-> model mapper

use forum_core::entities::Warning;
use forum_core::value_objects::Snowflake;

use crate::models::WarningModel;

impl From<WarningModel> for Warning {
    fn from(model: WarningModel) -> Self {
        Warning {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            reason: model.reason,
            issued_by: Snowflake::new(model.issued_by),
            issued_at: model.issued_at,
        }
    }
}
