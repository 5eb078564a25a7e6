use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-user notification. Visibility is strictly scoped to `user_id`;
/// every query path filters on it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub is_read: bool,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub timestamp: DateTimeUtc,
    pub user_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
