use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The mutation an audit row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(6))")]
pub enum HistoryAction {
    #[sea_orm(string_value = "create")]
    Create,
    #[sea_orm(string_value = "update")]
    Update,
    #[sea_orm(string_value = "delete")]
    Delete,
}

/// Immutable audit row. Written exactly once per successful item mutation
/// and never updated or deleted through any user-facing surface.
///
/// `item_id` intentionally carries no enforced foreign key: history rows
/// outlive the item they describe.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_histories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_id: Uuid,
    pub action: HistoryAction,
    pub timestamp: DateTimeUtc,
    pub actor: Option<Uuid>,
    #[sea_orm(column_type = "Text", nullable)]
    pub changes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
