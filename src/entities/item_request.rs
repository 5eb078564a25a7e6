use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Item request lifecycle. `Accepted` and `Rejected` are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum RequestStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Accepted")]
    Accepted,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Accepted | RequestStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub manufacturer: String,
    pub model_part_num: String,
    pub quantity_requested: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub unit_price: Decimal,
    pub requested_by: Uuid,
    pub timestamp: DateTimeUtc,
    pub status: RequestStatus,
    pub status_changed_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
