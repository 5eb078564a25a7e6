use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Exclusive role tiers. Every user carries exactly one; `None` grants no
/// mutation capabilities at all.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum Role {
    #[sea_orm(string_value = "Superuser")]
    Superuser,
    #[sea_orm(string_value = "Technician")]
    Technician,
    #[sea_orm(string_value = "Intern")]
    Intern,
    #[sea_orm(string_value = "Viewer")]
    Viewer,
    #[sea_orm(string_value = "None")]
    None,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superuser => "Superuser",
            Role::Technician => "Technician",
            Role::Intern => "Intern",
            Role::Viewer => "Viewer",
            Role::None => "None",
        }
    }

    pub fn parse(s: &str) -> Role {
        match s {
            "Superuser" => Role::Superuser,
            "Technician" => Role::Technician,
            "Intern" => Role::Intern,
            "Viewer" => Role::Viewer,
            _ => Role::None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
