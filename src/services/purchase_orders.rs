use crate::auth::{ensure, Action, AuthUser, Resource};
use crate::entities::purchase_order_item::{self, Entity as PurchaseOrderItemEntity};
use crate::errors::ServiceError;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseOrderItemInput {
    pub manufacturer: String,
    pub model_part_num: String,
    #[validate(range(min = 0, message = "quantity_ordered must not be negative"))]
    pub quantity_ordered: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub serial_num: String,
    #[serde(default)]
    pub property_num: String,
    #[validate(custom = "crate::services::items::validate_price")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePurchaseOrderItemInput {
    pub manufacturer: Option<String>,
    pub model_part_num: Option<String>,
    #[validate(range(min = 0, message = "quantity_ordered must not be negative"))]
    pub quantity_ordered: Option<i32>,
    pub description: Option<String>,
    pub serial_num: Option<String>,
    pub property_num: Option<String>,
    #[validate(custom = "crate::services::items::validate_price")]
    pub unit_price: Option<Decimal>,
}

/// Line items staged for purchase orders. These are standalone rows with
/// no link back to inventory items.
#[derive(Clone)]
pub struct PurchaseOrderService {
    db: Arc<DatabaseConnection>,
}

impl PurchaseOrderService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input))]
    pub async fn create_po_item(
        &self,
        actor: &AuthUser,
        input: CreatePurchaseOrderItemInput,
    ) -> Result<purchase_order_item::Model, ServiceError> {
        ensure(actor.role, Resource::PurchaseOrderItem, Action::Add)?;
        input.validate()?;

        let row = purchase_order_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            manufacturer: Set(input.manufacturer),
            model_part_num: Set(input.model_part_num),
            quantity_ordered: Set(input.quantity_ordered),
            description: Set(input.description),
            serial_num: Set(input.serial_num),
            property_num: Set(input.property_num),
            unit_price: Set(input.unit_price),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await?;
        Ok(row)
    }

    #[instrument(skip(self, input))]
    pub async fn update_po_item(
        &self,
        actor: &AuthUser,
        id: Uuid,
        input: UpdatePurchaseOrderItemInput,
    ) -> Result<purchase_order_item::Model, ServiceError> {
        ensure(actor.role, Resource::PurchaseOrderItem, Action::Change)?;
        input.validate()?;

        let existing = PurchaseOrderItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order item {} not found", id))
            })?;

        let mut active = existing.into_active_model();
        if let Some(v) = input.manufacturer {
            active.manufacturer = Set(v);
        }
        if let Some(v) = input.model_part_num {
            active.model_part_num = Set(v);
        }
        if let Some(v) = input.quantity_ordered {
            active.quantity_ordered = Set(v);
        }
        if let Some(v) = input.description {
            active.description = Set(v);
        }
        if let Some(v) = input.serial_num {
            active.serial_num = Set(v);
        }
        if let Some(v) = input.property_num {
            active.property_num = Set(v);
        }
        if let Some(v) = input.unit_price {
            active.unit_price = Set(v);
        }
        let updated = active.update(&*self.db).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_po_item(&self, actor: &AuthUser, id: Uuid) -> Result<(), ServiceError> {
        ensure(actor.role, Resource::PurchaseOrderItem, Action::Delete)?;

        let existing = PurchaseOrderItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order item {} not found", id))
            })?;

        existing.into_active_model().delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_po_item(
        &self,
        actor: &AuthUser,
        id: Uuid,
    ) -> Result<purchase_order_item::Model, ServiceError> {
        ensure(actor.role, Resource::PurchaseOrderItem, Action::View)?;

        PurchaseOrderItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order item {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_po_items(
        &self,
        actor: &AuthUser,
    ) -> Result<Vec<purchase_order_item::Model>, ServiceError> {
        ensure(actor.role, Resource::PurchaseOrderItem, Action::View)?;

        let rows = PurchaseOrderItemEntity::find()
            .order_by_desc(purchase_order_item::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(rows)
    }
}
