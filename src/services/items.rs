use crate::audit::{diff, ItemObserver, ItemSnapshot};
use crate::auth::{ensure, Action, AuthUser, Resource};
use crate::entities::item::{self, Entity as ItemEntity, PartOrUnit};
use crate::entities::used_item::{self, Entity as UsedItemEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn default_na() -> String {
    "N/A".to_string()
}

pub(crate) fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("unit_price must not be negative"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItemInput {
    #[serde(default = "default_na")]
    pub manufacturer: String,
    #[serde(default = "default_na")]
    pub model: String,
    #[serde(default)]
    pub part_or_unit: Option<PartOrUnit>,
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_na")]
    pub location: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "min_quantity must not be negative"))]
    pub min_quantity: i32,
    #[validate(custom = "validate_price")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItemInput {
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub part_or_unit: Option<PartOrUnit>,
    pub part_number: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "min_quantity must not be negative"))]
    pub min_quantity: Option<i32>,
    #[validate(custom = "validate_price")]
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ItemFilters {
    /// Substring match over manufacturer, model, and part number.
    pub q: Option<String>,
    pub low_stock: Option<bool>,
}

/// Service for managing inventory items.
///
/// Every mutation runs as one transaction covering the entity write and
/// the observer hooks (history recording among them); partial state is
/// impossible by construction.
#[derive(Clone)]
pub struct ItemService {
    db: Arc<DatabaseConnection>,
    observers: Arc<Vec<Arc<dyn ItemObserver>>>,
    events: EventSender,
}

impl ItemService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        observers: Arc<Vec<Arc<dyn ItemObserver>>>,
        events: EventSender,
    ) -> Self {
        Self {
            db,
            observers,
            events,
        }
    }

    async fn emit_item_saved(&self, item: &item::Model) {
        let event = Event::ItemSaved {
            item_id: item.id,
            display_name: item.display_name(),
            quantity: item.quantity,
            low_stock: item.low_stock(),
        };
        if let Err(e) = self.events.send(event).await {
            tracing::warn!(item_id = %item.id, error = %e, "failed to emit item-saved event");
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_item(
        &self,
        actor: &AuthUser,
        input: CreateItemInput,
    ) -> Result<item::Model, ServiceError> {
        ensure(actor.role, Resource::Item, Action::Add)?;
        input.validate()?;

        let now = Utc::now();
        let active = item::ActiveModel {
            id: Set(Uuid::new_v4()),
            manufacturer: Set(input.manufacturer),
            model: Set(input.model),
            part_or_unit: Set(input.part_or_unit.unwrap_or(PartOrUnit::Part)),
            part_number: Set(input.part_number),
            description: Set(input.description),
            location: Set(input.location),
            quantity: Set(input.quantity),
            min_quantity: Set(input.min_quantity),
            unit_price: Set(input.unit_price),
            last_modified_by: Set(Some(actor.user_id)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let txn = self.db.begin().await?;
        let model = active.insert(&txn).await?;
        for observer in self.observers.iter() {
            observer
                .after_create(&txn, &model, Some(actor.user_id))
                .await?;
        }
        txn.commit().await?;

        self.emit_item_saved(&model).await;
        Ok(model)
    }

    #[instrument(skip(self, input))]
    pub async fn update_item(
        &self,
        actor: &AuthUser,
        id: Uuid,
        input: UpdateItemInput,
    ) -> Result<item::Model, ServiceError> {
        ensure(actor.role, Resource::Item, Action::Change)?;
        input.validate()?;

        let existing = ItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;

        let baseline = ItemSnapshot::capture(&existing);

        let mut active = existing.into_active_model();
        if let Some(v) = input.manufacturer {
            active.manufacturer = Set(v);
        }
        if let Some(v) = input.model {
            active.model = Set(v);
        }
        if let Some(v) = input.part_or_unit {
            active.part_or_unit = Set(v);
        }
        if let Some(v) = input.part_number {
            active.part_number = Set(v);
        }
        if let Some(v) = input.description {
            active.description = Set(v);
        }
        if let Some(v) = input.location {
            active.location = Set(v);
        }
        if let Some(v) = input.quantity {
            active.quantity = Set(v);
        }
        if let Some(v) = input.min_quantity {
            active.min_quantity = Set(v);
        }
        if let Some(v) = input.unit_price {
            active.unit_price = Set(v);
        }
        // Every save stamps its author.
        active.last_modified_by = Set(Some(actor.user_id));
        active.updated_at = Set(Utc::now());

        let txn = self.db.begin().await?;
        let model = active.update(&txn).await?;
        let changes = diff(&baseline, &ItemSnapshot::capture(&model));
        for observer in self.observers.iter() {
            observer
                .after_update(&txn, &model, &changes, Some(actor.user_id))
                .await?;
        }
        txn.commit().await?;

        self.emit_item_saved(&model).await;
        Ok(model)
    }

    /// Deletes an item and its dependent used-item rows. History rows are
    /// retained, and the final delete record is attributed to the item's
    /// last modifier rather than the deleting user.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, actor: &AuthUser, id: Uuid) -> Result<(), ServiceError> {
        ensure(actor.role, Resource::Item, Action::Delete)?;

        let existing = ItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;

        let txn = self.db.begin().await?;
        UsedItemEntity::delete_many()
            .filter(used_item::Column::ItemId.eq(id))
            .exec(&txn)
            .await?;
        ItemEntity::delete_by_id(id).exec(&txn).await?;
        for observer in self.observers.iter() {
            observer.after_delete(&txn, &existing).await?;
        }
        txn.commit().await?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, actor: &AuthUser, id: Uuid) -> Result<item::Model, ServiceError> {
        ensure(actor.role, Resource::Item, Action::View)?;

        ItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        actor: &AuthUser,
        filters: ItemFilters,
    ) -> Result<Vec<item::Model>, ServiceError> {
        ensure(actor.role, Resource::Item, Action::View)?;

        let mut query = ItemEntity::find();
        if let Some(q) = filters.q.as_deref().filter(|q| !q.trim().is_empty()) {
            let needle = format!("%{}%", q.trim());
            query = query.filter(
                Condition::any()
                    .add(item::Column::Manufacturer.like(needle.clone()))
                    .add(item::Column::Model.like(needle.clone()))
                    .add(item::Column::PartNumber.like(needle)),
            );
        }
        if let Some(true) = filters.low_stock {
            query = query.filter(
                Expr::col(item::Column::Quantity).lte(Expr::col(item::Column::MinQuantity)),
            );
        }

        let items = query
            .order_by_asc(item::Column::Manufacturer)
            .order_by_asc(item::Column::Model)
            .all(&*self.db)
            .await?;
        Ok(items)
    }
}
