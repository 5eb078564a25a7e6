use crate::audit::{diff, ItemObserver, ItemSnapshot};
use crate::auth::{ensure, Action, AuthUser, Resource};
use crate::entities::item::Entity as ItemEntity;
use crate::entities::used_item::{self, Entity as UsedItemEntity};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUsedItemInput {
    pub item_id: Uuid,
    pub work_order: i32,
}

/// Service for recording item consumption against work orders.
///
/// Using an item decrements its quantity by one through the audited save
/// path: the decrement, the used-item row, and the resulting history
/// record all commit in one transaction.
#[derive(Clone)]
pub struct UsedItemService {
    db: Arc<DatabaseConnection>,
    observers: Arc<Vec<Arc<dyn ItemObserver>>>,
    events: EventSender,
}

impl UsedItemService {
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

    #[instrument(skip(self, input))]
    pub async fn create_used_item(
        &self,
        actor: &AuthUser,
        input: CreateUsedItemInput,
    ) -> Result<used_item::Model, ServiceError> {
        ensure(actor.role, Resource::UsedItem, Action::Add)?;

        let item = ItemEntity::find_by_id(input.item_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", input.item_id)))?;

        if item.quantity <= 0 {
            return Err(ServiceError::InvalidOperation(
                "Cannot use item with quantity 0.".to_string(),
            ));
        }

        let baseline = ItemSnapshot::capture(&item);

        let txn = self.db.begin().await?;

        let used = used_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_id: Set(item.id),
            work_order: Set(input.work_order),
            datetime_used: Set(Utc::now()),
            used_by: Set(Some(actor.user_id)),
        }
        .insert(&txn)
        .await?;

        let mut active = item.into_active_model();
        let new_quantity = baseline.quantity - 1;
        active.quantity = Set(new_quantity);
        active.last_modified_by = Set(Some(actor.user_id));
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        let changes = diff(&baseline, &ItemSnapshot::capture(&updated));
        for observer in self.observers.iter() {
            observer
                .after_update(&txn, &updated, &changes, Some(actor.user_id))
                .await?;
        }
        txn.commit().await?;

        let event = Event::ItemSaved {
            item_id: updated.id,
            display_name: updated.display_name(),
            quantity: updated.quantity,
            low_stock: updated.low_stock(),
        };
        if let Err(e) = self.events.send(event).await {
            tracing::warn!(item_id = %updated.id, error = %e, "failed to emit item-saved event");
        }

        Ok(used)
    }

    #[instrument(skip(self))]
    pub async fn delete_used_item(&self, actor: &AuthUser, id: Uuid) -> Result<(), ServiceError> {
        ensure(actor.role, Resource::UsedItem, Action::Delete)?;

        let existing = UsedItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Used item {} not found", id)))?;

        existing.into_active_model().delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_used_item(
        &self,
        actor: &AuthUser,
        id: Uuid,
    ) -> Result<used_item::Model, ServiceError> {
        ensure(actor.role, Resource::UsedItem, Action::View)?;

        UsedItemEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Used item {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_used_items(
        &self,
        actor: &AuthUser,
        item_id: Option<Uuid>,
    ) -> Result<Vec<used_item::Model>, ServiceError> {
        ensure(actor.role, Resource::UsedItem, Action::View)?;

        let mut query = UsedItemEntity::find();
        if let Some(item_id) = item_id {
            query = query.filter(used_item::Column::ItemId.eq(item_id));
        }
        let rows = query
            .order_by_desc(used_item::Column::DatetimeUsed)
            .all(&*self.db)
            .await?;
        Ok(rows)
    }
}
