use crate::auth::{ensure, Action, AuthUser, Resource};
use crate::entities::item_history::{self, Entity as HistoryEntity};
use crate::errors::ServiceError;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Read-only access to the audit trail. There is deliberately no mutation
/// surface here: history rows are written by the recorder alone.
#[derive(Clone)]
pub struct HistoryService {
    db: Arc<DatabaseConnection>,
}

impl HistoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists an item's history, oldest first.
    #[instrument(skip(self))]
    pub async fn list_for_item(
        &self,
        actor: &AuthUser,
        item_id: Uuid,
    ) -> Result<Vec<item_history::Model>, ServiceError> {
        ensure(actor.role, Resource::ItemHistory, Action::View)?;

        let records = HistoryEntity::find()
            .filter(item_history::Column::ItemId.eq(item_id))
            .order_by_asc(item_history::Column::Timestamp)
            .all(&*self.db)
            .await?;
        Ok(records)
    }

    /// Full audit listing across items, oldest first.
    #[instrument(skip(self))]
    pub async fn list_all(
        &self,
        actor: &AuthUser,
    ) -> Result<Vec<item_history::Model>, ServiceError> {
        ensure(actor.role, Resource::ItemHistory, Action::View)?;

        let records = HistoryEntity::find()
            .order_by_asc(item_history::Column::Timestamp)
            .all(&*self.db)
            .await?;
        Ok(records)
    }
}
