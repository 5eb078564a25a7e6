use crate::auth::{ensure, Action, AuthUser, Resource};
use crate::entities::notification::{self, Entity as NotificationEntity};
use crate::errors::ServiceError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Per-user notification inbox. Every query is scoped to the calling
/// user; other users' rows are indistinguishable from missing ones.
#[derive(Clone)]
pub struct NotificationService {
    db: Arc<DatabaseConnection>,
}

impl NotificationService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_own(
        &self,
        actor: &AuthUser,
        id: Uuid,
    ) -> Result<notification::Model, ServiceError> {
        NotificationEntity::find_by_id(id)
            .filter(notification::Column::UserId.eq(actor.user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Notification {} not found", id)))
    }

    /// Lists the caller's notifications, newest first.
    #[instrument(skip(self))]
    pub async fn list_notifications(
        &self,
        actor: &AuthUser,
    ) -> Result<Vec<notification::Model>, ServiceError> {
        ensure(actor.role, Resource::Notification, Action::View)?;

        let rows = NotificationEntity::find()
            .filter(notification::Column::UserId.eq(actor.user_id))
            .order_by_desc(notification::Column::Timestamp)
            .all(&*self.db)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, actor: &AuthUser) -> Result<u64, ServiceError> {
        ensure(actor.role, Resource::Notification, Action::View)?;

        let count = NotificationEntity::find()
            .filter(notification::Column::UserId.eq(actor.user_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(&*self.db)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        actor: &AuthUser,
        id: Uuid,
    ) -> Result<notification::Model, ServiceError> {
        ensure(actor.role, Resource::Notification, Action::Change)?;

        let existing = self.find_own(actor, id).await?;
        if existing.is_read {
            return Ok(existing);
        }
        let mut active = existing.into_active_model();
        active.is_read = Set(true);
        let updated = active.update(&*self.db).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_notification(
        &self,
        actor: &AuthUser,
        id: Uuid,
    ) -> Result<(), ServiceError> {
        ensure(actor.role, Resource::Notification, Action::Delete)?;

        let existing = self.find_own(actor, id).await?;
        existing.into_active_model().delete(&*self.db).await?;
        Ok(())
    }
}
