//! Mutation hook dispatch.
//!
//! Observers are registered once at application wiring time as an ordered
//! list handed to the item service — no global signal registry. Each hook
//! receives the open transaction and fires strictly after the entity write
//! on it; the transaction commits only when every hook succeeds. Hooks
//! must not mutate tracked entities themselves.

use crate::audit::recorder::{format_changes, HistoryRecorder};
use crate::audit::tracker::FieldChange;
use crate::entities::item;
use crate::entities::item_history::HistoryAction;
use crate::errors::ServiceError;
use async_trait::async_trait;
use sea_orm::DatabaseTransaction;
use uuid::Uuid;

#[async_trait]
pub trait ItemObserver: Send + Sync {
    async fn after_create(
        &self,
        txn: &DatabaseTransaction,
        item: &item::Model,
        actor: Option<Uuid>,
    ) -> Result<(), ServiceError>;

    async fn after_update(
        &self,
        txn: &DatabaseTransaction,
        item: &item::Model,
        diff: &[FieldChange],
        actor: Option<Uuid>,
    ) -> Result<(), ServiceError>;

    async fn after_delete(
        &self,
        txn: &DatabaseTransaction,
        item: &item::Model,
    ) -> Result<(), ServiceError>;
}

/// The mandatory observer: delegates every lifecycle event to the
/// history recorder.
#[derive(Debug, Default)]
pub struct HistoryObserver {
    recorder: HistoryRecorder,
}

impl HistoryObserver {
    pub fn new() -> Self {
        Self {
            recorder: HistoryRecorder::new(),
        }
    }
}

#[async_trait]
impl ItemObserver for HistoryObserver {
    async fn after_create(
        &self,
        txn: &DatabaseTransaction,
        item: &item::Model,
        actor: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        self.recorder
            .record(txn, item.id, HistoryAction::Create, actor, None)
            .await?;
        Ok(())
    }

    async fn after_update(
        &self,
        txn: &DatabaseTransaction,
        item: &item::Model,
        diff: &[FieldChange],
        actor: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        // An empty diff still produces a record: every save is audited,
        // changes or not.
        self.recorder
            .record(
                txn,
                item.id,
                HistoryAction::Update,
                actor,
                Some(format_changes(diff)),
            )
            .await?;
        Ok(())
    }

    async fn after_delete(
        &self,
        txn: &DatabaseTransaction,
        item: &item::Model,
    ) -> Result<(), ServiceError> {
        // Attribution quirk preserved from the original system: the delete
        // record names the item's last modifier, not the deleting user.
        self.recorder
            .record(
                txn,
                item.id,
                HistoryAction::Delete,
                item.last_modified_by,
                None,
            )
            .await?;
        Ok(())
    }
}
