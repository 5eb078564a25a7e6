//! Application events and the background processor that materializes
//! notifications from them.
//!
//! Services emit events after their transactions commit; delivery is
//! best-effort and deliberately outside the audit invariants.

use crate::entities::item_request::RequestStatus;
use crate::entities::user::Role;
use crate::entities::{notification, user};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// An item was created or updated. Carries what the low-stock
    /// notification needs.
    ItemSaved {
        item_id: Uuid,
        display_name: String,
        quantity: i32,
        low_stock: bool,
    },
    ItemRequestCreated {
        request_id: Uuid,
        manufacturer: String,
        model_part_num: String,
    },
    ItemRequestStatusChanged {
        request_id: Uuid,
        requested_by: Uuid,
        manufacturer: String,
        model_part_num: String,
        status: RequestStatus,
        changed_by_username: String,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Creates one notification row for every Superuser.
async fn notify_superusers(
    db: &DatabaseConnection,
    subject: &str,
    message: &str,
) -> Result<(), sea_orm::DbErr> {
    let superusers = user::Entity::find()
        .filter(user::Column::Role.eq(Role::Superuser))
        .all(db)
        .await?;

    for su in superusers {
        notification::ActiveModel {
            id: Set(Uuid::new_v4()),
            is_read: Set(false),
            subject: Set(subject.to_string()),
            message: Set(message.to_string()),
            timestamp: Set(Utc::now()),
            user_id: Set(su.id),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn notify_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    subject: &str,
    message: &str,
) -> Result<(), sea_orm::DbErr> {
    notification::ActiveModel {
        id: Set(Uuid::new_v4()),
        is_read: Set(false),
        subject: Set(subject.to_string()),
        message: Set(message.to_string()),
        timestamp: Set(Utc::now()),
        user_id: Set(user_id),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn handle_event(db: &DatabaseConnection, event: Event) -> Result<(), sea_orm::DbErr> {
    match event {
        Event::ItemSaved {
            display_name,
            quantity,
            low_stock,
            ..
        } => {
            if low_stock {
                let message = format!("{} is low in stock. {} left.", display_name, quantity);
                notify_superusers(db, "Low Stock Alert", &message).await?;
            }
            Ok(())
        }
        Event::ItemRequestCreated {
            manufacturer,
            model_part_num,
            ..
        } => {
            let message = format!(
                "There's a new item request for {}, {}. See the item request for more details.",
                manufacturer, model_part_num
            );
            notify_superusers(db, "New Item Request", &message).await
        }
        Event::ItemRequestStatusChanged {
            requested_by,
            manufacturer,
            model_part_num,
            status,
            changed_by_username,
            ..
        } => {
            let subject = format!("Item Request {}", status.as_str());
            let message = format!(
                "Your item request for {}, {} has been {} by {}. \
                 If you're all set with your item request, please delete it.",
                manufacturer,
                model_part_num,
                status.as_str().to_lowercase(),
                changed_by_username
            );
            notify_user(db, requested_by, &subject, &message).await
        }
    }
}

/// Drains the event channel until every sender is dropped.
pub async fn process_events(db: Arc<DatabaseConnection>, mut rx: mpsc::Receiver<Event>) {
    info!("Event processor started");
    while let Some(event) = rx.recv().await {
        if let Err(e) = handle_event(&db, event).await {
            error!(error = %e, "failed to process event");
        }
    }
    info!("Event processor stopped");
}
