use crate::auth::{ensure, ensure_status_change, Action, AuthUser, Resource};
use crate::entities::item_request::{self, Entity as ItemRequestEntity, RequestStatus};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_request_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value < dec!(0.01) {
        return Err(ValidationError::new("unit_price must be at least 0.01"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequestInput {
    pub manufacturer: String,
    pub model_part_num: String,
    #[validate(range(min = 1, message = "quantity_requested must be at least 1"))]
    pub quantity_requested: i32,
    #[serde(default)]
    pub description: String,
    #[validate(custom = "validate_request_price")]
    pub unit_price: Decimal,
}

/// Service for the item request workflow.
///
/// Requests move from Pending to Accepted or Rejected exactly once; the
/// terminal states cannot be revisited or changed.
#[derive(Clone)]
pub struct ItemRequestService {
    db: Arc<DatabaseConnection>,
    events: EventSender,
}

impl ItemRequestService {
    pub fn new(db: Arc<DatabaseConnection>, events: EventSender) -> Self {
        Self { db, events }
    }

    #[instrument(skip(self, input))]
    pub async fn create_item_request(
        &self,
        actor: &AuthUser,
        input: CreateItemRequestInput,
    ) -> Result<item_request::Model, ServiceError> {
        ensure(actor.role, Resource::ItemRequest, Action::Add)?;
        input.validate()?;

        let request = item_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            manufacturer: Set(input.manufacturer),
            model_part_num: Set(input.model_part_num),
            quantity_requested: Set(input.quantity_requested),
            description: Set(input.description),
            unit_price: Set(input.unit_price),
            requested_by: Set(actor.user_id),
            timestamp: Set(Utc::now()),
            status: Set(RequestStatus::Pending),
            status_changed_by: Set(None),
        }
        .insert(&*self.db)
        .await?;

        let event = Event::ItemRequestCreated {
            request_id: request.id,
            manufacturer: request.manufacturer.clone(),
            model_part_num: request.model_part_num.clone(),
        };
        if let Err(e) = self.events.send(event).await {
            tracing::warn!(request_id = %request.id, error = %e, "failed to emit request-created event");
        }

        Ok(request)
    }

    /// Moves a pending request to Accepted or Rejected. Superusers only;
    /// either outcome records who made the call.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        actor: &AuthUser,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<item_request::Model, ServiceError> {
        ensure_status_change(actor.role)?;

        if status == RequestStatus::Pending {
            return Err(ServiceError::InvalidOperation(
                "An item request cannot be moved back to Pending.".to_string(),
            ));
        }

        let existing = ItemRequestEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item request {} not found", id)))?;

        if existing.status.is_terminal() {
            return Err(ServiceError::InvalidOperation(format!(
                "This item request has already been {}.",
                existing.status.as_str().to_lowercase()
            )));
        }

        let mut active = existing.into_active_model();
        active.status = Set(status);
        active.status_changed_by = Set(Some(actor.user_id));
        let updated = active.update(&*self.db).await?;

        let event = Event::ItemRequestStatusChanged {
            request_id: updated.id,
            requested_by: updated.requested_by,
            manufacturer: updated.manufacturer.clone(),
            model_part_num: updated.model_part_num.clone(),
            status: updated.status,
            changed_by_username: actor.username.clone(),
        };
        if let Err(e) = self.events.send(event).await {
            tracing::warn!(request_id = %updated.id, error = %e, "failed to emit status-changed event");
        }

        Ok(updated)
    }

    /// Requesters may delete their own requests; nobody else's.
    #[instrument(skip(self))]
    pub async fn delete_item_request(
        &self,
        actor: &AuthUser,
        id: Uuid,
    ) -> Result<(), ServiceError> {
        ensure(actor.role, Resource::ItemRequest, Action::Delete)?;

        let existing = ItemRequestEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item request {} not found", id)))?;

        if existing.requested_by != actor.user_id {
            return Err(ServiceError::Forbidden(
                "You didn't make this item request, so you can't delete it.".to_string(),
            ));
        }

        existing.into_active_model().delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_item_request(
        &self,
        actor: &AuthUser,
        id: Uuid,
    ) -> Result<item_request::Model, ServiceError> {
        ensure(actor.role, Resource::ItemRequest, Action::View)?;

        ItemRequestEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item request {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_item_requests(
        &self,
        actor: &AuthUser,
        status: Option<RequestStatus>,
    ) -> Result<Vec<item_request::Model>, ServiceError> {
        ensure(actor.role, Resource::ItemRequest, Action::View)?;

        let mut query = ItemRequestEntity::find();
        if let Some(status) = status {
            query = query.filter(item_request::Column::Status.eq(status));
        }
        let requests = query
            .order_by_desc(item_request::Column::Timestamp)
            .all(&*self.db)
            .await?;
        Ok(requests)
    }
}
