use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.notifications.list_notifications(&user).await?;
    Ok(Json(rows))
}

async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let count = state.notifications.unread_count(&user).await?;
    Ok(Json(serde_json::json!({ "unread": count })))
}

async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.notifications.mark_read(&user, id).await?;
    Ok(Json(row))
}

async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.notifications.delete_notification(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/:id/read", post(mark_read))
        .route("/:id", delete(delete_notification))
}
