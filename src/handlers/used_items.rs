use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::services::used_items::CreateUsedItemInput;
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct UsedItemListParams {
    pub item_id: Option<Uuid>,
}

async fn create_used_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateUsedItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let used = state.used_items.create_used_item(&user, input).await?;
    Ok((StatusCode::CREATED, Json(used)))
}

async fn get_used_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let used = state.used_items.get_used_item(&user, id).await?;
    Ok(Json(used))
}

async fn list_used_items(
    State(state): State<AppState>,
    Query(params): Query<UsedItemListParams>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.used_items.list_used_items(&user, params.item_id).await?;
    Ok(Json(rows))
}

async fn delete_used_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.used_items.delete_used_item(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn used_item_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_used_item))
        .route("/", get(list_used_items))
        .route("/:id", get(get_used_item))
        .route("/:id", delete(delete_used_item))
}
