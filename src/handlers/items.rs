use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::services::items::{CreateItemInput, ItemFilters, UpdateItemInput};
use crate::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/items",
    request_body = CreateItemInput,
    responses(
        (status = 201, description = "Item created"),
        (status = 403, description = "Role lacks the add-item capability")
    )
)]
async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.items.create_item(&user, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.items.get_item(&user, id).await?;
    Ok(Json(item))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
    Json(input): Json<UpdateItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.items.update_item(&user, id, input).await?;
    Ok(Json(item))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.items.delete_item(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_items(
    State(state): State<AppState>,
    Query(filters): Query<ItemFilters>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.items.list_items(&user, filters).await?;
    Ok(Json(items))
}

async fn item_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let records = state.history.list_for_item(&user, id).await?;
    Ok(Json(records))
}

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item))
        .route("/", get(list_items))
        .route("/:id", get(get_item))
        .route("/:id", put(update_item))
        .route("/:id", delete(delete_item))
        .route("/:id/history", get(item_history))
}
