use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::services::purchase_orders::{CreatePurchaseOrderItemInput, UpdatePurchaseOrderItemInput};
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use uuid::Uuid;

async fn create_po_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePurchaseOrderItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.purchase_orders.create_po_item(&user, input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

async fn get_po_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.purchase_orders.get_po_item(&user, id).await?;
    Ok(Json(row))
}

async fn update_po_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
    Json(input): Json<UpdatePurchaseOrderItemInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.purchase_orders.update_po_item(&user, id, input).await?;
    Ok(Json(row))
}

async fn delete_po_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.purchase_orders.delete_po_item(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_po_items(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state.purchase_orders.list_po_items(&user).await?;
    Ok(Json(rows))
}

pub fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_po_item))
        .route("/", get(list_po_items))
        .route("/:id", get(get_po_item))
        .route("/:id", put(update_po_item))
        .route("/:id", delete(delete_po_item))
}
