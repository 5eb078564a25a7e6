use crate::auth::AuthUser;
use crate::entities::item_request::RequestStatus;
use crate::errors::ServiceError;
use crate::services::item_requests::CreateItemRequestInput;
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
pub struct RequestListParams {
    pub status: Option<RequestStatus>,
}

#[utoipa::path(
    post,
    path = "/api/v1/item-requests",
    request_body = CreateItemRequestInput,
    responses(
        (status = 201, description = "Request created"),
        (status = 403, description = "Role lacks the add-request capability")
    )
)]
async fn create_item_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateItemRequestInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let request = state.item_requests.create_item_request(&user, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn get_item_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let request = state.item_requests.get_item_request(&user, id).await?;
    Ok(Json(request))
}

async fn list_item_requests(
    State(state): State<AppState>,
    Query(params): Query<RequestListParams>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let requests = state
        .item_requests
        .list_item_requests(&user, params.status)
        .await?;
    Ok(Json(requests))
}

async fn accept_item_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let request = state
        .item_requests
        .set_status(&user, id, RequestStatus::Accepted)
        .await?;
    Ok(Json(request))
}

async fn reject_item_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    let request = state
        .item_requests
        .set_status(&user, id, RequestStatus::Rejected)
        .await?;
    Ok(Json(request))
}

async fn delete_item_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, ServiceError> {
    state.item_requests.delete_item_request(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn item_request_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item_request))
        .route("/", get(list_item_requests))
        .route("/:id", get(get_item_request))
        .route("/:id", delete(delete_item_request))
        .route("/:id/accept", post(accept_item_request))
        .route("/:id/reject", post(reject_item_request))
}
