use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, database) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "up"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "down"),
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "up" } else { "degraded" },
            "database": database,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
