//! HTTP routing. One router per resource, assembled under /api/v1.

use crate::AppState;
use axum::Router;

pub mod auth;
pub mod health;
pub mod history;
pub mod item_requests;
pub mod items;
pub mod notifications;
pub mod purchase_orders;
pub mod used_items;
pub mod users;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/health", health::health_routes())
        .nest(
            "/api/v1",
            Router::new()
                .nest("/auth", auth::auth_routes())
                .nest("/items", items::item_routes())
                .nest("/history", history::history_routes())
                .nest("/item-requests", item_requests::item_request_routes())
                .nest("/used-items", used_items::used_item_routes())
                .nest("/purchase-orders", purchase_orders::purchase_order_routes())
                .nest("/notifications", notifications::notification_routes())
                .nest("/users", users::user_routes()),
        )
}
