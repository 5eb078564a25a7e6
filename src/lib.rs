//! Stockroom API Library
//!
//! Role-gated inventory tracking with a transactional audit trail.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod audit;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod services;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<config::AppConfig>,
    pub event_sender: events::EventSender,
    pub items: services::ItemService,
    pub history: services::HistoryService,
    pub item_requests: services::ItemRequestService,
    pub used_items: services::UsedItemService,
    pub purchase_orders: services::PurchaseOrderService,
    pub notifications: services::NotificationService,
    pub users: services::UserService,
}

impl AppState {
    /// Wires the full service stack over one database handle. The
    /// observer list is the audit dispatch order; [`audit::HistoryObserver`]
    /// always runs.
    pub fn build(
        db: Arc<DatabaseConnection>,
        config: Arc<config::AppConfig>,
        event_sender: events::EventSender,
    ) -> Self {
        let observers: Arc<Vec<Arc<dyn audit::ItemObserver>>> =
            Arc::new(vec![Arc::new(audit::HistoryObserver::new())]);

        Self {
            items: services::ItemService::new(
                db.clone(),
                observers.clone(),
                event_sender.clone(),
            ),
            history: services::HistoryService::new(db.clone()),
            item_requests: services::ItemRequestService::new(db.clone(), event_sender.clone()),
            used_items: services::UsedItemService::new(
                db.clone(),
                observers,
                event_sender.clone(),
            ),
            purchase_orders: services::PurchaseOrderService::new(db.clone()),
            notifications: services::NotificationService::new(db.clone()),
            users: services::UserService::new(db.clone()),
            db,
            config,
            event_sender,
        }
    }
}
