use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use sea_orm_migration::MigratorTrait;
use stockroom_api::{
    auth::AuthUser,
    config::AppConfig,
    entities::item::PartOrUnit,
    entities::user::{self, Role},
    events::{self, EventSender},
    migrator::Migrator,
    services::items::CreateItemInput,
    AppState,
};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Test harness over an in-memory SQLite database with the full service
/// stack wired the way main() wires it.
pub struct TestApp {
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_key_for_testing_purposes_only".to_string(),
        jwt_expiration_secs: 3600,
        host: "127.0.0.1".to_string(),
        port: 18_080,
        log_level: "warn".to_string(),
        log_json: false,
        auto_migrate: true,
        db_max_connections: 1,
        seed_admin_password: None,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        // A single connection: every pooled connection to sqlite::memory:
        // would otherwise see its own empty database.
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options)
            .await
            .expect("failed to open in-memory database");
        Migrator::up(&db, None)
            .await
            .expect("failed to run migrations in tests");
        let db = Arc::new(db);

        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(db.clone(), event_rx));

        let state = AppState::build(db, Arc::new(test_config()), event_sender);
        Self {
            state,
            _event_task: event_task,
        }
    }

    /// Inserts a user row with the given role and returns the actor the
    /// extractor would produce for it.
    pub async fn seed_user(&self, username: &str, role: Role) -> AuthUser {
        let id = Uuid::new_v4();
        user::ActiveModel {
            id: Set(id),
            username: Set(username.to_string()),
            password_hash: Set("x".to_string()),
            email: Set(format!("{username}@example.com")),
            role: Set(role),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.state.db)
        .await
        .expect("failed to seed user");

        AuthUser {
            user_id: id,
            username: username.to_string(),
            role,
        }
    }

    /// Gives the background event processor a moment to drain what the
    /// services already sent, so notification rows can be asserted on.
    #[allow(dead_code)]
    pub async fn flush_events(&self) {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
}

#[allow(dead_code)]
pub fn sample_item_input() -> CreateItemInput {
    CreateItemInput {
        manufacturer: "HP".to_string(),
        model: "LaserJet".to_string(),
        part_or_unit: Some(PartOrUnit::Part),
        part_number: "C4127X".to_string(),
        description: String::new(),
        location: "A1".to_string(),
        quantity: 1,
        min_quantity: 0,
        unit_price: dec!(100.00),
    }
}
