use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tokio::{signal, sync::mpsc};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

use stockroom_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(&cfg.log_level, cfg.log_json);

    let db = api::db::establish_connection(&cfg).await?;
    if cfg.auto_migrate {
        api::db::run_migrations(&db).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }
    let db = Arc::new(db);

    let (event_tx, event_rx) = mpsc::channel(1024);
    let event_sender = api::events::EventSender::new(event_tx);
    tokio::spawn(api::events::process_events(db.clone(), event_rx));

    let cfg = Arc::new(cfg);
    let state = api::AppState::build(db, cfg.clone(), event_sender);

    if let Some(password) = cfg.seed_admin_password.as_deref() {
        state.users.seed_admin(password).await?;
    }

    let app = api::handlers::api_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .context("invalid host/port configuration")?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
