use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::info;

const CONFIG_DIR: &str = "config";
const DEFAULT_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "info";

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_db_max_connections() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_secs: i64,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// When set, an idempotent startup step ensures a Superuser account
    /// named `admin` exists with this password.
    #[serde(default)]
    pub seed_admin_password: Option<String>,
}

fn default_jwt_expiration() -> i64 {
    3600
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error("configuration load error: {0}")]
    Load(#[from] ConfigError),
}

/// Loads configuration from `config/` files layered with `STOCKROOM__`
/// prefixed environment variables. `jwt_secret` has no default and must be
/// supplied explicitly.
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("database_url", "sqlite://stockroom.db?mode=rwc")?
        .set_default("host", "0.0.0.0")?
        .set_default("port", 8080)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("STOCKROOM").separator("__"))
        .build()?;

    if config.get_string("jwt_secret").is_err() {
        return Err(AppConfigError::Load(ConfigError::NotFound(
            "jwt_secret is required but not configured. Set STOCKROOM__JWT_SECRET.".into(),
        )));
    }

    let app_config: AppConfig = config.try_deserialize()?;
    Ok(app_config)
}

/// Initializes the global tracing subscriber. `RUST_LOG` overrides the
/// configured level when present.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("stockroom_api={},tower_http=info", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);
    let filter = EnvFilter::new(filter_directive);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
