//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that creates the Axum router,
//! registers all routes, applies middleware, and starts the HTTP server.

// region: --- Imports
use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use lib_core::config::ConfigError;
use lib_core::model::store::MIGRATOR;
use lib_core::{create_pool, Clock, Config, DbPool, IdGenerator, SystemClock, UuidV7Ids};
use lib_utils::get_env_or;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::{log_requests, require_admin, stamp_req, RequestStamp};
use crate::services::{AccountService, MerchantService, ProductService};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub accounts: AccountService,
    pub merchants: MerchantService,
    pub products: ProductService,
}

impl AppState {
    /// Wire the services onto one pool, config, clock, and ID generator.
    pub fn new(
        db: DbPool,
        config: Config,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            accounts: AccountService::new(db.clone(), config.clone(), clock.clone(), ids.clone()),
            merchants: MerchantService::new(db.clone(), clock.clone(), ids.clone()),
            products: ProductService::new(db.clone(), clock.clone(), ids),
            db,
            config,
            clock,
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for MerchantService {
    fn from_ref(state: &AppState) -> Self {
        state.merchants.clone()
    }
}

impl FromRef<AppState> for ProductService {
    fn from_ref(state: &AppState) -> Self {
        state.products.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read `BIND_ADDRESS` and `ALLOWED_ORIGINS` (comma separated) from the environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Self {
            bind_address: get_env_or("BIND_ADDRESS", &defaults.bind_address),
            allowed_origins,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!(" MARKETPLACE BACKEND STARTING");

    info!("Loading configuration...");
    let app_config = load_config()?;

    info!("Database URL: {}", app_config.database_url);
    ensure_database_dir(&app_config.database_url)?;

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations");
    MIGRATOR.run(&pool).await?;
    info!(" Migrations complete");

    let state = AppState::new(pool, app_config, Arc::new(SystemClock), Arc::new(UuidV7Ids));
    let app = create_router(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Tracing subscriber with an `EnvFilter` from `LOG_LEVEL` (default `info`).
fn init_tracing() {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        other => {
            eprintln!("Unknown LOG_LEVEL '{}', falling back to info", other);
            tracing_subscriber::EnvFilter::new("info")
        }
    };

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();

    info!(" Log level: {}", log_level);
}

fn load_config() -> Result<Config, ConfigError> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_database_dir(database_url: &str) -> std::io::Result<()> {
    let Some(db_path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let db_path = db_path.trim_start_matches("//");
    if db_path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    let admin_routes = Router::new()
        .route(
            "/admin/merchants",
            post(handlers::merchants::create_merchant).get(handlers::merchants::list_merchants),
        )
        .route(
            "/admin/merchants/{merchant_id}/items",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/admin/register", post(handlers::auth::register_admin))
        .route("/admin/login", post(handlers::auth::login_admin))
        .route("/user/register", post(handlers::auth::register_user))
        .route("/user/login", post(handlers::auth::login_user))
        .route("/health", get(|| async { "OK" }))
        .merge(admin_routes)
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                },
            ),
        )
        // Outermost, so the request id exists for everything below.
        .layer(from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST /admin/register");
    info!("   • POST /admin/login");
    info!("   • POST /user/register");
    info!("   • POST /user/login");
    info!(" MERCHANTS (admin bearer token):");
    info!("   • POST /admin/merchants");
    info!("   • GET  /admin/merchants?merchantId=&name=&merchantCategory=&limit=&offset=&createdAt=");
    info!(" ITEMS (admin bearer token):");
    info!("   • POST /admin/merchants/{{merchantId}}/items");
    info!("   • GET  /admin/merchants/{{merchantId}}/items?itemId=&name=&productCategory=&limit=&offset=&createdAt=");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
