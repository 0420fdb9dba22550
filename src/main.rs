use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use guesthouse::config::AppConfig;
use guesthouse::handlers;
use guesthouse::services::auth::StaticAuthenticator;
use guesthouse::services::gateway::script::ScriptGateway;
use guesthouse::services::gateway::PersistenceGateway;
use guesthouse::services::icons::gemini::GeminiIconProvider;
use guesthouse::state::AppState;
use guesthouse::store::CatalogStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        !config.script_url.is_empty(),
        "SCRIPT_URL must be set to the persistence endpoint"
    );

    let gateway: Box<dyn PersistenceGateway> = Box::new(ScriptGateway::new(config.script_url.clone()));
    let icons = GeminiIconProvider::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    let auth = StaticAuthenticator::new(
        config.admin_username.clone(),
        config.admin_password.clone(),
    );

    // Initial catalog fetch. The backend being unreachable is not fatal; the
    // app starts with an empty cache and /api/refresh can fill it later.
    let mut store = CatalogStore::new();
    match gateway.get_rooms().await {
        Ok(rooms) => {
            tracing::info!(count = rooms.len(), "fetched room catalog");
            store.replace_rooms(rooms);
        }
        Err(e) => tracing::warn!("could not fetch rooms at startup: {e}"),
    }
    match gateway.get_settings().await {
        Ok(settings) => store.set_settings(settings),
        Err(e) => tracing::warn!("could not fetch settings at startup: {e}"),
    }

    let state = Arc::new(AppState {
        store: Mutex::new(store),
        config: config.clone(),
        gateway,
        icons: Box::new(icons),
        auth: Box::new(auth),
        sessions: Mutex::new(HashMap::new()),
        in_flight: AtomicUsize::new(0),
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/status", get(handlers::health::get_status))
        .route("/api/rooms", get(handlers::rooms::list_rooms))
        .route("/api/rooms/:id", get(handlers::rooms::get_room))
        .route(
            "/api/rooms/:id/bookings",
            post(handlers::rooms::request_booking),
        )
        .route("/api/settings", get(handlers::rooms::get_settings))
        .route("/api/refresh", post(handlers::rooms::refresh))
        .route("/api/session", post(handlers::session::create_session))
        .route("/api/session", get(handlers::session::get_session))
        .route("/api/session/navigate", post(handlers::session::navigate))
        .route(
            "/api/session/select-room",
            post(handlers::session::select_room),
        )
        .route("/api/login", post(handlers::session::login))
        .route("/api/logout", post(handlers::session::logout))
        .route(
            "/api/admin/bookings/:id/approve",
            post(handlers::admin::approve_booking),
        )
        .route(
            "/api/admin/bookings/:id/decline",
            post(handlers::admin::decline_booking),
        )
        .route("/api/admin/rooms", post(handlers::admin::save_room))
        .route("/api/admin/rooms/:id", delete(handlers::admin::delete_room))
        .route(
            "/api/admin/rooms/:id/occupancy",
            get(handlers::admin::get_occupancy),
        )
        .route("/api/admin/settings", get(handlers::admin::get_settings))
        .route(
            "/api/admin/settings",
            post(handlers::admin::update_settings),
        )
        .route(
            "/api/admin/accounting",
            get(handlers::admin::get_accounting),
        )
        .route(
            "/api/admin/amenities/icon",
            post(handlers::admin::generate_amenity_icon),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
