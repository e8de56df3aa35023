use std::time::Instant;

use axum::extract::FromRef;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod db;
pub mod error;
pub mod models;
pub mod routes;

/// Process-wide resources handed to the router: the bounded connection pool
/// and the start instant the health endpoint reports uptime from.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        AppState {
            pool,
            started_at: Instant::now(),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.pool.clone()
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(routes::index))
        .route("/health", get(routes::health::health_check))

        // Player endpoints
        .route("/api/player/{player_id}", get(routes::players::get_player))
        .route("/api/player", post(routes::players::create_player))
        .route("/api/player/{player_id}", put(routes::players::update_player))
        .route("/api/player/{player_id}", delete(routes::players::delete_player))
        .route("/api/players", get(routes::players::list_players))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
