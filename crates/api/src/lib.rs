//! HTTP API for gradplan.
//!
//! Thin axum layer over the storage and progress crates: every handler
//! parses its path ids, delegates to a service, and maps errors onto
//! status codes. All request and response bodies are plain JSON.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post, put},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/users/{user}/progress", get(routes::get_progress))
        .route(
            "/users/{user}/requirement",
            get(routes::get_requirement)
                .put(routes::upsert_requirement)
                .delete(routes::delete_requirement),
        )
        .route(
            "/users/{user}/requirement/default",
            post(routes::create_default_requirement),
        )
        .route(
            "/users/{user}/plan",
            get(routes::get_plan).put(routes::put_plan),
        )
        .route("/users/{user}", put(routes::put_user))
        .route("/courses", get(routes::list_courses))
        .route("/courses/{course}", put(routes::put_course))
        .layer(cors)
        .with_state(state)
}

/// Open the store and serve the API until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let storage = Arc::new(gradplan_storage::JsonStorage::new(&config.data_dir).await?);
    let state = AppState::new(storage);
    let app = router(state);

    let listener = TcpListener::bind(&config.bind).await?;
    info!("Server running on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
