use axum::{routing::get, Router};
use configuration::Config;
use database::DbRepository;
use seasonality::SeasonalityEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
    pub config: Config,
    pub engine: SeasonalityEngine,
}

/// The main function to configure and run the web server.
///
/// Tracing is initialized by the binary; this only wires the routes, the
/// database pool, and the middleware stack.
pub async fn run_server(addr: SocketAddr, config: Config) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let db_pool = database::connect().await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    let app_state = Arc::new(AppState {
        db_repo,
        config,
        engine: SeasonalityEngine::new(),
    });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/heatmap/:ticker", get(handlers::get_heatmap))
        .route("/api/screener", get(handlers::get_screener))
        .with_state(app_state)
        .layer(cors)
        // This middleware automatically logs information about every
        // incoming request.
        .layer(TraceLayer::new_for_http());

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
