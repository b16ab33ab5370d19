mod config;
mod database;
mod error;
mod handlers;
mod models;
mod services;
mod store;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

use config::Config;
use database::{create_database_pool, init_schema};
use store::{PgStore, SharedStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    let config = Config::from_env()?;

    let pool = create_database_pool(&config.database_url, config.max_connections)
        .await
        .context("failed to connect to database")?;

    init_schema(&pool)
        .await
        .context("failed to create database schema")?;

    let store: SharedStore = Arc::new(PgStore::new(pool));
    let app = create_router(store, config.frontend_origin.clone());

    let addr = config.bind_addr();
    log::info!("Inventory server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(store: SharedStore, frontend_origin: HeaderValue) -> Router {
    // Credentials rule out `Any`, so methods and headers echo the preflight request.
    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/items/", get(handlers::inventory::items_list))
        .route("/api/items/:item_id/adjust", post(handlers::inventory::adjust_item_stock))
        .route(
            "/api/movements/",
            get(handlers::movements::movements_list).delete(handlers::movements::clear_movements),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(store)
}
