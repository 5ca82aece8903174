//! # Car Registry Backend
//!
//! A small REST service that stores cars in SQLite.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum handlers, response mapping)
//!     ↓
//! Domain Layer (validation, car operations)
//!     ↓
//! Storage Layer (CarGateway trait, SQLite implementation)
//! ```
//!
//! The domain layer holds the store as an injected `Arc<dyn CarGateway>`, so
//! nothing below the router knows whether it talks to SQLite or a test double.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{http::Method, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::CarService;
use crate::storage::{CarGateway, DbConnection};

/// Main application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub car_service: CarService,
}

impl AppState {
    pub fn new(gateway: Arc<dyn CarGateway>) -> Self {
        Self {
            car_service: CarService::new(gateway),
        }
    }
}

/// Open the store (creating the schema if needed) and wire up the services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(Arc::new(db_conn)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let allow_origin = match &config.cors_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/cars",
            get(io::list_cars)
                .post(io::create_car)
                .fallback(io::method_not_allowed),
        )
        .route(
            "/cars/:id",
            get(io::get_car)
                .put(io::update_car)
                .delete(io::delete_car)
                .fallback(io::method_not_allowed),
        );

    Router::new()
        .nest("/api", api_routes)
        .fallback(io::route_not_found)
        .layer(CatchPanicLayer::custom(io::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
