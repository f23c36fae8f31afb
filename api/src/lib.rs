use std::{env, sync::Arc};

mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use answer_engine::AnswerEngine;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

pub use crate::core::app_state::AppState;
pub use crate::error_handler::AppError;
use crate::{
    middleware_layer::{json_extractor::json_error_mapper, request_id::request_id},
    routes::{answer::answer_route::answer, root_route::root},
};

pub const DEFAULT_PORT: u16 = 10000;

/// Builds the HTTP router.
///
/// `POST /answer` gets the JSON rejection mapper so malformed bodies still
/// produce `200 {"answer": ...}`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/answer", post(answer))
        .route_layer(middleware::from_fn(json_error_mapper))
        .route("/", get(root))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Binds the listener and serves until Ctrl+C.
pub async fn start(engine: Arc<AnswerEngine>) -> Result<(), AppError> {
    let addr = bind_address(env::var("API_ADDRESS").ok(), env::var("PORT").ok())?;
    let app = router(Arc::new(AppState::new(engine)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;
    info!(%addr, "API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("API stopped");
    Ok(())
}

/// `API_ADDRESS` if set, else `0.0.0.0:$PORT` (default [`DEFAULT_PORT`]).
pub fn bind_address(api_address: Option<String>, port: Option<String>) -> Result<String, AppError> {
    if let Some(addr) = api_address.filter(|a| !a.trim().is_empty()) {
        return Ok(addr.trim().to_string());
    }
    let port = match port.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) => p.parse::<u16>().map_err(|_| AppError::InvalidEnv {
            var: "PORT",
            reason: "expected u16 (1..=65535)",
        })?,
        None => DEFAULT_PORT,
    };
    Ok(format!("0.0.0.0:{port}"))
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
