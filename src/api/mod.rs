//! REST API over the budget engine.
//!
//! Provides:
//! - `GET /catalog`: categories with their models
//! - `GET /catalog/{category}`: models of one category
//! - `POST /budget`: compute a budget for a list of selections
//! - `POST /report`: the same, rendered as the text report
//!
//! Every request builds its own [`Session`](crate::session::Session); only
//! the read-only catalog is shared.

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::catalog::EquipmentCatalog;

pub use types::{BudgetRequest, ItemRequest};

/// Immutable application state shared across all request handlers.
pub struct AppState {
    /// Equipment catalog loaded at startup.
    pub catalog: Arc<EquipmentCatalog>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/catalog", get(handlers::get_catalog))
        .route("/catalog/{category}", get(handlers::get_category))
        .route("/budget", post(handlers::post_budget))
        .route("/report", post(handlers::post_report))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    tracing::info!(%addr, "API server listening");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
