//! API route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use agent::IntentResolver;
use workbook::DocumentPool;

use crate::api::handlers;
use crate::config::GatewayConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn IntentResolver>,
    pub config: Arc<GatewayConfig>,
    /// Present only when document pooling is enabled.
    pub pool: Option<Arc<DocumentPool>>,
}

/// Build the complete API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/excel-command", post(handlers::excel_command))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// CORS for the add-in front end. The original service allowed any origin in
/// development; production deployments should restrict this.
fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
