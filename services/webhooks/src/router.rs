use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use idsync_core::health::{healthz, root};
use idsync_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{health::readyz, webhook::receive_webhook};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Webhooks
        .route("/webhooks/{provider}", post(receive_webhook))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
