//! HTTP routes.

use crate::hub::HubHandle;
use crate::ws::ws_handler;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use tower::ServiceBuilder;
use tracing::info;

/// Builds the router: `/ws` for players, `/health` for liveness checks.
pub fn build_router(hub: HubHandle) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(
                method = %req.method(),
                uri = %req.uri(),
                "Incoming HTTP request"
            );
            req
        }))
        .with_state(hub)
}

async fn health() -> &'static str {
    "ok"
}
