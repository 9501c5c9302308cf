use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod orchestrator;
pub mod state;
pub mod webhooks;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(webhooks::routes())
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
