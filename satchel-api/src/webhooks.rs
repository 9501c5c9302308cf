use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ShipmentWebhook {
    pub resource_url: String,
    #[serde(default)]
    pub resource_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/webhooks/shipments", post(handle_shipment_webhook))
}

/// POST /v1/webhooks/shipments
/// Order-management notification that a batch of shipments is ready
pub async fn handle_shipment_webhook(
    State(state): State<AppState>,
    Json(payload): Json<ShipmentWebhook>,
) -> Result<(StatusCode, Json<WebhookAck>), AppError> {
    tracing::info!(
        "Received {} webhook",
        payload.resource_type.as_deref().unwrap_or("shipment")
    );

    let resource_url = with_item_detail(&payload.resource_url);
    let page = state
        .gateway
        .fetch_orders(&resource_url)
        .await
        .map_err(|e| AppError::UpstreamError(format!("order fetch failed: {}", e)))?;
    tracing::info!("Fetched {} orders", page.orders.len());

    let outcome = state.orchestrator.handle(page.orders).await;
    let message = outcome.summary();
    if outcome.all_completed() {
        Ok((StatusCode::OK, Json(WebhookAck { message })))
    } else {
        Err(AppError::ProcessingError(message))
    }
}

/// The resource URL omits line items by default; ask the API for them
fn with_item_detail(url: &str) -> String {
    if url.contains("includeShipmentItems=False") {
        url.replace("includeShipmentItems=False", "includeShipmentItems=True")
    } else if url.contains("includeShipmentItems=True") {
        url.to_string()
    } else if url.contains('?') {
        format!("{}&includeShipmentItems=True", url)
    } else {
        format!("{}?includeShipmentItems=True", url)
    }
}
