use crate::models::Order;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One page of orders referenced by a webhook resource URL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

/// Per-record outcome of a create-or-update call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResult {
    pub order_id: Option<i64>,
    pub order_key: Option<String>,
    #[serde(default = "success_default")]
    pub success: bool,
    pub error_message: Option<String>,
}

// The single-order endpoint answers with the created record and no flag
fn success_default() -> bool {
    true
}

/// Response to a batched create; results align positionally with the request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResponse {
    #[serde(default)]
    pub has_errors: bool,
    #[serde(default)]
    pub results: Vec<CreateOrderResult>,
}

#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Fetch the order collection a webhook points at
    async fn fetch_orders(
        &self,
        resource_url: &str,
    ) -> Result<OrderPage, Box<dyn std::error::Error + Send + Sync>>;

    /// Create or update a single order, keyed by its order key
    async fn create_order(
        &self,
        order: &Order,
    ) -> Result<CreateOrderResult, Box<dyn std::error::Error + Send + Sync>>;

    /// Create a batch of orders in one call
    async fn create_orders(
        &self,
        orders: &[Order],
    ) -> Result<BatchCreateResponse, Box<dyn std::error::Error + Send + Sync>>;
}
