use crate::app_config::UpstreamConfig;
use async_trait::async_trait;
use reqwest::Client;
use satchel_core::{BatchCreateResponse, CreateOrderResult, Order, OrderGateway, OrderPage};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("order API returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// reqwest-backed client for the order-management REST API
pub struct HttpOrderGateway {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl HttpOrderGateway {
    pub fn new(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Status {
            status: status.as_u16(),
            body: body.chars().take(512).collect(),
        })
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn fetch_orders(
        &self,
        resource_url: &str,
    ) -> Result<OrderPage, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .get(resource_url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await
            .map_err(GatewayError::from)?;

        let page = Self::check(response)
            .await?
            .json::<OrderPage>()
            .await
            .map_err(GatewayError::from)?;
        Ok(page)
    }

    async fn create_order(
        &self,
        order: &Order,
    ) -> Result<CreateOrderResult, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/orders/createorder", self.base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(order)
            .send()
            .await
            .map_err(GatewayError::from)?;

        let result = Self::check(response)
            .await?
            .json::<CreateOrderResult>()
            .await
            .map_err(GatewayError::from)?;
        Ok(result)
    }

    async fn create_orders(
        &self,
        orders: &[Order],
    ) -> Result<BatchCreateResponse, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/orders/createorders", self.base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(orders)
            .send()
            .await
            .map_err(GatewayError::from)?;

        let batch = Self::check(response)
            .await?
            .json::<BatchCreateResponse>()
            .await
            .map_err(GatewayError::from)?;
        Ok(batch)
    }
}
