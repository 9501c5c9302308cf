use async_trait::async_trait;
use satchel_core::{BatchCreateResponse, CreateOrderResult, Order, OrderGateway, OrderPage};
use std::sync::Mutex;

/// Scriptable in-memory gateway used by tests
#[derive(Default)]
pub struct MockOrderGateway {
    /// Orders handed back by `fetch_orders`
    pub page: Mutex<Vec<Order>>,
    /// Scripted batch response; when unset, every child succeeds with ids 501, 502, ...
    pub batch_response: Mutex<Option<BatchCreateResponse>>,
    /// Scripted single-create response; when unset, the call succeeds
    pub single_response: Mutex<Option<CreateOrderResult>>,
    pub created_batches: Mutex<Vec<Vec<Order>>>,
    pub created_singles: Mutex<Vec<Order>>,
    pub calls: Mutex<Vec<&'static str>>,
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
    async fn fetch_orders(
        &self,
        _resource_url: &str,
    ) -> Result<OrderPage, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.lock().unwrap().push("fetch_orders");
        let orders = self.page.lock().unwrap().clone();
        Ok(OrderPage {
            total: Some(orders.len() as u32),
            orders,
            page: Some(1),
            pages: Some(1),
        })
    }

    async fn create_order(
        &self,
        order: &Order,
    ) -> Result<CreateOrderResult, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.lock().unwrap().push("create_order");
        self.created_singles.lock().unwrap().push(order.clone());
        if let Some(result) = self.single_response.lock().unwrap().clone() {
            return Ok(result);
        }
        Ok(CreateOrderResult {
            order_id: order.order_id.or(Some(900)),
            order_key: Some(order.order_key.clone()),
            success: true,
            error_message: None,
        })
    }

    async fn create_orders(
        &self,
        orders: &[Order],
    ) -> Result<BatchCreateResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.lock().unwrap().push("create_orders");
        self.created_batches.lock().unwrap().push(orders.to_vec());
        if let Some(batch) = self.batch_response.lock().unwrap().clone() {
            return Ok(batch);
        }
        let results = orders
            .iter()
            .enumerate()
            .map(|(idx, order)| CreateOrderResult {
                order_id: Some(501 + idx as i64),
                order_key: Some(order.order_key.clone()),
                success: true,
                error_message: None,
            })
            .collect();
        Ok(BatchCreateResponse {
            has_errors: false,
            results,
        })
    }
}
