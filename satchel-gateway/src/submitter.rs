use satchel_core::{CreateOrderResult, Order, OrderGateway};
use satchel_split::splitter::SplitPlan;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("parent order {order_number} update rejected: {message}")]
    ParentRejected {
        order_number: String,
        message: String,
    },
}

/// A child order the batch create reported as failed
#[derive(Debug, Clone)]
pub struct ChildFailure {
    pub order_key: String,
    pub error: String,
}

/// What came back from submitting one split
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub order_number: String,
    pub parent_id: Option<i64>,
    pub created_child_ids: Vec<i64>,
    pub failed_children: Vec<ChildFailure>,
}

impl SubmitReport {
    pub fn is_partial(&self) -> bool {
        !self.failed_children.is_empty()
    }
}

/// Two-phase submission: children first, then the parent that links them
pub struct OrderSubmitter {
    gateway: Arc<dyn OrderGateway>,
}

impl OrderSubmitter {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self { gateway }
    }

    /// Create the child orders in one batch, then update the parent with the
    /// identifiers of the children that were actually created. The parent
    /// goes second because its linkage metadata depends on those ids.
    pub async fn submit_split(
        &self,
        plan: SplitPlan,
    ) -> Result<SubmitReport, Box<dyn std::error::Error + Send + Sync>> {
        let SplitPlan { mut parent, children } = plan;

        let batch = self.gateway.create_orders(&children).await?;
        if batch.results.len() != children.len() {
            warn!(
                "batch create for order {} answered {} results for {} children",
                parent.order_number,
                batch.results.len(),
                children.len()
            );
        }

        let mut created = Vec::new();
        let mut failed = Vec::new();
        for (child, result) in children.iter().zip(batch.results.iter()) {
            if result.success {
                if let Some(id) = result.order_id {
                    created.push(id);
                }
            } else {
                let error = result
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string());
                warn!("child order {} was not created: {}", child.order_key, error);
                failed.push(ChildFailure {
                    order_key: child.order_key.clone(),
                    error,
                });
            }
        }

        // Only children that exist upstream get linked.
        parent.advanced_options.merged_ids = created.clone();
        let parent_result = self.gateway.create_order(&parent).await?;
        if !parent_result.success {
            return Err(SubmitError::ParentRejected {
                order_number: parent.order_number.clone(),
                message: parent_result
                    .error_message
                    .unwrap_or_else(|| "unknown error".to_string()),
            }
            .into());
        }

        info!(
            "order {} split into {} shipments, {} children created",
            parent.order_number,
            children.len() + 1,
            created.len()
        );

        Ok(SubmitReport {
            order_number: parent.order_number,
            parent_id: parent_result.order_id.or(parent.order_id),
            created_child_ids: created,
            failed_children: failed,
        })
    }

    /// Single create-or-update for an order that was not split
    pub async fn submit_single(
        &self,
        order: &Order,
    ) -> Result<CreateOrderResult, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.gateway.create_order(order).await?;
        Ok(result)
    }
}
