use futures_util::future::join_all;
use satchel_core::models::Order;
use satchel_gateway::submitter::OrderSubmitter;
use satchel_split::splitter::ShipmentSplitter;
use satchel_split::SplitError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Completed,
    Partial,
    Failed,
}

/// Outcome of one order's pipeline
#[derive(Debug, Clone)]
pub struct OrderOutcome {
    pub order_number: String,
    pub status: OutcomeStatus,
    pub detail: Option<String>,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub outcomes: Vec<OrderOutcome>,
}

impl BatchOutcome {
    pub fn all_completed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| o.status == OutcomeStatus::Completed)
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} orders processed: {} completed, {} partial, {} failed",
            self.outcomes.len(),
            self.count(OutcomeStatus::Completed),
            self.count(OutcomeStatus::Partial),
            self.count(OutcomeStatus::Failed)
        )
    }
}

/// Fans a fetched order collection out to bounded concurrent pipelines
pub struct ShipmentOrchestrator {
    splitter: Arc<ShipmentSplitter>,
    submitter: Arc<OrderSubmitter>,
    pool: Arc<Semaphore>,
}

impl ShipmentOrchestrator {
    pub fn new(
        splitter: Arc<ShipmentSplitter>,
        submitter: Arc<OrderSubmitter>,
        concurrency: usize,
    ) -> Self {
        Self {
            splitter,
            submitter,
            pool: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    /// Run every order's pipeline; one order's failure never aborts its siblings
    pub async fn handle(&self, orders: Vec<Order>) -> BatchOutcome {
        let tasks = orders.into_iter().map(|order| {
            let splitter = Arc::clone(&self.splitter);
            let submitter = Arc::clone(&self.submitter);
            let pool = Arc::clone(&self.pool);
            async move {
                let _permit = pool.acquire().await.expect("worker pool semaphore closed");
                Self::process_order(splitter, submitter, order).await
            }
        });

        BatchOutcome {
            outcomes: join_all(tasks).await,
        }
    }

    async fn process_order(
        splitter: Arc<ShipmentSplitter>,
        submitter: Arc<OrderSubmitter>,
        order: Order,
    ) -> OrderOutcome {
        let order_number = order.order_number.clone();
        match Self::run_pipeline(splitter, submitter, order).await {
            Ok((status, detail)) => {
                match status {
                    OutcomeStatus::Completed => info!("order {} processed", order_number),
                    _ => warn!(
                        "order {} finished {:?}: {}",
                        order_number,
                        status,
                        detail.as_deref().unwrap_or("no detail")
                    ),
                }
                OrderOutcome {
                    order_number,
                    status,
                    detail,
                }
            }
            Err(e) => {
                // Configuration gaps are operator work, not transient faults
                if let Some(gap) = e.downcast_ref::<SplitError>() {
                    error!("order {}: configuration gap: {}", order_number, gap);
                } else {
                    error!("order {}: processing failed: {}", order_number, e);
                }
                OrderOutcome {
                    order_number,
                    status: OutcomeStatus::Failed,
                    detail: Some(e.to_string()),
                }
            }
        }
    }

    async fn run_pipeline(
        splitter: Arc<ShipmentSplitter>,
        submitter: Arc<OrderSubmitter>,
        order: Order,
    ) -> Result<(OutcomeStatus, Option<String>), Box<dyn std::error::Error + Send + Sync>> {
        if splitter.split_required(&order) {
            let plan = splitter.split(&order)?;
            let report = submitter.submit_split(plan).await?;
            if report.is_partial() {
                let detail = format!(
                    "{} of {} child orders were not created",
                    report.failed_children.len(),
                    report.failed_children.len() + report.created_child_ids.len()
                );
                return Ok((OutcomeStatus::Partial, Some(detail)));
            }
            return Ok((OutcomeStatus::Completed, None));
        }

        let prepared = splitter.prepare_single(&order)?;
        let result = submitter.submit_single(&prepared).await?;
        if result.success {
            Ok((OutcomeStatus::Completed, None))
        } else {
            Ok((OutcomeStatus::Failed, result.error_message))
        }
    }
}
