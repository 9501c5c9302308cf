use crate::orchestrator::ShipmentOrchestrator;
use satchel_core::OrderGateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn OrderGateway>,
    pub orchestrator: Arc<ShipmentOrchestrator>,
}
