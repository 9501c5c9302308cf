use satchel_api::orchestrator::ShipmentOrchestrator;
use satchel_api::{app, AppState};
use satchel_gateway::app_config::Config;
use satchel_gateway::{HttpOrderGateway, OrderSubmitter};
use satchel_split::splitter::ShipmentSplitter;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "satchel_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting Satchel API on port {}", config.server.port);

    let capacity = Arc::new(config.capacity_table());
    let presets = Arc::new(config.preset_table().expect("Invalid preset table"));
    let splitter = Arc::new(ShipmentSplitter::new(
        capacity,
        presets,
        config.splitting.rules(),
    ));

    let gateway = Arc::new(
        HttpOrderGateway::new(&config.upstream).expect("Failed to build order gateway"),
    );
    let submitter = Arc::new(OrderSubmitter::new(gateway.clone()));
    let orchestrator = Arc::new(ShipmentOrchestrator::new(
        splitter,
        submitter,
        config.splitting.concurrency,
    ));

    let app_state = AppState {
        gateway,
        orchestrator,
    };
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
