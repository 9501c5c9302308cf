pub mod app_config;
pub mod http_gateway;
pub mod mocks;
pub mod submitter;

pub use http_gateway::HttpOrderGateway;
pub use submitter::{OrderSubmitter, SubmitReport};
