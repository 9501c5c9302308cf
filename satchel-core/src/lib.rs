pub mod gateway;
pub mod models;

pub use gateway::{BatchCreateResponse, CreateOrderResult, OrderGateway, OrderPage};
pub use models::{AdvancedOptions, Dimensions, Order, OrderItem, Weight};
