pub mod capacity;
pub mod presets;
pub mod splitter;

pub use capacity::CapacityTable;
pub use presets::{PresetTable, ShippingPreset};
pub use splitter::{ShipmentSplitter, SplitPlan, SplitRules};

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("no shipping preset configured for {0} pouches")]
    PresetNotFound(u32),

    #[error("one unit of {sku} consumes {pouches} pouches, more than fits in a single shipment")]
    OversizedItem { sku: String, pouches: u32 },

    #[error("order has no items with a positive quantity")]
    EmptyOrder,
}
