use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Physical weight as the order-management wire expresses it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weight {
    pub value: f64,
    pub units: String,
}

/// Package dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub units: String,
}

/// One (SKU, quantity) line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub sku: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_weight: Option<Weight>,
    /// Wire fields we do not model, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderItem {
    pub fn new(sku: impl Into<String>, quantity: u32) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            name: None,
            unit_weight: None,
            extra: Map::new(),
        }
    }

    /// Same line with a different quantity
    pub fn with_quantity(&self, quantity: u32) -> Self {
        let mut item = self.clone();
        item.quantity = quantity;
        item
    }
}

/// Metadata the order-management system files under "advancedOptions"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedOptions {
    /// Free-text shipment sequence label ("Shipment 2 of 3")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_label: Option<String>,
    /// Special-handling marker, stamped on at most one group of a split
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handling_tag: Option<String>,
    /// Identifiers of the child orders created from this order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub merged_or_split: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to_account: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One order-management record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Assigned by the order-management system; absent until created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    pub order_number: String,
    /// Globally unique token; creates and updates are keyed by it
    pub order_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub advanced_options: AdvancedOptions,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    pub fn new(order_number: impl Into<String>, order_key: impl Into<String>) -> Self {
        Self {
            order_id: None,
            order_number: order_number.into(),
            order_key: order_key.into(),
            order_status: None,
            items: Vec::new(),
            order_total: None,
            amount_paid: None,
            payment_date: None,
            weight: None,
            dimensions: None,
            carrier_code: None,
            service_code: None,
            package_code: None,
            confirmation: None,
            customer_notes: None,
            internal_notes: None,
            advanced_options: AdvancedOptions::default(),
            extra: Map::new(),
        }
    }

    /// Human-readable line-item summary for the notes field
    pub fn item_summary(&self) -> String {
        let lines: Vec<String> = self
            .items
            .iter()
            .map(|item| format!("{}({})", item.sku, item.quantity))
            .collect();
        format!("Items: {}", lines.join(", "))
    }

    /// True when any line carries at least one unit of the given SKU
    pub fn contains_sku(&self, sku: &str) -> bool {
        self.items.iter().any(|item| item.sku == sku && item.quantity > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_summary_format() {
        let mut order = Order::new("1001", "key-1001");
        order.items = vec![OrderItem::new("PCH-01", 2), OrderItem::new("PCH-03", 1)];

        assert_eq!(order.item_summary(), "Items: PCH-01(2), PCH-03(1)");
    }

    #[test]
    fn test_contains_sku_ignores_zero_quantity() {
        let mut order = Order::new("1001", "key-1001");
        order.items = vec![OrderItem::new("PCH-01", 0), OrderItem::new("PCH-03", 1)];

        assert!(!order.contains_sku("PCH-01"));
        assert!(order.contains_sku("PCH-03"));
    }

    #[test]
    fn test_unmodeled_wire_fields_round_trip() {
        let wire = serde_json::json!({
            "orderNumber": "1001",
            "orderKey": "key-1001",
            "requestedShippingService": "ground",
            "items": [{"sku": "PCH-01", "quantity": 1, "lineItemKey": "li-1"}],
        });

        let order: Order = serde_json::from_value(wire).unwrap();
        assert_eq!(
            order.extra.get("requestedShippingService"),
            Some(&serde_json::json!("ground"))
        );

        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back["requestedShippingService"], "ground");
        assert_eq!(back["items"][0]["lineItemKey"], "li-1");
    }
}
