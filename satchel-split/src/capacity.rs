use satchel_core::models::Order;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Static SKU -> pouches-per-unit lookup
#[derive(Debug, Default)]
pub struct CapacityTable {
    pouches: HashMap<String, u32>,
    seen_unknown: Mutex<HashSet<String>>,
}

impl CapacityTable {
    pub fn new(pouches: HashMap<String, u32>) -> Self {
        Self {
            pouches,
            seen_unknown: Mutex::new(HashSet::new()),
        }
    }

    /// Pouches consumed by one unit of a SKU; unconfigured SKUs consume none
    pub fn pouches_for(&self, sku: &str) -> u32 {
        match self.pouches.get(sku) {
            Some(pouches) => *pouches,
            None => {
                if let Ok(mut seen) = self.seen_unknown.lock() {
                    if seen.insert(sku.to_string()) {
                        tracing::warn!("SKU {} has no pouch capacity configured, counting it as 0", sku);
                    }
                }
                0
            }
        }
    }

    /// Total pouches across an order's items
    pub fn order_total(&self, order: &Order) -> u32 {
        order
            .items
            .iter()
            .map(|item| item.quantity * self.pouches_for(&item.sku))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_core::models::OrderItem;

    fn table() -> CapacityTable {
        CapacityTable::new(HashMap::from([
            ("PCH-01".to_string(), 1),
            ("PCH-03".to_string(), 3),
        ]))
    }

    #[test]
    fn test_configured_sku_lookup() {
        assert_eq!(table().pouches_for("PCH-03"), 3);
    }

    #[test]
    fn test_unknown_sku_counts_as_zero() {
        assert_eq!(table().pouches_for("NOT-A-SKU"), 0);
    }

    #[test]
    fn test_order_total_sums_quantity_times_capacity() {
        let mut order = satchel_core::models::Order::new("1001", "key-1001");
        order.items = vec![
            OrderItem::new("PCH-01", 5),
            OrderItem::new("PCH-03", 2),
            OrderItem::new("NOT-A-SKU", 4),
        ];

        assert_eq!(table().order_total(&order), 11);
    }
}
