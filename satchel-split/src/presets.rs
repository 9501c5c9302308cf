use crate::SplitError;
use satchel_core::models::{Dimensions, Order, Weight};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Shipping configuration applied to a group once its pouch total is known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingPreset {
    pub weight: Weight,
    pub dimensions: Option<Dimensions>,
    pub carrier_code: Option<String>,
    pub service_code: Option<String>,
    pub package_code: Option<String>,
    pub confirmation: Option<String>,
}

impl ShippingPreset {
    /// Stamp this preset's weight and service options onto an order
    pub fn apply(&self, order: &mut Order) {
        order.weight = Some(self.weight.clone());
        if self.dimensions.is_some() {
            order.dimensions = self.dimensions.clone();
        }
        if self.carrier_code.is_some() {
            order.carrier_code = self.carrier_code.clone();
        }
        if self.service_code.is_some() {
            order.service_code = self.service_code.clone();
        }
        if self.package_code.is_some() {
            order.package_code = self.package_code.clone();
        }
        if self.confirmation.is_some() {
            order.confirmation = self.confirmation.clone();
        }
    }
}

/// Preset bundles keyed by exact pouch total
#[derive(Debug, Default)]
pub struct PresetTable {
    by_total: HashMap<u32, ShippingPreset>,
}

impl PresetTable {
    pub fn new(by_total: HashMap<u32, ShippingPreset>) -> Self {
        Self { by_total }
    }

    /// Exact-key lookup; a missing entry is a configuration gap, not a retryable fault
    pub fn resolve(&self, total: u32) -> Result<&ShippingPreset, SplitError> {
        self.by_total
            .get(&total)
            .ok_or(SplitError::PresetNotFound(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(ounces: f64) -> ShippingPreset {
        ShippingPreset {
            weight: Weight {
                value: ounces,
                units: "ounces".to_string(),
            },
            dimensions: None,
            carrier_code: Some("stamps_com".to_string()),
            service_code: None,
            package_code: Some("package".to_string()),
            confirmation: None,
        }
    }

    #[test]
    fn test_resolve_exact_total() {
        let table = PresetTable::new(HashMap::from([(4, preset(16.0))]));
        assert_eq!(table.resolve(4).unwrap().weight.value, 16.0);
    }

    #[test]
    fn test_missing_total_is_a_configuration_gap() {
        let table = PresetTable::new(HashMap::from([(4, preset(16.0))]));
        let err = table.resolve(5).unwrap_err();
        assert!(matches!(err, SplitError::PresetNotFound(5)));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let table = PresetTable::new(HashMap::from([(4, preset(16.0))]));
        assert_eq!(table.resolve(4).unwrap(), table.resolve(4).unwrap());
    }

    #[test]
    fn test_apply_keeps_unset_options() {
        let mut order = satchel_core::models::Order::new("1001", "key-1001");
        order.service_code = Some("usps_priority_mail".to_string());

        preset(16.0).apply(&mut order);

        assert_eq!(order.weight.unwrap().value, 16.0);
        assert_eq!(order.carrier_code.as_deref(), Some("stamps_com"));
        // The preset has no service code, so the order keeps its own
        assert_eq!(order.service_code.as_deref(), Some("usps_priority_mail"));
    }
}
