use crate::capacity::CapacityTable;
use crate::presets::PresetTable;
use crate::SplitError;
use satchel_core::models::{Order, OrderItem};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Splitting policy, supplied by configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SplitRules {
    /// Maximum pouches allowed in one shipment
    pub pouch_threshold: u32,
    /// SKU whose presence marks a group for special handling
    pub special_handling_sku: String,
    /// Marker text written into the handling field
    pub special_handling_tag: String,
    /// Billing account stamped on every group of a split
    pub bill_to_account: Option<String>,
}

/// A split order ready for submission: the surviving parent and its children
#[derive(Debug, Clone)]
pub struct SplitPlan {
    pub parent: Order,
    pub children: Vec<Order>,
}

/// Partitions oversize orders into capacity-bounded shipment groups
pub struct ShipmentSplitter {
    capacity: Arc<CapacityTable>,
    presets: Arc<PresetTable>,
    rules: SplitRules,
}

impl ShipmentSplitter {
    pub fn new(capacity: Arc<CapacityTable>, presets: Arc<PresetTable>, rules: SplitRules) -> Self {
        Self {
            capacity,
            presets,
            rules,
        }
    }

    /// True when the order's pouch total exceeds the per-shipment threshold
    pub fn split_required(&self, order: &Order) -> bool {
        self.capacity.order_total(order) > self.rules.pouch_threshold
    }

    /// Partition an oversize order into a parent and capacity-bounded children.
    ///
    /// Callers check `split_required` first. The partition is a greedy,
    /// order-preserving first-fit: one bin is open at a time, items are
    /// visited in their listed order, and each item is drained unit by unit
    /// while one more unit still fits under the threshold. Quantities are
    /// tracked in a local accumulator; the input order is never mutated.
    pub fn split(&self, order: &Order) -> Result<SplitPlan, SplitError> {
        if order.items.iter().all(|item| item.quantity == 0) {
            return Err(SplitError::EmptyOrder);
        }
        for item in &order.items {
            let per_unit = self.capacity.pouches_for(&item.sku);
            if per_unit > self.rules.pouch_threshold {
                return Err(SplitError::OversizedItem {
                    sku: item.sku.clone(),
                    pouches: per_unit,
                });
            }
        }

        let threshold = self.rules.pouch_threshold;
        let needs_handling_tag = order.contains_sku(&self.rules.special_handling_sku);

        let mut remaining: Vec<u32> = order.items.iter().map(|item| item.quantity).collect();
        let mut unassigned = self.capacity.order_total(order);
        let mut bins: Vec<Vec<OrderItem>> = Vec::new();

        while unassigned > threshold {
            let mut bin: Vec<OrderItem> = Vec::new();
            let mut bin_total = 0u32;
            for (idx, item) in order.items.iter().enumerate() {
                let per_unit = self.capacity.pouches_for(&item.sku);
                let mut moved = 0u32;
                while remaining[idx] > 0 && bin_total + per_unit <= threshold {
                    remaining[idx] -= 1;
                    bin_total += per_unit;
                    unassigned -= per_unit;
                    moved += 1;
                }
                if moved > 0 {
                    bin.push(item.with_quantity(moved));
                }
            }
            debug!(bin = bins.len() + 1, pouches = bin_total, "closed shipment bin");
            bins.push(bin);
        }

        let shipment_count = bins.len() + 1;

        // The parent keeps whatever the bins did not take.
        let mut parent = order.clone();
        parent.items = order
            .items
            .iter()
            .zip(&remaining)
            .filter(|(_, &qty)| qty > 0)
            .map(|(item, &qty)| item.with_quantity(qty))
            .collect();
        self.presets.resolve(unassigned)?.apply(&mut parent);
        parent.advanced_options.shipment_label = Some(format!("Shipment 1 of {}", shipment_count));
        parent.advanced_options.merged_or_split = true;
        parent.advanced_options.parent_id = None;
        parent.advanced_options.merged_ids.clear();
        if let Some(account) = &self.rules.bill_to_account {
            parent.advanced_options.bill_to_account = Some(account.clone());
        }
        parent.customer_notes = Some(parent.item_summary());

        let mut children = Vec::with_capacity(bins.len());
        let mut tag_pending = needs_handling_tag;
        for (index, bin) in bins.into_iter().enumerate() {
            let bin_total: u32 = bin
                .iter()
                .map(|item| item.quantity * self.capacity.pouches_for(&item.sku))
                .sum();

            let mut child = order.clone();
            child.items = bin;
            child.order_id = None;
            child.order_key = Uuid::new_v4().to_string();
            child.order_total = None;
            child.amount_paid = None;
            child.payment_date = None;
            self.presets.resolve(bin_total)?.apply(&mut child);
            child.advanced_options.shipment_label =
                Some(format!("Shipment {} of {}", index + 2, shipment_count));
            child.advanced_options.merged_or_split = true;
            child.advanced_options.merged_ids.clear();
            child.advanced_options.parent_id = order.order_id;
            if let Some(account) = &self.rules.bill_to_account {
                child.advanced_options.bill_to_account = Some(account.clone());
            }
            child.customer_notes = Some(child.item_summary());

            if tag_pending && child.contains_sku(&self.rules.special_handling_sku) {
                Self::prepend_tag(
                    &mut child.advanced_options.handling_tag,
                    &self.rules.special_handling_tag,
                );
                tag_pending = false;
            }
            children.push(child);
        }

        // No child carries the trigger SKU, so the parent is marked instead.
        if tag_pending {
            Self::prepend_tag(
                &mut parent.advanced_options.handling_tag,
                &self.rules.special_handling_tag,
            );
        }

        Ok(SplitPlan { parent, children })
    }

    /// Preset and tagging for an order that fits in a single shipment
    pub fn prepare_single(&self, order: &Order) -> Result<Order, SplitError> {
        if order.items.iter().all(|item| item.quantity == 0) {
            return Err(SplitError::EmptyOrder);
        }

        let total = self.capacity.order_total(order);
        let mut prepared = order.clone();
        self.presets.resolve(total)?.apply(&mut prepared);
        if prepared.contains_sku(&self.rules.special_handling_sku) {
            Self::prepend_tag(
                &mut prepared.advanced_options.handling_tag,
                &self.rules.special_handling_tag,
            );
        }
        prepared.customer_notes = Some(prepared.item_summary());
        Ok(prepared)
    }

    /// The tag goes ahead of any text already in the field
    fn prepend_tag(field: &mut Option<String>, tag: &str) {
        *field = Some(match field.take() {
            Some(existing) if !existing.is_empty() => format!("{} | {}", tag, existing),
            _ => tag.to_string(),
        });
    }
}
