//! Item and order aggregation
//!
//! Turns a filtered order list into the per-item breakdown and the order summary.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::core::filter::filter_orders;
use crate::core::types::{Analytics, FilterState, ItemStats, Order, OrderSummary, StatusBucket};
use crate::utils::Timezone;

/// Running totals for one item name during a single aggregation pass
#[derive(Debug)]
struct ItemAccumulator {
    item_name: String,
    total_quantity: u64,
    total_revenue: Decimal,
    pending_count: u64,
    accepted_count: u64,
    delivered_count: u64,
}

impl ItemAccumulator {
    fn new(item_name: String) -> Self {
        ItemAccumulator {
            item_name,
            total_quantity: 0,
            total_revenue: Decimal::ZERO,
            pending_count: 0,
            accepted_count: 0,
            delivered_count: 0,
        }
    }

    /// Totals saturate instead of overflowing
    fn add(&mut self, quantity: u64, revenue: Decimal, bucket: StatusBucket) {
        self.total_quantity = self.total_quantity.saturating_add(quantity);
        self.total_revenue = self.total_revenue.saturating_add(revenue);
        let count = match bucket {
            StatusBucket::Pending => &mut self.pending_count,
            StatusBucket::Accepted => &mut self.accepted_count,
            StatusBucket::Delivered => &mut self.delivered_count,
        };
        *count = count.saturating_add(quantity);
    }

    fn into_item_stats(self) -> ItemStats {
        ItemStats {
            item_name: self.item_name,
            total_quantity: self.total_quantity,
            total_revenue: self.total_revenue,
            pending_count: self.pending_count,
            accepted_count: self.accepted_count,
            delivered_count: self.delivered_count,
        }
    }
}

/// Accumulators kept in first-seen order, with a name index for lookup
#[derive(Debug, Default)]
struct ItemArena {
    index: HashMap<String, usize>,
    items: Vec<ItemAccumulator>,
}

impl ItemArena {
    fn entry(&mut self, item_name: &str) -> &mut ItemAccumulator {
        let slot = match self.index.get(item_name) {
            Some(&slot) => slot,
            None => {
                let slot = self.items.len();
                self.items.push(ItemAccumulator::new(item_name.to_string()));
                self.index.insert(item_name.to_string(), slot);
                slot
            }
        };
        &mut self.items[slot]
    }

    fn into_sorted_stats(self) -> Vec<ItemStats> {
        let mut stats: Vec<ItemStats> = self
            .items
            .into_iter()
            .map(ItemAccumulator::into_item_stats)
            .collect();
        // stable: equal revenue keeps first-seen order
        stats.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        stats
    }
}

/// Build the item breakdown and order summary for `restaurant`.
///
/// Only items belonging to the restaurant contribute to item figures. Status
/// counters use the status of the enclosing order, since items carry none.
pub(crate) fn aggregate(orders: &[Order], restaurant: &str) -> Analytics {
    let target = restaurant.to_lowercase();
    let mut arena = ItemArena::default();
    let mut summary = OrderSummary {
        total_orders: orders.len(),
        ..Default::default()
    };

    for order in orders {
        let bucket = order.status.bucket();
        match bucket {
            StatusBucket::Pending => summary.pending_orders += 1,
            StatusBucket::Accepted => summary.accepted_orders += 1,
            StatusBucket::Delivered => summary.delivered_orders += 1,
        }

        for item in order.items.iter().filter(|item| item.belongs_to(&target)) {
            arena
                .entry(&item.item_name)
                .add(item.quantity, item.total(), bucket);
        }
    }

    let item_stats = arena.into_sorted_stats();
    summary.total_items = item_stats
        .iter()
        .fold(0, |acc: u64, s| acc.saturating_add(s.total_quantity));
    summary.total_revenue = item_stats
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.total_revenue));

    Analytics {
        item_stats,
        summary,
    }
}

/// Filter then aggregate in one call
pub(crate) fn compute(
    orders: &[Order],
    restaurant: &str,
    filters: &FilterState,
    timezone: Timezone,
) -> Analytics {
    let filtered = filter_orders(orders, restaurant, filters, timezone);
    tracing::debug!(
        total = orders.len(),
        kept = filtered.len(),
        filters = %filters.describe(),
        "Filtered orders"
    );
    aggregate(&filtered, restaurant)
}
