//! Core data types for the order analytics pipeline
//!
//! Orders arrive here already validated by the source layer; everything in
//! this module is strongly typed and immutable once built.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::consts::{DATE_FORMAT, TIME_FORMAT};

/// Raw order lifecycle status as stored in the database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    OnTheWay,
    Delivered,
}

impl OrderStatus {
    /// Parse one of the five literal wire strings (exact match)
    pub(crate) fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "Pending" => Some(OrderStatus::Pending),
            "Accepted" => Some(OrderStatus::Accepted),
            "Preparing" => Some(OrderStatus::Preparing),
            "On the way" => Some(OrderStatus::OnTheWay),
            "Delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }

    pub(crate) fn bucket(self) -> StatusBucket {
        status_bucket(self)
    }
}

/// Logical pipeline stage that raw statuses collapse into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum StatusBucket {
    Pending,
    /// Accepted, Preparing and On the way
    Accepted,
    Delivered,
}

impl StatusBucket {
    pub(crate) fn label(self) -> &'static str {
        match self {
            StatusBucket::Pending => "Pending",
            StatusBucket::Accepted => "Accepted",
            StatusBucket::Delivered => "Delivered",
        }
    }
}

/// The single place where raw statuses are mapped onto buckets.
pub(crate) fn status_bucket(status: OrderStatus) -> StatusBucket {
    match status {
        OrderStatus::Pending => StatusBucket::Pending,
        OrderStatus::Accepted | OrderStatus::Preparing | OrderStatus::OnTheWay => {
            StatusBucket::Accepted
        }
        OrderStatus::Delivered => StatusBucket::Delivered,
    }
}

/// One line of an order. An order may mix items from several restaurants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineItem {
    /// Restaurant display name, empty when the record had none
    pub(crate) restaurant_name: String,
    pub(crate) item_name: String,
    pub(crate) quantity: u64,
    /// Unit price
    pub(crate) price: Decimal,
}

impl LineItem {
    /// Case-insensitive display name match; `target_lower` must already be lowercased.
    pub(crate) fn belongs_to(&self, target_lower: &str) -> bool {
        !self.restaurant_name.is_empty() && self.restaurant_name.to_lowercase() == target_lower
    }

    /// Price times quantity, saturating at `Decimal::MAX`
    pub(crate) fn total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Order {
    pub(crate) id: String,
    pub(crate) items: Vec<LineItem>,
    pub(crate) status: OrderStatus,
    pub(crate) created_at: DateTime<Utc>,
}

impl Order {
    pub(crate) fn has_items_from(&self, target_lower: &str) -> bool {
        self.items.iter().any(|item| item.belongs_to(target_lower))
    }
}

/// User-selected filters. `None` on any field means no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FilterState {
    pub(crate) date: Option<NaiveDate>,
    pub(crate) start_time: Option<NaiveTime>,
    pub(crate) end_time: Option<NaiveTime>,
    /// `None` means all statuses
    pub(crate) status: Option<StatusBucket>,
}

impl FilterState {
    pub(crate) fn clear(&mut self) {
        *self = FilterState::default();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self == &FilterState::default()
    }

    pub(crate) fn has_time_range(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some()
    }

    /// Short human description, e.g. "2025-03-01, 09:00-17:30, status pending"
    pub(crate) fn describe(&self) -> String {
        if self.is_empty() {
            return "no filters".to_string();
        }
        let mut parts = Vec::new();
        if let Some(date) = self.date {
            parts.push(date.format(DATE_FORMAT).to_string());
        }
        if self.has_time_range() {
            let start = self
                .start_time
                .map_or_else(|| "00:00".to_string(), |t| t.format(TIME_FORMAT).to_string());
            let end = self
                .end_time
                .map_or_else(|| "23:59".to_string(), |t| t.format(TIME_FORMAT).to_string());
            parts.push(format!("{start}-{end}"));
        }
        if let Some(status) = self.status {
            parts.push(format!("status {}", status.label().to_lowercase()));
        }
        parts.join(", ")
    }
}

/// Per-item sales figures within the filtered order set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemStats {
    pub(crate) item_name: String,
    pub(crate) total_quantity: u64,
    pub(crate) total_revenue: Decimal,
    pub(crate) pending_count: u64,
    pub(crate) accepted_count: u64,
    pub(crate) delivered_count: u64,
}

/// Order-level totals; item and revenue totals are always derived from the item list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderSummary {
    pub(crate) total_orders: usize,
    pub(crate) total_items: u64,
    pub(crate) total_revenue: Decimal,
    pub(crate) pending_orders: usize,
    pub(crate) accepted_orders: usize,
    pub(crate) delivered_orders: usize,
}

/// Result of one filter + aggregate pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Analytics {
    pub(crate) item_stats: Vec<ItemStats>,
    pub(crate) summary: OrderSummary,
}

/// Loading result with statistics
#[derive(Debug, Default)]
pub(crate) struct LoadResult {
    pub(crate) orders: Vec<Order>,
    /// Malformed records excluded at the boundary
    pub(crate) skipped: usize,
    pub(crate) valid: usize,
    pub(crate) elapsed_ms: f64,
}
