//! Core module - order filtering, aggregation and the analytics session

mod aggregator;
mod filter;
mod session;
pub(crate) mod types;

pub(crate) use session::{AnalyticsSession, Snapshot};
pub(crate) use types::{
    Analytics, ItemStats, LineItem, LoadResult, Order, OrderStatus, OrderSummary, StatusBucket,
};
