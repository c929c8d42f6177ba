//! Order filtering
//!
//! Four independent predicates (date, time of day, restaurant membership,
//! status). Each is a plain intersection, so the order they run in does not
//! change the result; the input order of the orders is preserved.

use chrono::{Duration, Timelike};

use crate::consts::{LAST_MINUTE_OF_DAY, MINUTES_PER_HOUR};
use crate::core::types::{FilterState, Order};
use crate::utils::Timezone;

/// Minutes since local midnight
fn minute_of_day(hour: u32, minute: u32) -> u32 {
    hour * MINUTES_PER_HOUR + minute
}

/// Keep orders whose creation instant falls within the selected local calendar day
fn matches_date(order: &Order, filters: &FilterState, timezone: Timezone) -> bool {
    let Some(date) = filters.date else {
        return true;
    };
    let start = timezone.start_of_day(date);
    let end = start + Duration::hours(24);
    order.created_at >= start && order.created_at < end
}

/// Keep orders created inside the inclusive `[start, end]` time-of-day window
fn matches_time_range(order: &Order, filters: &FilterState, timezone: Timezone) -> bool {
    if !filters.has_time_range() {
        return true;
    }
    let start = filters
        .start_time
        .map_or(0, |t| minute_of_day(t.hour(), t.minute()));
    let end = filters
        .end_time
        .map_or(LAST_MINUTE_OF_DAY, |t| minute_of_day(t.hour(), t.minute()));

    let local = timezone.to_fixed_offset(order.created_at);
    let order_minutes = minute_of_day(local.hour(), local.minute());
    start <= order_minutes && order_minutes <= end
}

fn matches_status(order: &Order, filters: &FilterState) -> bool {
    match filters.status {
        Some(bucket) => order.status.bucket() == bucket,
        None => true,
    }
}

/// Narrow `orders` to those relevant to `restaurant` under `filters`.
///
/// Membership is decided per order: an order is kept if any of its items
/// belongs to the restaurant, even when most items belong to others. The
/// aggregator re-checks each item.
pub(crate) fn filter_orders(
    orders: &[Order],
    restaurant: &str,
    filters: &FilterState,
    timezone: Timezone,
) -> Vec<Order> {
    let target = restaurant.to_lowercase();

    orders
        .iter()
        .filter(|order| {
            let keep = matches_date(order, filters, timezone)
                && matches_time_range(order, filters, timezone)
                && order.has_items_from(&target)
                && matches_status(order, filters);
            if !keep {
                tracing::trace!(order = %order.id, "order filtered out");
            }
            keep
        })
        .cloned()
        .collect()
}
