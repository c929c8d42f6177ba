/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-of-day format accepted by `--from` / `--to`: "09:30"
pub(crate) const TIME_FORMAT: &str = "%H:%M";

/// Fallback item name when a line item has none
pub(crate) const UNKNOWN_ITEM: &str = "Unknown Item";

pub(crate) const MINUTES_PER_HOUR: u32 = 60;

/// 23:59 expressed in minutes since midnight
pub(crate) const LAST_MINUTE_OF_DAY: u32 = 24 * MINUTES_PER_HOUR - 1;
