use chrono::{Days, NaiveDate, NaiveTime};

use crate::consts::{DATE_FORMAT, TIME_FORMAT};
use crate::error::AppError;
use crate::utils::Timezone;

/// Parse a `--date` value: YYYYMMDD, YYYY-MM-DD, "today" or "yesterday"
pub(crate) fn parse_date(s: &str, timezone: Timezone) -> Result<NaiveDate, AppError> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("today") {
        return Ok(timezone.today());
    }
    if trimmed.eq_ignore_ascii_case("yesterday")
        && let Some(d) = timezone.today().checked_sub_days(Days::new(1))
    {
        return Ok(d);
    }
    if trimmed.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y%m%d")
    {
        return Ok(d);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Parse a time of day as HH:MM (24h)
pub(crate) fn parse_time(s: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).map_err(|_| AppError::InvalidTime {
        input: s.to_string(),
    })
}
