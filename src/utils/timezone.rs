use chrono::offset::Offset;
use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Timezone used to interpret "local" dates and times of day
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Current calendar date in this timezone
    pub(crate) fn today(self) -> NaiveDate {
        self.to_fixed_offset(Utc::now()).date_naive()
    }

    fn resolve(self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Timezone::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Timezone::Named(tz) => tz
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    /// First instant of `date` in this timezone
    pub(crate) fn start_of_day(self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        self.resolve(&midnight)
            // midnight skipped by a DST jump
            .or_else(|| self.resolve(&(midnight + Duration::hours(1))))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    }
}
