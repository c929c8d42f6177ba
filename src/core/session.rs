//! Stateful analytics session
//!
//! Holds the current filters for one restaurant and publishes computed
//! results. Every refresh gets a generation number; a result is only
//! published when nothing newer has been published yet, so a slow refresh
//! started under old filters cannot overwrite a later one.

use chrono::{NaiveDate, NaiveTime};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::aggregator::compute;
use crate::core::types::{Analytics, FilterState, LoadResult, StatusBucket};
use crate::error::AppError;
use crate::source::OrderSource;
use crate::utils::Timezone;

/// Issued by [`AnalyticsSession::begin_refresh`], redeemed by [`AnalyticsSession::complete`]
#[derive(Debug, Clone)]
pub(crate) struct RefreshTicket {
    generation: u64,
    filters: FilterState,
}

/// Last published result together with the inputs that produced it
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub(crate) generation: u64,
    pub(crate) filters: FilterState,
    pub(crate) analytics: Analytics,
    pub(crate) valid: usize,
    pub(crate) skipped: usize,
    pub(crate) elapsed_ms: f64,
}

#[derive(Debug)]
pub(crate) struct AnalyticsSession {
    restaurant: String,
    timezone: Timezone,
    filters: FilterState,
    next_generation: AtomicU64,
    latest: Mutex<Option<Snapshot>>,
}

impl AnalyticsSession {
    pub(crate) fn new(restaurant: impl Into<String>, timezone: Timezone) -> Self {
        AnalyticsSession {
            restaurant: restaurant.into(),
            timezone,
            filters: FilterState::default(),
            next_generation: AtomicU64::new(1),
            latest: Mutex::new(None),
        }
    }

    pub(crate) fn restaurant(&self) -> &str {
        &self.restaurant
    }

    pub(crate) fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub(crate) fn set_date(&mut self, date: Option<NaiveDate>) {
        self.filters.date = date;
    }

    pub(crate) fn set_time_range(&mut self, start: Option<NaiveTime>, end: Option<NaiveTime>) {
        self.filters.start_time = start;
        self.filters.end_time = end;
    }

    pub(crate) fn set_status(&mut self, status: Option<StatusBucket>) {
        self.filters.status = status;
    }

    /// Reset every filter to "no constraint"; the next refresh sees all orders
    #[allow(dead_code)]
    pub(crate) fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Start a refresh under the current filters
    pub(crate) fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket {
            generation: self.next_generation.fetch_add(1, Ordering::SeqCst),
            filters: self.filters.clone(),
        }
    }

    /// Compute and publish the result for `ticket`.
    ///
    /// Returns `false` (and publishes nothing) when a newer refresh has
    /// already been published.
    pub(crate) fn complete(&self, ticket: RefreshTicket, loaded: &LoadResult) -> bool {
        let analytics = compute(
            &loaded.orders,
            &self.restaurant,
            &ticket.filters,
            self.timezone,
        );

        let mut latest = match self.latest.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(current) = latest.as_ref()
            && current.generation > ticket.generation
        {
            tracing::debug!(
                stale = ticket.generation,
                current = current.generation,
                "Discarding stale refresh"
            );
            return false;
        }

        *latest = Some(Snapshot {
            generation: ticket.generation,
            filters: ticket.filters,
            analytics,
            valid: loaded.valid,
            skipped: loaded.skipped,
            elapsed_ms: loaded.elapsed_ms,
        });
        true
    }

    /// Fetch from `source` and publish. A fetch failure leaves the previous result untouched.
    pub(crate) fn refresh(&self, source: &dyn OrderSource) -> Result<bool, AppError> {
        let ticket = self.begin_refresh();
        let loaded = source.fetch()?;
        Ok(self.complete(ticket, &loaded))
    }

    pub(crate) fn latest(&self) -> Option<Snapshot> {
        match self.latest.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
