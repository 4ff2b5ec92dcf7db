//! Poll cycle: directory → keyword match → dedup → alert → persist.
//!
//! For each cycle:
//! 1. Load the notified set from disk
//! 2. Fetch the channel directory
//! 3. For each channel in listing order, alert if it matches and has not been
//!    alerted before, then record its id and persist before moving on
//!
//! Cycles are serialised by an internal lock; a cycle requested while another
//! is in flight is skipped.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use sentinel_common::error::AppError;
use sentinel_common::types::ListingShape;
use sentinel_directory::ChannelSource;
use sentinel_notifier::AlertPublisher;

use crate::matcher::KeywordMatcher;
use crate::notified::NotifiedStore;

/// Summary of one completed poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub shape: ListingShape,
    /// Channels returned by the directory
    pub listed: usize,
    /// Channels matching a keyword, whether or not already alerted
    pub matched: usize,
    /// Alerts delivered in this cycle
    pub alerted: usize,
}

/// Outcome of a `run_cycle` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed(CycleReport),
    /// Another cycle was already in flight.
    Skipped,
}

/// Runs poll cycles against a channel source and alert publisher.
pub struct ChannelMonitor {
    source: Arc<dyn ChannelSource>,
    publisher: Arc<dyn AlertPublisher>,
    store: NotifiedStore,
    matcher: KeywordMatcher,
    cycle_lock: Mutex<()>,
}

impl ChannelMonitor {
    pub fn new(
        source: Arc<dyn ChannelSource>,
        publisher: Arc<dyn AlertPublisher>,
        store: NotifiedStore,
    ) -> Self {
        Self {
            source,
            publisher,
            store,
            matcher: KeywordMatcher::new(),
            cycle_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &NotifiedStore {
        &self.store
    }

    /// Whether a cycle is currently running.
    pub fn is_cycle_in_flight(&self) -> bool {
        self.cycle_lock.try_lock().is_err()
    }

    /// Run one poll cycle, or skip if one is already running.
    ///
    /// A publish or persist failure aborts the cycle; the failing channel's id
    /// stays unrecorded so the next cycle alerts it again.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, AppError> {
        let Ok(_guard) = self.cycle_lock.try_lock() else {
            tracing::warn!("Poll cycle already in flight, skipping");
            return Ok(CycleOutcome::Skipped);
        };

        let started_at = Utc::now();
        let mut notified = self.store.load().await;

        let listing = self.source.list_channels().await?;
        let shape = listing.shape;
        if listing.is_missing() {
            tracing::warn!("Directory response had no result.channels field, treating as empty");
        }
        let channels = listing.into_channels();

        let mut matched = 0usize;
        let mut alerted = 0usize;

        for channel in &channels {
            let Some(keyword) = self.matcher.matched_keyword(channel) else {
                continue;
            };
            matched += 1;

            if notified.contains(&channel.id) {
                continue;
            }

            tracing::info!(
                channel_id = %channel.id,
                channel_name = %channel.name,
                keyword,
                "Keyword match on new channel"
            );

            self.publisher.publish(channel).await?;
            self.store.record(&mut notified, &channel.id).await?;
            alerted += 1;
        }

        let report = CycleReport {
            started_at,
            finished_at: Utc::now(),
            shape,
            listed: channels.len(),
            matched,
            alerted,
        };

        tracing::info!(
            listed = report.listed,
            matched = report.matched,
            alerted = report.alerted,
            notified_total = notified.len(),
            "Poll cycle complete"
        );

        Ok(CycleOutcome::Completed(report))
    }
}
