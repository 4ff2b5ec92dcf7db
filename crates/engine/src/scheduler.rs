use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::monitor::{ChannelMonitor, CycleOutcome};

/// Fixed-period timer that drives `ChannelMonitor` cycles.
///
/// The first cycle fires one full period after `run` starts. Ticks that
/// elapse while a cycle is still running are dropped rather than queued.
pub struct PollLoop {
    monitor: Arc<ChannelMonitor>,
    period: Duration,
}

impl PollLoop {
    pub fn new(monitor: Arc<ChannelMonitor>, period: Duration) -> Self {
        Self { monitor, period }
    }

    /// Run until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// Cycle errors are logged and the loop keeps going.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(period_secs = self.period.as_secs(), "Poll loop started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.monitor.run_cycle().await {
                        Ok(CycleOutcome::Completed(report)) => {
                            let elapsed = report.finished_at - report.started_at;
                            tracing::debug!(
                                alerted = report.alerted,
                                elapsed_ms = elapsed.num_milliseconds(),
                                "Poll tick handled"
                            );
                        }
                        Ok(CycleOutcome::Skipped) => {}
                        Err(e) => {
                            tracing::error!(error = %e, kind = e.kind(), "Poll cycle aborted");
                        }
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Poll loop stopped");
    }
}
