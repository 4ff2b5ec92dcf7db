//! Process-scoped state shared by the gateway event handler.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use sentinel_common::config::AppConfig;
use sentinel_directory::{ChannelSource, DirectoryClient};
use sentinel_engine::{ChannelMonitor, CommandHandler, NotifiedStore, PollLoop};
use sentinel_notifier::AlertPublisher;

/// Handle to a spawned poll loop.
struct RunningPoller {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
    monitor: Arc<ChannelMonitor>,
}

/// Owns the poll loop lifecycle and the command handler.
///
/// `start` may be called on every gateway `ready` event; only the first call
/// spawns the loop.
pub struct BotContext {
    source: Arc<dyn ChannelSource>,
    store: NotifiedStore,
    poll_interval: Duration,
    commands: CommandHandler,
    poller: Mutex<Option<RunningPoller>>,
}

impl BotContext {
    pub fn new(
        source: Arc<dyn ChannelSource>,
        store: NotifiedStore,
        poll_interval: Duration,
    ) -> Self {
        Self {
            commands: CommandHandler::new(source.clone()),
            source,
            store,
            poll_interval,
            poller: Mutex::new(None),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(DirectoryClient::new(config.warpcast_api_url.clone())),
            NotifiedStore::new(config.notified_channels_file.clone()),
            Duration::from_secs(config.poll_interval_secs),
        )
    }

    pub fn commands(&self) -> &CommandHandler {
        &self.commands
    }

    /// Spawn the poll loop with `publisher` as the alert sink.
    ///
    /// Returns `false` if the loop was already running.
    pub async fn start(&self, publisher: Arc<dyn AlertPublisher>) -> bool {
        let mut poller = self.poller.lock().await;
        if poller.is_some() {
            tracing::debug!("Poll loop already running, ignoring start");
            return false;
        }

        let monitor = Arc::new(ChannelMonitor::new(
            self.source.clone(),
            publisher,
            self.store.clone(),
        ));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task =
            tokio::spawn(PollLoop::new(monitor.clone(), self.poll_interval).run(shutdown_rx));

        tracing::info!(
            period_secs = self.poll_interval.as_secs(),
            store = %self.store.path().display(),
            "Channel monitoring scheduled"
        );

        *poller = Some(RunningPoller {
            shutdown,
            task,
            monitor,
        });
        true
    }

    pub async fn is_running(&self) -> bool {
        self.poller.lock().await.is_some()
    }

    /// Whether a poll cycle is executing right now.
    pub async fn is_cycle_in_flight(&self) -> bool {
        self.poller
            .lock()
            .await
            .as_ref()
            .is_some_and(|p| p.monitor.is_cycle_in_flight())
    }

    /// Signal the poll loop to stop and wait for it to finish.
    ///
    /// An in-flight cycle runs to completion first.
    pub async fn stop(&self) {
        let Some(running) = self.poller.lock().await.take() else {
            return;
        };

        let _ = running.shutdown.send(true);
        if let Err(e) = running.task.await {
            tracing::error!(error = %e, "Poll loop task panicked");
        }
    }
}
