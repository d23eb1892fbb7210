//! Periodic scheduler worker.

use std::time::Duration;

use arena_core::GameError;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::repository::WarStore;
use crate::runtime::ArenaRuntime;
use crate::scheduler::TickReport;

/// Background task running [`ArenaRuntime::tick`] on a fixed interval.
///
/// Each tick is one transaction; a failed tick is logged and the next one
/// starts from whatever was last committed. Ticks that fall behind are
/// skipped rather than replayed in a burst.
pub struct SchedulerWorker<S> {
    runtime: ArenaRuntime<S>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl<S: WarStore + 'static> SchedulerWorker<S> {
    /// Spawns the worker on the current tokio runtime.
    pub fn spawn(runtime: ArenaRuntime<S>, interval: Duration) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = Self {
            runtime,
            interval,
            shutdown: shutdown_rx,
        };
        let task = tokio::spawn(async move {
            worker.run().await;
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(mut self) {
        info!(interval = ?self.interval, "SchedulerWorker started");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick(),
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("SchedulerWorker stopped");
    }

    fn tick(&self) {
        match self.runtime.tick() {
            Ok(report) if report.is_idle() => debug!("scheduler tick: nothing to do"),
            Ok(report) => log_report(&report),
            Err(err) if err.is_state_conflict() => debug!(%err, "scheduler tick skipped"),
            Err(err) => error!(
                %err,
                code = err.error_code(),
                severity = ?err.severity(),
                "scheduler tick failed"
            ),
        }
    }
}

fn log_report(report: &TickReport) {
    info!(
        opened = ?report.opened,
        started = ?report.started,
        matches_created = report.matches_created,
        rounds_resolved = report.rounds_resolved,
        matches_completed = report.matches_completed,
        wars_completed = ?report.wars_completed,
        "scheduler tick"
    );
}

/// Handle to a running [`SchedulerWorker`].
#[derive(Debug)]
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stops the worker after its current tick and waits for it to exit.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        // The worker may already be gone; joining reports how it ended.
        let _ = self.shutdown.send(true);
        self.task.await
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
