//! Periodic traffic simulation bound to a session.
//!
//! The task is owned through a [`SimulatorHandle`]: dropping the handle,
//! calling [`SimulatorHandle::shutdown`], or cancelling the session token all
//! stop it. There is no detached timer left behind.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};

use super::DashboardSession;
use crate::traffic::TrafficGenerator;

/// Drives a [`TrafficGenerator`] into a [`DashboardSession`] on a fixed period.
pub struct TrafficSimulator<R> {
    session: Arc<DashboardSession>,
    generator: TrafficGenerator<R>,
    interval: Duration,
}

impl<R> TrafficSimulator<R>
where
    R: Rng + Send + 'static,
{
    pub fn new(
        session: Arc<DashboardSession>,
        generator: TrafficGenerator<R>,
        interval: Duration,
    ) -> Self {
        Self {
            session,
            generator,
            interval,
        }
    }

    /// Spawn the simulation loop.
    ///
    /// The first event is produced one full interval after this call.
    pub fn start(self) -> SimulatorHandle {
        let Self {
            session,
            mut generator,
            interval,
        } = self;

        let cancel_token = session.cancel_token().child_token();
        let task_token = cancel_token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::info!(
                interval_ms = interval.as_millis() as u64,
                "Traffic simulator started"
            );

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        tracing::info!("Traffic simulator shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let stats = session.record(generator.next_tick());
                        tracing::debug!(
                            total_requests = stats.total_requests,
                            success_rate = stats.success_rate,
                            "Simulator tick"
                        );
                    }
                }
            }
        });

        SimulatorHandle {
            cancel_token: cancel_token.clone(),
            _guard: cancel_token.drop_guard(),
            task,
        }
    }
}

/// Owning handle of a running simulator task.
pub struct SimulatorHandle {
    cancel_token: CancellationToken,
    _guard: DropGuard,
    task: JoinHandle<()>,
}

impl SimulatorHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the task and wait for it to finish.
    pub async fn shutdown(self) {
        let SimulatorHandle {
            cancel_token,
            _guard: guard,
            task,
        } = self;
        cancel_token.cancel();
        drop(guard);

        if let Err(e) = task.await {
            tracing::error!(error = %e, "Traffic simulator task failed");
        }
    }
}
