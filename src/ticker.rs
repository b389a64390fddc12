use crate::processors::RefreshProcessor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, trace};

/// Drives the status and schedule processors on a fixed period.
///
/// Ticks fire whether or not the previous cycle has finished, so requests
/// from consecutive ticks may overlap.
pub struct Ticker<S, H>
where
    S: RefreshProcessor,
    H: RefreshProcessor,
{
    status: Arc<S>,
    schedule: Arc<H>,
    period: Duration,
}

pub struct TickerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl<S: RefreshProcessor, H: RefreshProcessor> Ticker<S, H> {
    pub fn new(status: Arc<S>, schedule: Arc<H>, period: Duration) -> Self {
        Self {
            status,
            schedule,
            period,
        }
    }

    /// Runs the first cycle immediately, then one per period until stopped.
    pub fn start(self) -> TickerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(stop_rx));
        TickerHandle { stop_tx, task }
    }

    async fn run(self, mut stop_rx: watch::Receiver<bool>) {
        info!("Polling controller every {:?}", self.period);
        let mut interval = tokio::time::interval(self.period);
        // A stalled runtime resumes on the period, not with a burst of catch-up cycles.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                biased;

                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    trace!("Tick");
                    let status = self.status.clone();
                    in_flight.spawn(async move { status.refresh().await });
                    let schedule = self.schedule.clone();
                    in_flight.spawn(async move { schedule.refresh().await });

                    while let Some(finished) = in_flight.try_join_next() {
                        if let Err(e) = finished {
                            error!("Refresh task failed: {:?}", e);
                        }
                    }
                }
            }
        }

        debug!("Aborting {} in-flight refreshes", in_flight.len());
        in_flight.abort_all();
        while in_flight.join_next().await.is_some() {}
        info!("Ticker stopped");
    }
}

impl TickerHandle {
    /// Stops ticking and aborts any refresh still waiting on the controller.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            error!("Ticker task failed: {:?}", e);
        }
    }
}
