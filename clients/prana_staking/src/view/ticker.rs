use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::debug;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

/// Wall-clock unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Periodically re-samples the reference time used for live interest
/// figures.
///
/// The sampling task belongs to the clock: dropping the clock (or calling
/// [`ReferenceClock::stop`]) aborts it, so a torn-down view leaves no
/// timer behind.
#[derive(Debug)]
pub struct ReferenceClock {
    receiver: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl ReferenceClock {
    /// Samples the system clock every `period`. Must be called inside a
    /// tokio runtime.
    pub fn start(period: Duration) -> Self {
        Self::start_with(period, unix_now)
    }

    /// Samples `source` every `period`.
    pub fn start_with<F>(period: Duration, source: F) -> Self
    where
        F: Fn() -> u64 + Send + 'static,
    {
        let (sender, receiver) = watch::channel(source());
        let task = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick completes immediately; the initial sample is already out
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if sender.send(source()).is_err() {
                    debug!("reference clock has no subscribers left");
                    break;
                }
            }
        });
        Self { receiver, task }
    }

    /// Most recent sample.
    pub fn now(&self) -> u64 {
        *self.receiver.borrow()
    }

    /// Waits for the next sample. Returns `None` once the clock has stopped.
    pub async fn next(&mut self) -> Option<u64> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    /// A receiver for other parts of the view that render live figures.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.receiver.clone()
    }

    pub fn stop(self) {
        // Drop aborts the task.
    }
}

impl Drop for ReferenceClock {
    fn drop(&mut self) {
        self.task.abort();
    }
}
