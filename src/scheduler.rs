//! Every deadline is fixed when the timer is armed, not when the spawned task
//! first runs, so a paused tokio clock drives them deterministically.

use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const POLL_INTERVAL: Duration = Duration::from_millis(5000);
pub const REVEAL_DELAY: Duration = Duration::from_millis(1000);
pub const PULSE_DURATION: Duration = Duration::from_millis(300);
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct TimerHandle(JoinHandle<()>);

impl TimerHandle {
    pub fn cancel(&self) {
        self.0.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

pub fn after<F>(delay: Duration, task: F) -> TimerHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    let deadline = Instant::now() + delay;
    TimerHandle(tokio::spawn(async move {
        time::sleep_until(deadline).await;
        task.await;
    }))
}

/// Runs `tick` every `period`, first one `period` from now. A tick that
/// overruns pushes the following ones back instead of bunching them up.
pub fn every<F, Fut>(period: Duration, mut tick: F) -> TimerHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let start = Instant::now() + period;
    TimerHandle(tokio::spawn(async move {
        let mut ticker = time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            tick().await;
        }
    }))
}

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<TimerHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub async fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.take() {
            previous.cancel();
        }
        *pending = Some(after(self.delay, task));
    }
}
