use crate::chart::ChartRenderer;
use crate::client::CounterSource;
use crate::display::{CounterPhase, SecondaryIndicator};
use crate::errors::ClientError;
use crate::models::{HistorySeries, TodaySnapshot, local_today};
use crate::scheduler::{self, Debouncer, TimerHandle};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub poll_interval: Duration,
    pub reveal_delay: Duration,
    pub pulse_duration: Duration,
    pub resize_debounce: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            poll_interval: scheduler::POLL_INTERVAL,
            reveal_delay: scheduler::REVEAL_DELAY,
            pulse_duration: scheduler::PULSE_DURATION,
            resize_debounce: scheduler::RESIZE_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub counter: CounterPhase,
    pub count: Option<u64>,
    pub visible: bool,
    pub scale: f32,
    pub secondary: Option<String>,
    pub chart: String,
    pub viewport_width: u32,
    pub redraws: u64,
    pub history: HistorySeries,
}

struct DashboardState {
    counter: CounterPhase,
    secondary: SecondaryIndicator,
    history: HistorySeries,
    chart: String,
    viewport_width: u32,
    redraws: u64,
    animation: Option<TimerHandle>,
}

#[derive(Clone)]
pub struct Dashboard {
    source: Arc<dyn CounterSource>,
    renderer: Option<Arc<ChartRenderer>>,
    state: Arc<Mutex<DashboardState>>,
    resize: Arc<Debouncer>,
    timings: Timings,
    clock: fn() -> NaiveDate,
}

impl Dashboard {
    pub fn new(
        source: Arc<dyn CounterSource>,
        renderer: Option<ChartRenderer>,
        timings: Timings,
    ) -> Self {
        Self {
            source,
            renderer: renderer.map(Arc::new),
            state: Arc::new(Mutex::new(DashboardState {
                counter: CounterPhase::Hidden,
                secondary: SecondaryIndicator::default(),
                history: HistorySeries::default(),
                chart: String::new(),
                viewport_width: DEFAULT_VIEWPORT_WIDTH,
                redraws: 0,
                animation: None,
            })),
            resize: Arc::new(Debouncer::new(timings.resize_debounce)),
            timings,
            clock: local_today,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub async fn with_viewport(self, viewport_width: u32) -> Self {
        self.state.lock().await.viewport_width = viewport_width;
        self
    }

    pub fn start(&self) -> TimerHandle {
        info!(
            interval_ms = self.timings.poll_interval.as_millis() as u64,
            "starting counter polling"
        );

        let dashboard = self.clone();
        tokio::spawn(async move {
            let _ = dashboard.fetch_today(true).await;
        });

        let dashboard = self.clone();
        tokio::spawn(async move {
            let _ = dashboard.fetch_history().await;
        });

        let dashboard = self.clone();
        scheduler::every(self.timings.poll_interval, move || {
            let dashboard = dashboard.clone();
            async move {
                let _ = dashboard.fetch_today(false).await;
            }
        })
    }

    pub async fn fetch_today(&self, animate: bool) -> Result<TodaySnapshot, ClientError> {
        let snapshot = match self.source.today().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("failed to fetch today: {err}");
                return Err(err);
            }
        };
        debug!(count = snapshot.count, right_count = snapshot.right_count, animate, "today");

        let mut state = self.state.lock().await;
        state.secondary = SecondaryIndicator::new(snapshot.right_count);
        if let Some(pending) = state.animation.take() {
            pending.cancel();
        }

        if animate && snapshot.count > 0 {
            state.counter = CounterPhase::Revealing(snapshot.count - 1);
            let dashboard = self.clone();
            state.animation = Some(scheduler::after(self.timings.reveal_delay, async move {
                dashboard.pulse(snapshot.count).await;
            }));
        } else {
            state.counter = CounterPhase::Settled(snapshot.count);
        }

        Ok(snapshot)
    }

    async fn pulse(&self, count: u64) {
        let mut state = self.state.lock().await;
        state.counter = CounterPhase::Pulsing(count);
        let dashboard = self.clone();
        state.animation = Some(scheduler::after(self.timings.pulse_duration, async move {
            dashboard.state.lock().await.counter = CounterPhase::Settled(count);
        }));
    }

    pub async fn fetch_history(&self) -> Result<HistorySeries, ClientError> {
        let series = match self.load_history().await {
            Ok(series) => series,
            Err(err) => {
                error!("failed to fetch history: {err}");
                return Err(err);
            }
        };

        self.state.lock().await.history = series.clone();
        let _ = self.redraw().await;
        Ok(series)
    }

    async fn load_history(&self) -> Result<HistorySeries, ClientError> {
        let mut series = self.source.history().await?;
        let today = (self.clock)();
        if !series.contains_day(today) {
            let snapshot = self.source.today().await?;
            debug!(%today, count = snapshot.count, "history has no entry for today, adding one");
            series.ensure_today(today, snapshot);
        }
        Ok(series)
    }

    pub async fn redraw(&self) -> Result<(), ClientError> {
        let Some(renderer) = self.renderer.as_deref() else {
            let err = ClientError::RenderUnavailable;
            error!("skipping chart redraw: {err}");
            return Err(err);
        };

        let mut state = self.state.lock().await;
        let chart = renderer.render(&state.history, state.viewport_width);
        state.chart = chart;
        state.redraws += 1;
        debug!(
            entries = state.history.len(),
            viewport_width = state.viewport_width,
            "chart redrawn"
        );
        Ok(())
    }

    pub async fn resize(&self, viewport_width: u32) {
        self.state.lock().await.viewport_width = viewport_width;
        let dashboard = self.clone();
        self.resize
            .call(async move {
                let has_history = !dashboard.state.lock().await.history.is_empty();
                if has_history {
                    let _ = dashboard.redraw().await;
                }
            })
            .await;
    }

    pub async fn view(&self) -> PageView {
        let state = self.state.lock().await;
        PageView {
            counter: state.counter,
            count: state.counter.shown_value(),
            visible: state.counter.is_visible(),
            scale: state.counter.scale(),
            secondary: state.secondary.text(),
            chart: state.chart.clone(),
            viewport_width: state.viewport_width,
            redraws: state.redraws,
            history: state.history.clone(),
        }
    }
}
