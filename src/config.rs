use crate::chart::{ChartRenderer, ChartStyle};
use crate::dashboard::{DEFAULT_VIEWPORT_WIDTH, Timings};
use crate::scheduler::POLL_INTERVAL;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_COUNTER_URL: &str = "http://127.0.0.1:3003";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub counter_url: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub chart_style: Option<ChartStyle>,
    pub viewport_width: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let counter_url = lookup("COUNTER_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTER_URL.to_string());

        Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            counter_url,
            request_timeout: millis_or(&lookup, "REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT),
            poll_interval: millis_or(&lookup, "POLL_INTERVAL_MS", POLL_INTERVAL),
            chart_style: chart_style(&lookup),
            viewport_width: parse_or(&lookup, "VIEWPORT_WIDTH", DEFAULT_VIEWPORT_WIDTH),
        }
    }

    pub fn timings(&self) -> Timings {
        Timings {
            poll_interval: self.poll_interval,
            ..Timings::default()
        }
    }

    pub fn renderer(&self) -> Option<ChartRenderer> {
        self.chart_style.map(ChartRenderer::new)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(err) => {
            warn!("ignoring {key}={raw}: {err}");
            default
        }
    }
}

fn millis_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Duration {
    match parse_or(lookup, key, 0u64) {
        0 => default,
        millis => Duration::from_millis(millis),
    }
}

fn chart_style(lookup: &impl Fn(&str) -> Option<String>) -> Option<ChartStyle> {
    let Some(raw) = lookup("CHART_STYLE") else {
        return Some(ChartStyle::default());
    };
    if raw.trim().eq_ignore_ascii_case("none") {
        return None;
    }
    match raw.parse() {
        Ok(style) => Some(style),
        Err(err) => {
            warn!("ignoring CHART_STYLE: {err}");
            Some(ChartStyle::default())
        }
    }
}
