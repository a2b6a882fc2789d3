use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: u64,
    pub right_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodaySnapshot {
    pub count: u64,
    pub right_count: u64,
}

impl TodaySnapshot {
    pub fn on(self, day: NaiveDate) -> DailyCount {
        DailyCount {
            day,
            count: self.count,
            right_count: self.right_count,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("duplicate entry for {0}")]
    DuplicateDay(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<DailyCount>")]
pub struct HistorySeries(Vec<DailyCount>);

impl TryFrom<Vec<DailyCount>> for HistorySeries {
    type Error = SeriesError;

    fn try_from(mut entries: Vec<DailyCount>) -> Result<Self, Self::Error> {
        entries.sort_by_key(|entry| entry.day);
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].day == pair[1].day) {
            return Err(SeriesError::DuplicateDay(pair[0].day));
        }
        Ok(Self(entries))
    }
}

impl HistorySeries {
    pub fn entries(&self) -> &[DailyCount] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&DailyCount> {
        self.0.last()
    }

    pub fn tail(&self, limit: usize) -> &[DailyCount] {
        &self.0[self.0.len().saturating_sub(limit)..]
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.0.binary_search_by_key(&day, |entry| entry.day).is_ok()
    }

    pub fn ensure_today(&mut self, today: NaiveDate, snapshot: TodaySnapshot) -> bool {
        if self.contains_day(today) {
            return false;
        }
        self.0.push(snapshot.on(today));
        self.0.sort_by_key(|entry| entry.day);
        true
    }
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
