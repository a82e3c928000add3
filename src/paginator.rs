//! Day-chunked pagination over the samples endpoint.
//!
//! A `[from, to)` window is split into whole local days; each day is
//! requested with its own query and followed through its cursors until the
//! API stops returning one. Days run strictly in ascending order and pages
//! strictly in cursor order.

use crate::api::query::page_offset;
use crate::api::{SampleSource, SamplesQuery};
use crate::error::ApiError;
use crate::samples::PageSink;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use std::fmt;

/// Consecutive calendar-day windows covering `[from, to)`.
///
/// Every window ends at the start of the following local day, so windows
/// are 23 or 25 hours long across DST changes. The last window always
/// reaches the end of its day, even when that is past `to`.
pub struct DayRange<Tz: TimeZone> {
    current: DateTime<Tz>,
    to: DateTime<Tz>,
}

impl<Tz: TimeZone> DayRange<Tz> {
    pub fn new(from: DateTime<Tz>, to: DateTime<Tz>) -> Self {
        Self { current: from, to }
    }
}

// Quarter-hour steps across a whole day; real gaps are at most two hours.
const GAP_SEARCH_STEPS: i64 = 24 * 4;

/// First instant of `date` in `tz`.
///
/// Local midnight when it exists; when a DST gap swallows midnight, the
/// first instant after the gap.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=GAP_SEARCH_STEPS).find_map(|step| {
        tz.from_local_datetime(&(midnight + TimeDelta::minutes(15 * step)))
            .earliest()
    })
}

/// Start of the local calendar day after the one `day` falls on.
fn next_day<Tz: TimeZone>(day: &DateTime<Tz>) -> DateTime<Tz> {
    day.date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|date| start_of_day(&day.timezone(), date))
        .unwrap_or_else(|| day.clone() + TimeDelta::days(1))
}

impl<Tz: TimeZone> Iterator for DayRange<Tz> {
    type Item = (DateTime<Tz>, DateTime<Tz>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.to {
            return None;
        }
        let start = self.current.clone();
        let end = next_day(&start);
        self.current = end.clone();
        Some((start, end))
    }
}

/// Counters of one pagination run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationStats {
    pub days: usize,
    pub pages: usize,
    pub records: usize,
}

pub struct Paginator<'a, S: SampleSource> {
    source: &'a S,
    query: SamplesQuery<'a>,
}

impl<'a, S: SampleSource> Paginator<'a, S> {
    pub fn new(source: &'a S, query: SamplesQuery<'a>) -> Self {
        Self { source, query }
    }

    /// Fetches every page of every day in `[from, to)` into `sink`.
    ///
    /// The first failing page aborts the run.
    pub async fn run<Tz>(
        &self,
        from: &DateTime<Tz>,
        to: &DateTime<Tz>,
        sink: &mut dyn PageSink,
    ) -> Result<PaginationStats, ApiError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut stats = PaginationStats::default();

        for (start, end) in DayRange::new(from.clone(), to.clone()) {
            tracing::info!("Fetching from {} to {}", start, end);
            stats.days += 1;

            let mut target = self.query.path(&start, &end);
            loop {
                let page = self.source.fetch_page(&target).await?;
                stats.pages += 1;
                stats.records += page.data.len();
                tracing::debug!("Received {}", page.data.len());

                let next = page.next_cursor().map(str::to_string);
                sink.add_page(page.data);

                let Some(next) = next else {
                    break;
                };
                if next == target {
                    return Err(ApiError::InvalidCursor(next));
                }
                if let Some(offset) = page_offset(&next) {
                    tracing::debug!("Fetching from offset {}", offset);
                }
                target = next;
            }
        }

        Ok(stats)
    }
}
