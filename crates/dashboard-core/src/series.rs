//! Calendar reindexing and forward-filling of price series

use crate::api::DailyBar;
use crate::error::{DashboardError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One calendar day of a cleaned series. `value` is `None` where no
/// observation exists and nothing earlier is available to fill from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// An ordered price series over a continuous calendar-day range.
///
/// Dates are unique and strictly increasing, one entry per calendar day
/// from start to end inclusive. Request-scoped; discarded after rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<SeriesPoint>,
}

impl PriceSeries {
    /// Reindex observed (date, value) pairs onto the continuous calendar
    /// range `start..=end`. Days without an observation get `None`; when a
    /// date appears more than once the last observation wins.
    pub fn reindex(observed: &[(NaiveDate, f64)], start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidDateRange(format!(
                "start {start} is after end {end}"
            )));
        }

        let by_date: std::collections::HashMap<NaiveDate, f64> =
            observed.iter().copied().collect();

        let mut points = Vec::new();
        let mut date = start;
        while date <= end {
            points.push(SeriesPoint {
                date,
                value: by_date.get(&date).copied(),
            });
            date += Duration::days(1);
        }

        Ok(Self { points })
    }

    /// Forward-fill: every missing value takes the most recent prior
    /// available value. Leading gaps before the first observation remain
    /// unfilled. Idempotent.
    pub fn forward_fill(&mut self) {
        let mut last = None;
        for point in &mut self.points {
            match point.value {
                Some(v) => last = Some(v),
                None => point.value = last,
            }
        }
    }

    /// Build the cleaned adjusted-close series for a date range: reindex
    /// the bars' adjusted closes onto the calendar and forward-fill.
    pub fn from_bars(bars: &[DailyBar], start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let observed: Vec<(NaiveDate, f64)> = bars.iter().map(|b| (b.date, b.adjclose)).collect();
        let mut series = Self::reindex(&observed, start, end)?;
        series.forward_fill();
        Ok(series)
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the first defined value, if any.
    pub fn first_defined(&self) -> Option<usize> {
        self.points.iter().position(|p| p.value.is_some())
    }
}
