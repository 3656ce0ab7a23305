//! Additive time-series forecasting
//!
//! A deliberately small additive model: least-squares linear trend plus
//! day-of-week terms, with symmetric confidence bounds at 1.96 residual
//! standard deviations. It accepts a (date, value) training table and
//! produces predicted value plus lower/upper bounds for every date in the
//! combined historical-plus-future span.

use crate::error::{DashboardError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const BOUND_SIGMAS: f64 = 1.96;

/// One forecast row. Invariant: `lower <= predicted <= upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// A forecast spanning the historical dates plus the future horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub rows: Vec<ForecastRow>,
    /// Number of leading rows that cover the historical dates.
    pub history_len: usize,
}

/// Fitted additive model: trend anchored at the first training date plus a
/// per-weekday offset.
#[derive(Debug, Clone)]
pub struct AdditiveModel {
    origin: NaiveDate,
    intercept: f64,
    slope: f64,
    weekday: [f64; 7],
    sigma: f64,
}

impl AdditiveModel {
    /// Fit on an ordered (date, value) training table.
    pub fn fit(history: &[(NaiveDate, f64)]) -> Result<Self> {
        if history.is_empty() {
            return Err(DashboardError::ForecastError(
                "cannot fit on an empty series".to_string(),
            ));
        }

        let origin = history[0].0;
        let n = history.len() as f64;
        let ts: Vec<f64> = history
            .iter()
            .map(|(d, _)| (*d - origin).num_days() as f64)
            .collect();
        let ys: Vec<f64> = history.iter().map(|(_, y)| *y).collect();

        let t_mean = ts.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;
        let var_t: f64 = ts.iter().map(|t| (t - t_mean).powi(2)).sum();
        let slope = if var_t > 0.0 {
            ts.iter()
                .zip(&ys)
                .map(|(t, y)| (t - t_mean) * (y - y_mean))
                .sum::<f64>()
                / var_t
        } else {
            0.0
        };
        let intercept = y_mean - slope * t_mean;

        // Mean trend residual per weekday; weekdays with no samples get 0.
        let mut sums = [0.0_f64; 7];
        let mut counts = [0_usize; 7];
        for ((date, y), t) in history.iter().zip(&ts) {
            let wd = date.weekday().num_days_from_monday() as usize;
            sums[wd] += y - (intercept + slope * t);
            counts[wd] += 1;
        }
        let mut weekday = [0.0_f64; 7];
        for wd in 0..7 {
            if counts[wd] > 0 {
                weekday[wd] = sums[wd] / counts[wd] as f64;
            }
        }

        let mut model = Self {
            origin,
            intercept,
            slope,
            weekday,
            sigma: 0.0,
        };
        let sq_err: f64 = history
            .iter()
            .map(|(d, y)| (y - model.point_estimate(*d)).powi(2))
            .sum();
        model.sigma = (sq_err / n).sqrt();

        Ok(model)
    }

    fn point_estimate(&self, date: NaiveDate) -> f64 {
        let t = (date - self.origin).num_days() as f64;
        let wd = date.weekday().num_days_from_monday() as usize;
        self.intercept + self.slope * t + self.weekday[wd]
    }

    /// Predict one date with confidence bounds.
    pub fn predict(&self, date: NaiveDate) -> ForecastRow {
        let predicted = self.point_estimate(date);
        let half_width = BOUND_SIGMAS * self.sigma;
        ForecastRow {
            date,
            predicted,
            lower: predicted - half_width,
            upper: predicted + half_width,
        }
    }
}

/// Fit on `history` and predict every historical date plus `future_days`
/// calendar days past the last one. The row count is always
/// `history.len() + future_days`.
pub fn forecast(history: &[(NaiveDate, f64)], future_days: usize) -> Result<Forecast> {
    let model = AdditiveModel::fit(history)?;
    let last = history[history.len() - 1].0;

    let mut rows: Vec<ForecastRow> = history.iter().map(|(d, _)| model.predict(*d)).collect();
    for offset in 1..=future_days {
        rows.push(model.predict(last + Duration::days(offset as i64)));
    }

    Ok(Forecast {
        rows,
        history_len: history.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn linear_history(n: usize) -> Vec<(NaiveDate, f64)> {
        let start = date(2022, 1, 3);
        (0..n)
            .map(|i| (start + Duration::days(i as i64), 10.0 + 2.0 * i as f64))
            .collect()
    }

    #[test]
    fn test_empty_history_is_error() {
        assert!(forecast(&[], 10).is_err());
    }

    #[test]
    fn test_span_length_per_horizon() {
        let history = linear_history(120);
        for years in 0..=3_usize {
            let fc = forecast(&history, years * 365).unwrap();
            assert_eq!(fc.rows.len(), 120 + years * 365);
            assert_eq!(fc.history_len, 120);
        }
    }

    #[test]
    fn test_bounds_ordering_invariant() {
        // Noisy-ish input: alternate around a trend so sigma is nonzero.
        let start = date(2022, 1, 3);
        let history: Vec<(NaiveDate, f64)> = (0..90)
            .map(|i| {
                let wiggle = if i % 2 == 0 { 1.5 } else { -1.5 };
                (start + Duration::days(i), 100.0 + 0.5 * i as f64 + wiggle)
            })
            .collect();

        let fc = forecast(&history, 365).unwrap();
        for row in &fc.rows {
            assert!(row.lower <= row.predicted);
            assert!(row.predicted <= row.upper);
        }
    }

    #[test]
    fn test_recovers_linear_trend() {
        let history = linear_history(60);
        let fc = forecast(&history, 30).unwrap();

        // Perfectly linear input: near-zero residuals, exact extrapolation.
        let last = fc.rows.last().unwrap();
        let expected = 10.0 + 2.0 * 89.0;
        assert!((last.predicted - expected).abs() < 1e-6);
        assert!((last.upper - last.lower).abs() < 1e-6);
    }

    #[test]
    fn test_future_dates_are_calendar_days() {
        let history = linear_history(10);
        let fc = forecast(&history, 5).unwrap();

        let last_hist = history.last().unwrap().0;
        for (i, row) in fc.rows[10..].iter().enumerate() {
            assert_eq!(row.date, last_hist + Duration::days(i as i64 + 1));
        }
    }

    #[test]
    fn test_single_point_history() {
        let fc = forecast(&[(date(2023, 5, 1), 42.0)], 3).unwrap();
        assert_eq!(fc.rows.len(), 4);
        assert!((fc.rows[0].predicted - 42.0).abs() < 1e-9);
    }
}
