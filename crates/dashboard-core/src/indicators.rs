//! Technical indicator series for the chart toggles
//!
//! Window lengths are fixed: 50 and 200 for the rolling means, 20 for the
//! SMA; RSI, MACD and the Bollinger middle band use the `ta` crate defaults
//! (14, 12/26/9, 20/2.0). Points before an indicator's lookback is filled
//! are undefined and render as a gap, never an error.

use crate::error::{DashboardError, Result};
use crate::series::{PriceSeries, SeriesPoint};
use serde::{Deserialize, Serialize};
use ta::indicators::{BollingerBands, MovingAverageConvergenceDivergence, RelativeStrengthIndex};
use ta::Next;

const SHORT_ROLLING_WINDOW: usize = 50;
const LONG_ROLLING_WINDOW: usize = 200;
const SMA_WINDOW: usize = 20;
const RSI_PERIOD: usize = 14;
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;
const BOLLINGER_WINDOW: usize = 20;
const BOLLINGER_MULTIPLIER: f64 = 2.0;

/// The supported chart types, in the order they render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Price,
    ShortRolling,
    LongRolling,
    Sma,
    Rsi,
    Macd,
    Bollinger,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::Price,
        ChartKind::ShortRolling,
        ChartKind::LongRolling,
        ChartKind::Sma,
        ChartKind::Rsi,
        ChartKind::Macd,
        ChartKind::Bollinger,
    ];

    /// Fixed chart title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Price => "Stock Price Graph",
            Self::ShortRolling => "Short Rolling Mean Graph",
            Self::LongRolling => "Long Rolling Mean Graph",
            Self::Sma => "Simple Moving Average (SMA) Graph",
            Self::Rsi => "Relative Strength Index (RSI) Graph",
            Self::Macd => "Moving Average Convergence Divergence (MACD) Graph",
            Self::Bollinger => "Bollinger Bands Graph",
        }
    }

    /// Fixed y-axis label
    pub fn y_label(&self) -> &'static str {
        match self {
            Self::Price => "Adj Close Price ($)",
            Self::ShortRolling => "50-day Rolling Mean",
            Self::LongRolling => "200-day Rolling Mean",
            Self::Sma => "SMA Price ($)",
            Self::Rsi => "RSI",
            Self::Macd => "MACD",
            Self::Bollinger => "Bollinger Bands",
        }
    }

    /// Fixed line color as RGB
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Price => [65, 105, 225],    // royal blue
            Self::ShortRolling => [0, 160, 0],
            Self::LongRolling => [255, 165, 0],
            Self::Sma => [160, 32, 240],
            Self::Rsi => [220, 40, 40],
            Self::Macd => [60, 90, 255],
            Self::Bollinger => [0, 160, 0],
        }
    }

    /// Number of leading defined input points that produce an undefined
    /// output while the indicator's window fills.
    pub fn lookback(&self) -> usize {
        match self {
            Self::Price => 0,
            Self::ShortRolling => SHORT_ROLLING_WINDOW - 1,
            Self::LongRolling => LONG_ROLLING_WINDOW - 1,
            Self::Sma => SMA_WINDOW - 1,
            Self::Rsi => RSI_PERIOD,
            Self::Macd => MACD_SLOW + MACD_SIGNAL - 2,
            Self::Bollinger => BOLLINGER_WINDOW - 1,
        }
    }
}

/// A derived (date, value) series for one chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub kind: ChartKind,
    pub points: Vec<SeriesPoint>,
}

/// Compute one indicator over a cleaned series.
///
/// The output has the same dates as the input. Positions that are undefined
/// in the input stay undefined; defined positions within the indicator's
/// lookback are undefined as well.
pub fn compute(kind: ChartKind, series: &PriceSeries) -> Result<IndicatorSeries> {
    let points = series.points();
    let offset = series.first_defined().unwrap_or(points.len());
    // After forward-filling, defined values form a contiguous suffix.
    let values: Vec<f64> = points[offset..].iter().filter_map(|p| p.value).collect();

    let derived = match kind {
        ChartKind::Price => values.iter().map(|&v| Some(v)).collect(),
        ChartKind::ShortRolling => rolling_mean(&values, SHORT_ROLLING_WINDOW),
        ChartKind::LongRolling => rolling_mean(&values, LONG_ROLLING_WINDOW),
        ChartKind::Sma => rolling_mean(&values, SMA_WINDOW),
        ChartKind::Rsi => {
            let mut rsi = RelativeStrengthIndex::new(RSI_PERIOD)
                .map_err(|e| DashboardError::IndicatorError(e.to_string()))?;
            mask_lookback(values.iter().map(|&v| rsi.next(v)).collect(), kind.lookback())
        }
        ChartKind::Macd => {
            let mut macd =
                MovingAverageConvergenceDivergence::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL)
                    .map_err(|e| DashboardError::IndicatorError(e.to_string()))?;
            mask_lookback(
                values.iter().map(|&v| macd.next(v).histogram).collect(),
                kind.lookback(),
            )
        }
        ChartKind::Bollinger => {
            let mut bb = BollingerBands::new(BOLLINGER_WINDOW, BOLLINGER_MULTIPLIER)
                .map_err(|e| DashboardError::IndicatorError(e.to_string()))?;
            mask_lookback(
                values.iter().map(|&v| bb.next(v).average).collect(),
                kind.lookback(),
            )
        }
    };

    let mut out: Vec<SeriesPoint> = points
        .iter()
        .map(|p| SeriesPoint {
            date: p.date,
            value: None,
        })
        .collect();
    for (j, value) in derived.into_iter().enumerate() {
        out[offset + j].value = value;
    }

    Ok(IndicatorSeries { kind, points: out })
}

/// Trailing mean over `window` observations; undefined until the window fills.
fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                None
            } else {
                let slice = &values[i + 1 - window..=i];
                Some(slice.iter().sum::<f64>() / window as f64)
            }
        })
        .collect()
}

fn mask_lookback(values: Vec<f64>, lookback: usize) -> Vec<Option<f64>> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i >= lookback).then_some(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series_of(n: usize) -> PriceSeries {
        let start = date(2023, 1, 1);
        let observed: Vec<(NaiveDate, f64)> = (0..n)
            .map(|i| (start + chrono::Duration::days(i as i64), 100.0 + i as f64))
            .collect();
        let mut s =
            PriceSeries::reindex(&observed, start, start + chrono::Duration::days(n as i64 - 1))
                .unwrap();
        s.forward_fill();
        s
    }

    #[test]
    fn test_price_is_passthrough() {
        let series = series_of(5);
        let out = compute(ChartKind::Price, &series).unwrap();
        assert_eq!(out.points.len(), 5);
        assert_eq!(out.points[0].value, Some(100.0));
        assert_eq!(out.points[4].value, Some(104.0));
    }

    #[test]
    fn test_short_series_against_long_window() {
        // 10 points against a 50-day mean: every output undefined, no panic.
        let series = series_of(10);
        let out = compute(ChartKind::ShortRolling, &series).unwrap();
        assert_eq!(out.points.len(), 10);
        assert!(out.points.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn test_sma_window_masks_leading_points() {
        let series = series_of(25);
        let out = compute(ChartKind::Sma, &series).unwrap();

        for p in &out.points[..19] {
            assert_eq!(p.value, None);
        }
        // Mean of an arithmetic sequence is its midpoint: 100..=119 -> 109.5.
        let first = out.points[19].value.unwrap();
        assert!((first - 109.5).abs() < 1e-9);
        assert!(out.points[20..].iter().all(|p| p.value.is_some()));
    }

    #[test]
    fn test_rolling_mean_window_boundary() {
        let means = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(means[0], None);
        assert_eq!(means[1], None);
        assert_eq!(means[2], Some(2.0));
        assert_eq!(means[3], Some(3.0));
    }

    #[test]
    fn test_rsi_lookback_and_range() {
        let series = series_of(40);
        let out = compute(ChartKind::Rsi, &series).unwrap();

        assert!(out.points[..14].iter().all(|p| p.value.is_none()));
        for p in &out.points[14..] {
            let v = p.value.unwrap();
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_macd_lookback() {
        let series = series_of(60);
        let out = compute(ChartKind::Macd, &series).unwrap();
        let lookback = ChartKind::Macd.lookback();

        assert!(out.points[..lookback].iter().all(|p| p.value.is_none()));
        assert!(out.points[lookback..].iter().all(|p| p.value.is_some()));
    }

    #[test]
    fn test_leading_gap_propagates() {
        // Observations start four days into the requested range.
        let start = date(2023, 1, 1);
        let observed: Vec<(NaiveDate, f64)> = (4..30)
            .map(|i| (start + chrono::Duration::days(i), 50.0))
            .collect();
        let mut s = PriceSeries::reindex(&observed, start, date(2023, 1, 30)).unwrap();
        s.forward_fill();

        let out = compute(ChartKind::Sma, &s).unwrap();
        // Undefined input positions stay undefined, then the window masks.
        assert!(out.points[..4 + 19].iter().all(|p| p.value.is_none()));
        assert_eq!(out.points[23].value, Some(50.0));
    }

    #[test]
    fn test_all_kinds_cover_toggles() {
        assert_eq!(ChartKind::ALL.len(), 7);
        for kind in ChartKind::ALL {
            assert!(!kind.title().is_empty());
            assert!(!kind.y_label().is_empty());
        }
    }
}
