//! Operator request parameters
//!
//! All operator inputs are collected into one immutable [`RequestParams`]
//! value per run and passed by value into the flows; no component reads
//! ambient UI state directly.

use crate::error::{DashboardError, Result};
use crate::indicators::ChartKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed symbol shortlist offered by the selector, in display order.
pub const SYMBOL_SHORTLIST: [&str; 5] = ["AAPL", "GOOGL", "NVDA", "SPOT", "TSLA"];

/// Upper bound of the forecast horizon slider, in years.
pub const MAX_HORIZON_YEARS: u8 = 3;

/// Independent per-chart toggles, one per supported chart type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorToggles {
    pub price: bool,
    pub short_rolling: bool,
    pub long_rolling: bool,
    pub sma: bool,
    pub rsi: bool,
    pub macd: bool,
    pub bollinger: bool,
}

impl IndicatorToggles {
    /// All toggles enabled.
    pub fn all() -> Self {
        Self {
            price: true,
            short_rolling: true,
            long_rolling: true,
            sma: true,
            rsi: true,
            macd: true,
            bollinger: true,
        }
    }

    /// Enabled chart kinds in declaration order.
    pub fn enabled_kinds(&self) -> Vec<ChartKind> {
        let flags = [
            (self.price, ChartKind::Price),
            (self.short_rolling, ChartKind::ShortRolling),
            (self.long_rolling, ChartKind::LongRolling),
            (self.sma, ChartKind::Sma),
            (self.rsi, ChartKind::Rsi),
            (self.macd, ChartKind::Macd),
            (self.bollinger, ChartKind::Bollinger),
        ];
        flags
            .into_iter()
            .filter_map(|(on, kind)| on.then_some(kind))
            .collect()
    }
}

/// Forecast horizon in whole years, bounded 0..=3.
///
/// A horizon of zero means the forecasting step is skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastHorizon(u8);

impl ForecastHorizon {
    /// Create a horizon, rejecting values above the slider maximum.
    pub fn new(years: u8) -> Result<Self> {
        if years > MAX_HORIZON_YEARS {
            return Err(DashboardError::InvalidDateRange(format!(
                "forecast horizon {years} exceeds maximum of {MAX_HORIZON_YEARS} years"
            )));
        }
        Ok(Self(years))
    }

    pub fn years(&self) -> u8 {
        self.0
    }

    /// Number of future calendar days the forecast extends past the history.
    pub fn future_days(&self) -> usize {
        usize::from(self.0) * 365
    }
}

impl Default for ForecastHorizon {
    /// Matches the default slider position of one year.
    fn default() -> Self {
        Self(1)
    }
}

/// One run's worth of operator input for the prediction flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub toggles: IndicatorToggles,
    pub horizon: ForecastHorizon,
}

impl RequestParams {
    /// Build parameters, normalizing the symbol (trimmed, upper-cased).
    pub fn new(
        symbol: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        toggles: IndicatorToggles,
        horizon: ForecastHorizon,
    ) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            start,
            end,
            toggles,
            horizon,
        }
    }

    /// Validate against the current date.
    ///
    /// Both dates must not exceed `today`, and start must not be after end.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if self.symbol.is_empty() {
            return Err(DashboardError::InvalidSymbol(
                "symbol must not be empty".to_string(),
            ));
        }
        if self.start > self.end {
            return Err(DashboardError::InvalidDateRange(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }
        if self.end > today {
            return Err(DashboardError::InvalidDateRange(format!(
                "end {} is in the future",
                self.end
            )));
        }
        Ok(())
    }
}
