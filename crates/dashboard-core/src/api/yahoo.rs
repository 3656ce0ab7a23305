//! Yahoo Finance API client

use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

/// One day of OHLC data for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
}

/// Source of historical daily price data.
///
/// One implementation per provider; the seam exists so flows can be tested
/// against injected failures and canned data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch daily bars for `symbol` covering `start..=end`.
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>>;
}

/// Yahoo Finance API client
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for YahooFinanceClient {
    fn clone(&self) -> Self {
        Self::new()
    }
}

fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[async_trait]
impl MarketData for YahooFinanceClient {
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;

        // End is inclusive: query up to the midnight after the end date.
        let start_ts = day_start_utc(start).timestamp();
        let end_ts = day_start_utc(end + chrono::Duration::days(1)).timestamp();

        // Convert chrono timestamps to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start_ts).map_err(|e| {
            DashboardError::YahooFinanceError(format!("Invalid start timestamp: {}", e))
        })?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end_ts).map_err(|e| {
            DashboardError::YahooFinanceError(format!("Invalid end timestamp: {}", e))
        })?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| DashboardError::YahooFinanceError(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| DailyBar {
                symbol: symbol.to_string(),
                date: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now)
                    .date_naive(),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
                adjclose: q.adjclose,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_start_conversion() {
        let ts = day_start_utc(date(2023, 1, 10)).timestamp();
        assert_eq!(ts % 86_400, 0);
        assert_eq!(
            DateTime::from_timestamp(ts, 0).unwrap().date_naive(),
            date(2023, 1, 10)
        );
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_daily_history() {
        let client = YahooFinanceClient::new();
        let bars = client
            .daily_history("AAPL", date(2023, 1, 1), date(2023, 1, 31))
            .await
            .unwrap();

        assert!(!bars.is_empty());
        assert_eq!(bars[0].symbol, "AAPL");
        assert!(bars[0].adjclose > 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_unknown_symbol_is_error() {
        let client = YahooFinanceClient::new();
        let result = client
            .daily_history("INVALID_SYMBOL_12345", date(2023, 1, 1), date(2023, 1, 31))
            .await;
        assert!(result.is_err());
    }
}
