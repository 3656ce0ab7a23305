//! Stock dashboard core
//!
//! Orchestration layer for an interactive single-user stock dashboard:
//!
//! - Historical price data from Yahoo Finance
//! - Calendar reindexing and forward-filling of price series
//! - Technical indicator charts (rolling means, SMA, RSI, MACD, Bollinger)
//! - An additive multi-year price forecast with confidence bounds
//! - Recent news headlines per ticker via NewsAPI
//!
//! Each operator-triggered run is independent: fetch, compute, render,
//! discard. There is no persistence and no caching; failures degrade to
//! inline messages rather than crashing the session.
//!
//! # Example
//!
//! ```rust,ignore
//! use dashboard_core::{flow, RequestParams, YahooFinanceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let market = YahooFinanceClient::new();
//!     let params = RequestParams::new(
//!         "AAPL",
//!         "2023-01-01".parse()?,
//!         "2023-12-31".parse()?,
//!         Default::default(),
//!         Default::default(),
//!     );
//!     let report = flow::run_prediction(&params, &market).await?;
//!     println!("{} charts", report.charts.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod forecast;
pub mod indicators;
pub mod params;
pub mod series;

// Re-export main types for convenience
pub use api::{DailyBar, MarketData, NewsArticle, NewsClient, NewsSource, YahooFinanceClient};
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use flow::PredictionReport;
pub use forecast::{Forecast, ForecastRow};
pub use indicators::{ChartKind, IndicatorSeries};
pub use params::{
    ForecastHorizon, IndicatorToggles, RequestParams, MAX_HORIZON_YEARS, SYMBOL_SHORTLIST,
};
pub use series::{PriceSeries, SeriesPoint};
