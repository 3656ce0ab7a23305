//! Run orchestration for the two dashboard modes
//!
//! Each operator-triggered run is one call here: fetch, clean, derive,
//! forecast. The caller treats any error as "nothing to draw" and shows an
//! inline message instead of failing the process.

use crate::api::{MarketData, NewsArticle, NewsClient};
use crate::error::{DashboardError, Result};
use crate::forecast::{self, Forecast};
use crate::indicators::{self, IndicatorSeries};
use crate::params::RequestParams;
use crate::series::PriceSeries;

/// Everything one prediction run produces.
#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub symbol: String,
    pub series: PriceSeries,
    pub charts: Vec<IndicatorSeries>,
    pub forecast: Option<Forecast>,
}

/// Execute the prediction flow.
///
/// Fetches the history once per run: the cleaned adjusted-close series
/// feeds the indicator charts, the raw close series feeds the forecaster.
/// A forecast horizon of zero skips the forecasting step entirely.
pub async fn run_prediction(
    params: &RequestParams,
    market: &dyn MarketData,
) -> Result<PredictionReport> {
    params.validate(chrono::Utc::now().date_naive())?;

    tracing::info!(
        "Fetching {} from {} to {}",
        params.symbol,
        params.start,
        params.end
    );
    let bars = market
        .daily_history(&params.symbol, params.start, params.end)
        .await?;

    if bars.is_empty() {
        return Err(DashboardError::DataUnavailable {
            symbol: params.symbol.clone(),
            reason: "no rows returned for the requested range".to_string(),
        });
    }

    let series = PriceSeries::from_bars(&bars, params.start, params.end)?;

    let mut charts = Vec::new();
    for kind in params.toggles.enabled_kinds() {
        charts.push(indicators::compute(kind, &series)?);
    }

    let forecast = if params.horizon.years() > 0 {
        let training: Vec<_> = bars.iter().map(|b| (b.date, b.close)).collect();
        Some(forecast::forecast(&training, params.horizon.future_days())?)
    } else {
        tracing::debug!("Forecast horizon is zero, skipping forecast");
        None
    };

    Ok(PredictionReport {
        symbol: params.symbol.clone(),
        series,
        charts,
        forecast,
    })
}

/// Execute the news flow: one fresh query per view, no caching.
pub async fn run_news(symbol: &str, client: &NewsClient) -> Result<Vec<NewsArticle>> {
    tracing::info!("Fetching news for {}", symbol);
    client.everything(symbol).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DailyBar, MockMarketData};
    use crate::indicators::ChartKind;
    use crate::params::{ForecastHorizon, IndicatorToggles, RequestParams};
    use chrono::{Datelike, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(d: NaiveDate, price: f64) -> DailyBar {
        DailyBar {
            symbol: "AAPL".to_string(),
            date: d,
            open: price,
            high: price + 1.0,
            low: price - 1.0,
            close: price,
            volume: 1_000,
            adjclose: price,
        }
    }

    fn trading_days(start: NaiveDate, n: usize) -> Vec<DailyBar> {
        let mut bars = Vec::new();
        let mut d = start;
        while bars.len() < n {
            if d.weekday().num_days_from_monday() < 5 {
                bars.push(bar(d, 100.0 + bars.len() as f64));
            }
            d += chrono::Duration::days(1);
        }
        bars
    }

    fn params(toggles: IndicatorToggles, horizon: u8) -> RequestParams {
        RequestParams::new(
            "AAPL",
            date(2023, 1, 1),
            date(2023, 3, 31),
            toggles,
            ForecastHorizon::new(horizon).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_error_not_panic() {
        let mut market = MockMarketData::new();
        market.expect_daily_history().returning(|symbol, _, _| {
            Err(DashboardError::YahooFinanceError(format!(
                "no data for {symbol}"
            )))
        });

        let result = run_prediction(&params(IndicatorToggles::default(), 1), &market).await;
        assert!(matches!(
            result.unwrap_err(),
            DashboardError::YahooFinanceError(_)
        ));
    }

    #[tokio::test]
    async fn test_empty_result_is_data_unavailable() {
        let mut market = MockMarketData::new();
        market
            .expect_daily_history()
            .returning(|_, _, _| Ok(Vec::new()));

        let result = run_prediction(&params(IndicatorToggles::default(), 1), &market).await;
        assert!(matches!(
            result.unwrap_err(),
            DashboardError::DataUnavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_charts_match_enabled_toggles() {
        let mut market = MockMarketData::new();
        market
            .expect_daily_history()
            .returning(|_, start, _| Ok(trading_days(start, 40)));

        let mut toggles = IndicatorToggles::default();
        toggles.price = true;
        toggles.sma = true;

        let report = run_prediction(&params(toggles, 1), &market).await.unwrap();
        let kinds: Vec<ChartKind> = report.charts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChartKind::Price, ChartKind::Sma]);
        // Cleaned series covers the full calendar range regardless.
        assert_eq!(report.series.len(), 90);
    }

    #[tokio::test]
    async fn test_horizon_zero_skips_forecast() {
        let mut market = MockMarketData::new();
        market
            .expect_daily_history()
            .returning(|_, start, _| Ok(trading_days(start, 40)));

        let report = run_prediction(&params(IndicatorToggles::default(), 0), &market)
            .await
            .unwrap();
        assert!(report.forecast.is_none());
    }

    #[tokio::test]
    async fn test_forecast_span_includes_horizon() {
        let mut market = MockMarketData::new();
        market
            .expect_daily_history()
            .returning(|_, start, _| Ok(trading_days(start, 40)));

        let report = run_prediction(&params(IndicatorToggles::default(), 2), &market)
            .await
            .unwrap();
        let fc = report.forecast.unwrap();
        assert_eq!(fc.rows.len(), 40 + 2 * 365);
        assert_eq!(fc.history_len, 40);
        for row in &fc.rows {
            assert!(row.lower <= row.predicted && row.predicted <= row.upper);
        }
    }

    #[tokio::test]
    async fn test_invalid_range_rejected_before_fetch() {
        let market = MockMarketData::new(); // no expectations: must not be called
        let p = RequestParams::new(
            "AAPL",
            date(2023, 3, 31),
            date(2023, 1, 1),
            IndicatorToggles::default(),
            ForecastHorizon::default(),
        );

        let result = run_prediction(&p, &market).await;
        assert!(matches!(
            result.unwrap_err(),
            DashboardError::InvalidDateRange(_)
        ));
    }
}
