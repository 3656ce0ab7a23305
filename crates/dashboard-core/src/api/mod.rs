//! API clients for market data and news providers

pub mod news;
pub mod yahoo;

pub use news::{NewsArticle, NewsClient, NewsSource};
pub use yahoo::{DailyBar, MarketData, YahooFinanceClient};

#[cfg(test)]
pub use yahoo::MockMarketData;
