//! Stock Dashboard - Main Application Entry Point
//!
//! An interactive desktop dashboard for stock charts, price forecasts and
//! ticker news, built on eframe/egui.
//!
//! # Usage
//!
//! ```bash
//! # Optional: needed for the news feed
//! export NEWS_API_KEY="your-newsapi-key"
//!
//! cargo run --bin stock-dashboard
//! ```

use std::error::Error;

use dashboard_core::DashboardConfig;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod charts;
mod theme;

use app::DashboardApp;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,dashboard_core=info,dashboard_gui=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn create_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Stock Dashboard")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // The GUI thread blocks on this runtime for every fetch and model fit;
    // each interaction is synchronous end to end.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    setup_logging();

    let config = DashboardConfig::from_env();
    if config.news_api_key.is_none() {
        warn!("NEWS_API_KEY is not set; the news feed will report a configuration error");
    }
    info!("Starting stock dashboard");

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Stock Dashboard",
        create_native_options(),
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, handle)))),
    )
    .map_err(|e| format!("Failed to run application: {e}"))?;

    Ok(())
}
