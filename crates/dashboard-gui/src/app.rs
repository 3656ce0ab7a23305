//! The dashboard application: sidebar inputs, mode routing, run handling

use chrono::{NaiveDate, Utc};
use dashboard_core::{
    flow, DashboardConfig, DashboardError, ForecastHorizon, IndicatorToggles, NewsArticle,
    NewsClient, PredictionReport, RequestParams, YahooFinanceClient, MAX_HORIZON_YEARS,
    SYMBOL_SHORTLIST,
};
use egui_plot::PlotBounds;

use crate::{charts, theme};

const OTHER: &str = "Other";
const NO_DATA_WARNING: &str =
    "No stock data available. Please try again with a different stock name or date range.";

/// The two operator-selectable modes. Each owns its own parameter
/// collection and rendering; no symbol state crosses modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppMode {
    Prediction,
    News,
}

/// Shortlist dropdown plus free-text override, upper-cased on resolve.
struct SymbolSelector {
    id: &'static str,
    selected: String,
    custom: String,
}

impl SymbolSelector {
    fn new(id: &'static str) -> Self {
        Self {
            id,
            selected: SYMBOL_SHORTLIST[0].to_string(),
            custom: String::new(),
        }
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.label("Select or type a stock");
        egui::ComboBox::from_id_salt(self.id)
            .selected_text(self.selected.clone())
            .show_ui(ui, |ui| {
                for symbol in SYMBOL_SHORTLIST {
                    ui.selectable_value(&mut self.selected, symbol.to_string(), symbol);
                }
                ui.selectable_value(&mut self.selected, OTHER.to_string(), OTHER);
            });
        if self.selected == OTHER {
            ui.text_edit_singleline(&mut self.custom);
        }
    }

    fn resolve(&self) -> String {
        if self.selected == OTHER {
            self.custom.trim().to_uppercase()
        } else {
            self.selected.clone()
        }
    }
}

enum PredictionOutcome {
    Report(Box<PredictionReport>),
    Warning(String),
}

enum NewsOutcome {
    Articles(Vec<NewsArticle>),
    Error(String),
}

struct PredictionPanel {
    selector: SymbolSelector,
    start_date: NaiveDate,
    end_date: NaiveDate,
    toggles: IndicatorToggles,
    horizon_years: u8,
    outcome: Option<PredictionOutcome>,
    forecast_bounds: Option<PlotBounds>,
}

struct NewsPanel {
    selector: SymbolSelector,
    outcome: Option<NewsOutcome>,
}

pub struct DashboardApp {
    runtime: tokio::runtime::Handle,
    config: DashboardConfig,
    market: YahooFinanceClient,
    mode: AppMode,
    prediction: PredictionPanel,
    news: NewsPanel,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        theme::apply(&cc.egui_ctx);

        let today = Utc::now().date_naive();
        Self {
            runtime,
            config,
            market: YahooFinanceClient::new(),
            mode: AppMode::Prediction,
            prediction: PredictionPanel {
                selector: SymbolSelector::new("prediction_symbol"),
                start_date: today,
                end_date: today,
                toggles: IndicatorToggles::default(),
                horizon_years: 1,
                outcome: None,
                forecast_bounds: None,
            },
            news: NewsPanel {
                selector: SymbolSelector::new("news_symbol"),
                outcome: None,
            },
        }
    }

    fn prediction_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Stock Prediction App");
        ui.add_space(4.0);

        let today = Utc::now().date_naive();
        ui.label("Start Date");
        ui.add(egui_extras::DatePickerButton::new(&mut self.prediction.start_date).id_salt("start_date"));
        ui.label("End Date");
        ui.add(egui_extras::DatePickerButton::new(&mut self.prediction.end_date).id_salt("end_date"));
        // Date pickers have no ceiling of their own; clamp to today here.
        self.prediction.start_date = self.prediction.start_date.min(today);
        self.prediction.end_date = self.prediction.end_date.min(today);

        self.prediction.selector.ui(ui);
        ui.add_space(4.0);

        let toggles = &mut self.prediction.toggles;
        ui.checkbox(&mut toggles.price, "Stock Price Graph");
        ui.checkbox(&mut toggles.short_rolling, "Short Rolling Mean Graph");
        ui.checkbox(&mut toggles.long_rolling, "Long Rolling Mean Graph");
        ui.checkbox(&mut toggles.sma, "Simple Moving Average (SMA) Graph");
        ui.checkbox(&mut toggles.rsi, "Relative Strength Index (RSI) Graph");
        ui.checkbox(&mut toggles.macd, "Moving Average Convergence Divergence (MACD) Graph");
        ui.checkbox(&mut toggles.bollinger, "Bollinger Bands Graph");

        ui.add(
            egui::Slider::new(&mut self.prediction.horizon_years, 0..=MAX_HORIZON_YEARS)
                .text("Years of Prediction"),
        );
        ui.add_space(8.0);

        if ui.button("Run").clicked() {
            self.run_prediction();
        }
    }

    /// One synchronous prediction run; blocks the interaction until every
    /// fetch, computation and model fit returns or errors.
    fn run_prediction(&mut self) {
        let panel = &mut self.prediction;
        let horizon = ForecastHorizon::new(panel.horizon_years).unwrap_or_default();
        let params = RequestParams::new(
            panel.selector.resolve(),
            panel.start_date,
            panel.end_date,
            panel.toggles,
            horizon,
        );

        panel.forecast_bounds = None;
        panel.outcome = Some(
            match self
                .runtime
                .block_on(flow::run_prediction(&params, &self.market))
            {
                Ok(report) => PredictionOutcome::Report(Box::new(report)),
                Err(
                    err @ (DashboardError::InvalidDateRange(_) | DashboardError::InvalidSymbol(_)),
                ) => PredictionOutcome::Warning(err.to_string()),
                Err(err) => {
                    tracing::warn!("Prediction run failed for {}: {}", params.symbol, err);
                    PredictionOutcome::Warning(NO_DATA_WARNING.to_string())
                }
            },
        );
    }

    fn prediction_central(&mut self, ui: &mut egui::Ui) {
        match &self.prediction.outcome {
            None => {
                ui.label(
                    egui::RichText::new(
                        "Pick a symbol, date range and charts in the sidebar, then press Run.",
                    )
                    .color(theme::TEXT_SECONDARY),
                );
            }
            Some(PredictionOutcome::Warning(message)) => {
                ui.colored_label(egui::Color32::from_rgb(250, 204, 21), message.as_str());
            }
            Some(PredictionOutcome::Report(report)) => {
                for chart in &report.charts {
                    charts::indicator_chart(ui, chart);
                }
                if let Some(forecast) = &report.forecast {
                    charts::forecast_chart(ui, forecast, &mut self.prediction.forecast_bounds);
                }
            }
        }
    }

    fn news_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("News Feed");
        ui.add_space(4.0);

        self.news.selector.ui(ui);
        ui.add_space(8.0);

        if ui.button("Load News").clicked() {
            self.run_news();
        }
    }

    /// One synchronous news query; errors degrade to an empty listing.
    fn run_news(&mut self) {
        let symbol = self.news.selector.resolve();
        if symbol.is_empty() {
            self.news.outcome = Some(NewsOutcome::Error(
                "Enter a stock name to search news for.".to_string(),
            ));
            return;
        }

        self.news.outcome = Some(match NewsClient::from_config(&self.config) {
            Err(err) => NewsOutcome::Error(err.to_string()),
            Ok(client) => match self.runtime.block_on(flow::run_news(&symbol, &client)) {
                Ok(articles) => NewsOutcome::Articles(articles),
                Err(err) => {
                    tracing::warn!("News fetch failed for {}: {}", symbol, err);
                    NewsOutcome::Error(format!("Error fetching news: {err}"))
                }
            },
        });
    }

    fn news_central(&mut self, ui: &mut egui::Ui) {
        ui.heading("News Feed");
        ui.add_space(6.0);

        match &self.news.outcome {
            None => {
                ui.label(
                    egui::RichText::new("Pick a symbol in the sidebar and load its news.")
                        .color(theme::TEXT_SECONDARY),
                );
            }
            Some(NewsOutcome::Error(message)) => {
                ui.colored_label(theme::ACCENT_RED, message.as_str());
            }
            Some(NewsOutcome::Articles(articles)) => {
                if articles.is_empty() {
                    ui.label("No articles found.");
                }
                for article in articles {
                    render_article(ui, article);
                }
            }
        }
    }
}

fn render_article(ui: &mut egui::Ui, article: &NewsArticle) {
    ui.strong(article.title.as_str());
    if let Some(description) = &article.description {
        ui.label(description.as_str());
    }
    let published = article
        .published_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    ui.label(
        egui::RichText::new(format!("Published on: {published}")).color(theme::TEXT_SECONDARY),
    );
    ui.label(
        egui::RichText::new(format!("Source: {}", article.source.name))
            .color(theme::TEXT_SECONDARY),
    );
    ui.separator();
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Navigation");
                ui.radio_value(&mut self.mode, AppMode::Prediction, "Stock Prediction");
                ui.radio_value(&mut self.mode, AppMode::News, "News Feed");
                ui.separator();

                match self.mode {
                    AppMode::Prediction => self.prediction_sidebar(ui),
                    AppMode::News => self.news_sidebar(ui),
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.mode {
                AppMode::Prediction => self.prediction_central(ui),
                AppMode::News => self.news_central(ui),
            });
        });
    }
}
