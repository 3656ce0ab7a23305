//! Chart rendering with egui_plot

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use dashboard_core::{Forecast, IndicatorSeries};
use egui_plot::{Corner, GridMark, Legend, Line, Plot, PlotBounds, PlotPoints, Polygon};

use crate::theme;

/// Seconds since the epoch for midnight UTC of `date`; the x coordinate of
/// every chart point.
fn date_ts(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp() as f64
}

fn format_ts(x: f64, fmt: &str) -> String {
    Utc.timestamp_opt(x as i64, 0)
        .single()
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}

fn axis_formatter(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    format_ts(mark.value, "%b %d %Y")
}

/// Render one indicator as its own line chart with the fixed title, axis
/// label and color for its kind. Undefined points are skipped and render as
/// a gap.
pub fn indicator_chart(ui: &mut egui::Ui, series: &IndicatorSeries) {
    ui.strong(series.kind.title());

    let [r, g, b] = series.kind.color();
    let color = egui::Color32::from_rgb(r, g, b);
    let points: PlotPoints = series
        .points
        .iter()
        .filter_map(|p| p.value.map(|v| [date_ts(p.date), v]))
        .collect();

    let y_label = series.kind.y_label();
    Plot::new(series.kind.title())
        .height(240.0)
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_formatter(axis_formatter)
        .label_formatter(move |name, value| {
            let date = format_ts(value.x, "%Y-%m-%d");
            format!("{name}\nDate: {date}\nValue: {:.2}", value.y)
        })
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name(y_label).color(color).width(1.8));
        });

    ui.add_space(10.0);
}

/// Preset view ranges for the forecast chart, mirroring a plotly range
/// selector: 1 month, 6 months, year-to-date, 1 year, everything.
#[derive(Debug, Clone, Copy)]
enum RangePreset {
    OneMonth,
    SixMonths,
    YearToDate,
    OneYear,
    All,
}

impl RangePreset {
    const ALL: [RangePreset; 5] = [
        RangePreset::OneMonth,
        RangePreset::SixMonths,
        RangePreset::YearToDate,
        RangePreset::OneYear,
        RangePreset::All,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::OneMonth => "1m",
            Self::SixMonths => "6m",
            Self::YearToDate => "YTD",
            Self::OneYear => "1y",
            Self::All => "All",
        }
    }

    /// Left edge of the view window ending at `last`.
    fn window_start(self, first: NaiveDate, last: NaiveDate) -> NaiveDate {
        let start = match self {
            Self::OneMonth => last - chrono::Duration::days(30),
            Self::SixMonths => last - chrono::Duration::days(182),
            Self::YearToDate => {
                NaiveDate::from_ymd_opt(last.year(), 1, 1).unwrap_or(first)
            }
            Self::OneYear => last - chrono::Duration::days(365),
            Self::All => first,
        };
        start.max(first)
    }
}

/// Plot bounds covering `start..=last` on x, with the forecast's bound
/// envelope (plus a small margin) on y.
fn preset_bounds(forecast: &Forecast, start: NaiveDate, last: NaiveDate) -> PlotBounds {
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for row in forecast.rows.iter().filter(|r| r.date >= start) {
        y_min = y_min.min(row.lower);
        y_max = y_max.max(row.upper);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }
    let margin = (y_max - y_min).abs().max(1.0) * 0.05;
    PlotBounds::from_min_max(
        [date_ts(start), y_min - margin],
        [date_ts(last), y_max + margin],
    )
}

/// Render the forecast chart: prediction line, lower and upper bound lines,
/// a filled band between the bounds, and preset range buttons over a
/// drag/zoom plot.
pub fn forecast_chart(
    ui: &mut egui::Ui,
    forecast: &Forecast,
    pending_bounds: &mut Option<PlotBounds>,
) {
    ui.strong("Prediction Graph");

    let rows = &forecast.rows;
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        ui.label("No forecast rows to draw.");
        return;
    };
    let (first_date, last_date) = (first.date, last.date);

    ui.horizontal(|ui| {
        for preset in RangePreset::ALL {
            if ui.small_button(preset.label()).clicked() {
                let start = preset.window_start(first_date, last_date);
                *pending_bounds = Some(preset_bounds(forecast, start, last_date));
            }
        }
    });

    let predicted: PlotPoints = rows.iter().map(|r| [date_ts(r.date), r.predicted]).collect();
    let lower: PlotPoints = rows.iter().map(|r| [date_ts(r.date), r.lower]).collect();
    let upper: PlotPoints = rows.iter().map(|r| [date_ts(r.date), r.upper]).collect();

    // Closed polygon: the upper bound followed by the reversed lower bound.
    let band: PlotPoints = rows
        .iter()
        .map(|r| [date_ts(r.date), r.upper])
        .chain(rows.iter().rev().map(|r| [date_ts(r.date), r.lower]))
        .collect();

    let take_bounds = pending_bounds.take();
    Plot::new("forecast_chart")
        .height(340.0)
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_formatter(axis_formatter)
        .label_formatter(move |name, value| {
            let date = format_ts(value.x, "%Y-%m-%d");
            format!("{name}\nDate: {date}\nPrice: {:.2}", value.y)
        })
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(bounds) = take_bounds {
                plot_ui.set_plot_bounds(bounds);
            }

            plot_ui.polygon(
                Polygon::new(band)
                    .fill_color(theme::BAND_FILL)
                    .stroke(egui::Stroke::NONE)
                    .name("Confidence Band"),
            );
            plot_ui.line(
                Line::new(lower)
                    .name("Lower Bound")
                    .color(theme::BOUND_LINE)
                    .width(1.0),
            );
            plot_ui.line(
                Line::new(upper)
                    .name("Upper Bound")
                    .color(theme::BOUND_LINE)
                    .width(1.0),
            );
            plot_ui.line(
                Line::new(predicted)
                    .name("Predicted Price")
                    .color(theme::ACCENT_RED)
                    .width(2.0),
            );
        });

    ui.add_space(10.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_ts_roundtrip() {
        let d = date(2023, 7, 4);
        assert_eq!(format_ts(date_ts(d), "%Y-%m-%d"), "2023-07-04");
    }

    #[test]
    fn test_window_start_clamps_to_first() {
        let first = date(2023, 6, 1);
        let last = date(2023, 6, 20);
        assert_eq!(RangePreset::OneYear.window_start(first, last), first);
        assert_eq!(RangePreset::All.window_start(first, last), first);
    }

    #[test]
    fn test_ytd_window_start() {
        let first = date(2022, 3, 1);
        let last = date(2023, 6, 20);
        assert_eq!(
            RangePreset::YearToDate.window_start(first, last),
            date(2023, 1, 1)
        );
    }
}
