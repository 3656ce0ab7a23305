//! Shared colors and style for the dashboard

use egui::Color32;

pub const ACCENT_RED: Color32 = Color32::from_rgb(239, 68, 68);
pub const BAND_FILL: Color32 = Color32::from_rgba_premultiplied(90, 20, 20, 60);
pub const BOUND_LINE: Color32 = Color32::from_rgba_premultiplied(120, 40, 40, 110);

pub const BG_DARK: Color32 = Color32::from_rgb(15, 15, 20);
pub const BG_CARD: Color32 = Color32::from_rgb(24, 24, 32);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184);
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(51, 51, 68);

/// Apply the dark dashboard theme to the whole context.
pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = BG_DARK;
    style.visuals.window_fill = BG_CARD;
    style.visuals.window_rounding = egui::Rounding::same(8.0);
    style.visuals.widgets.inactive.rounding = egui::Rounding::same(6.0);
    style.visuals.widgets.active.rounding = egui::Rounding::same(6.0);
    style.visuals.widgets.hovered.rounding = egui::Rounding::same(6.0);
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);

    ctx.set_style(style);
}
