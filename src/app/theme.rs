// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use eframe::egui;
use egui_thematic::ThemeConfig;

const ACCENT: [u8; 4] = [53, 132, 228, 255];
const ACCENT_HOVER: [u8; 4] = [53, 132, 228, 60];
const ACCENT_ACTIVE: [u8; 4] = [53, 132, 228, 110];

/// Dark BigLinux theme on top of the gruvbox preset's widget styling
pub(super) fn dark_theme() -> ThemeConfig {
    ThemeConfig {
        name: "BigLinux".to_string(),
        dark_mode: true,
        override_text_color: Some([236, 239, 244, 255]),
        override_weak_text_color: Some([140, 146, 158, 255]),
        override_hyperlink_color: Some([120, 174, 237, 255]),
        override_faint_bg_color: Some([44, 46, 52, 255]),
        override_extreme_bg_color: Some([26, 27, 31, 255]),
        override_window_fill: Some([34, 36, 41, 255]),
        override_panel_fill: Some([34, 36, 41, 255]),
        override_selection_bg: Some(ACCENT),
        override_widget_hovered_bg_fill: Some(ACCENT_HOVER),
        override_widget_hovered_bg_stroke_color: Some(ACCENT),
        override_widget_active_bg_fill: Some(ACCENT_ACTIVE),
        override_widget_active_bg_stroke_color: Some(ACCENT),
        override_widget_active_fg_stroke_color: Some([236, 239, 244, 255]),
        ..ThemeConfig::gruvbox_dark_preset()
    }
}

fn light_visuals() -> egui::Visuals {
    let accent = egui::Color32::from_rgb(ACCENT[0], ACCENT[1], ACCENT[2]);
    let mut visuals = egui::Visuals::light();
    visuals.selection.bg_fill = accent;
    visuals.hyperlink_color = accent;
    visuals.widgets.hovered.bg_stroke.color = accent;
    visuals.widgets.active.bg_stroke.color = accent;
    visuals
}

/// Follow the dark/light preference the platform reported at startup
pub(super) fn apply(ctx: &egui::Context) {
    if ctx.style().visuals.dark_mode {
        ctx.set_visuals(dark_theme().to_visuals());
    } else {
        ctx.set_visuals(light_visuals());
    }
}
