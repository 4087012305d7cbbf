// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

mod app;
mod autostart;
mod browser;
mod config;
mod debug;
mod dispatch;
mod icons;
mod navigation;
mod pages;
mod system_info;

use app::WelcomeApp;
use config::{load_app_icon, AppPaths, APP_ID, WINDOW_MIN_SIZE, WINDOW_SIZE, WINDOW_TITLE};
use eframe::egui;
use std::sync::Arc;

fn main() -> eframe::Result<()> {
    let paths = AppPaths::from_env();

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_app_id(APP_ID)
        .with_inner_size([WINDOW_SIZE.0, WINDOW_SIZE.1])
        .with_min_inner_size([WINDOW_MIN_SIZE.0, WINDOW_MIN_SIZE.1])
        .with_resizable(true);

    // Load custom icon if available
    if let Some(icon) = load_app_icon(&paths) {
        viewport = viewport.with_icon(Arc::new(icon));
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(WelcomeApp::new(cc, paths)))),
    )
}
