// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

// Module structure for the welcome application:
//
// - state.rs: Page model, WelcomeApp struct and initialization
// - theme.rs: Theme configuration
// - logic.rs: Actions, browser selection, autostart and navigation
// - ui.rs: UI rendering (eframe::App implementation)

mod logic;
mod state;
mod theme;
mod ui;

pub use state::WelcomeApp;
