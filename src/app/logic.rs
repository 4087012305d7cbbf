// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use super::state::Page;
use super::WelcomeApp;
use crate::browser::{BrowserEvent, BrowserRuntimeState};
use crate::navigation::NavStep;
use crate::pages::{ActionSpec, ActionType};
use eframe::egui;

/// Fold a worker event into the displayed browser states.
///
/// A refresh keeps the loading flags already shown, so a select still in
/// flight for another browser stays disabled.
pub(super) fn apply_browser_event(states: &mut Vec<BrowserRuntimeState>, event: BrowserEvent) {
    match event {
        BrowserEvent::Loading { index, loading } => {
            if let Some(state) = states.get_mut(index) {
                state.loading = loading;
            }
        }
        BrowserEvent::Refreshed(mut fresh) => {
            for (new, old) in fresh.iter_mut().zip(states.iter()) {
                new.loading = old.loading;
            }
            *states = fresh;
        }
    }
}

impl WelcomeApp {
    pub(super) fn log(&self, msg: &str) {
        crate::debug::log(msg);
        if let Ok(mut logs) = self.log_messages.lock() {
            logs.push(msg.to_string());
            // Keep only last 100 messages
            if logs.len() > 100 {
                logs.remove(0);
            }
        }
    }

    pub(super) fn run_action(&self, action: &ActionSpec) {
        if action.action_type == ActionType::Image {
            return;
        }
        self.log(&format!("Running: {}", action.label));
        if let Err(e) = self.dispatcher.dispatch(action) {
            self.log(&format!("ERROR: {}", e));
        }
    }

    /// Re-derive the browser states of one page in the background.
    /// Does nothing for pages that aren't browser pages.
    pub(super) fn refresh_browsers(&self, page_index: usize, ctx: &egui::Context) {
        let Some(Page::Browsers { browsers, .. }) = self.pages.get(page_index) else {
            return;
        };

        let browsers = browsers.clone();
        let manager = self.browser_manager.clone();
        let tx = self.browser_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || manager.refresh(&browsers)).await;
            match result {
                Ok(states) => {
                    let _ = tx.send((page_index, BrowserEvent::Refreshed(states)));
                    ctx.request_repaint();
                }
                Err(e) => crate::debug::log(&format!("ERROR: browser refresh task failed: {}", e)),
            }
        });
    }

    /// Install (if needed) and set the default browser. Clicks on a browser
    /// that is already busy are ignored.
    pub(super) fn start_browser_select(
        &mut self,
        page_index: usize,
        browser_index: usize,
        ctx: &egui::Context,
    ) {
        let Some(Page::Browsers {
            browsers, states, ..
        }) = self.pages.get_mut(page_index)
        else {
            return;
        };

        match states.get_mut(browser_index) {
            Some(state) if !state.loading => state.loading = true,
            _ => return,
        }

        let browsers = browsers.clone();
        let label = browsers[browser_index].label.clone();
        self.log(&format!("Selecting browser: {}", label));

        let manager = self.browser_manager.clone();
        let tx = self.browser_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn_blocking(move || {
            manager.select_and_reconcile(&browsers, browser_index, |event| {
                let _ = tx.send((page_index, event));
                ctx.request_repaint();
            });
        });
    }

    /// Drain worker results; called at the top of every frame
    pub(super) fn poll_background(&mut self) {
        while let Ok(info) = self.system_info_rx.try_recv() {
            self.system_info = Some(info);
        }

        while let Ok((page_index, event)) = self.browser_rx.try_recv() {
            if let Some(Page::Browsers { states, .. }) = self.pages.get_mut(page_index) {
                apply_browser_event(states, event);
            }
        }
    }

    pub(super) fn set_autostart(&mut self, enabled: bool) {
        let Some(autostart) = &self.autostart else {
            return;
        };

        let result = autostart.set_enabled(enabled);
        self.autostart_enabled = autostart.is_enabled();
        if let Err(e) = result {
            self.log(&format!("ERROR: failed to update autostart: {}", e));
        }
    }

    pub(super) fn go_back(&mut self) {
        self.navigation.back();
    }

    pub(super) fn go_next(&mut self, ctx: &egui::Context) {
        if self.navigation.next() == NavStep::Finish {
            self.log("Welcome finished");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    pub(super) fn jump_to(&mut self, page: usize) {
        if !self.navigation.jump(page) {
            crate::debug::log(&format!("Ignoring jump to page {}", page));
        }
    }
}
