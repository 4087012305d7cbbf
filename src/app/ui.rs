// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use super::state::Page;
use super::WelcomeApp;
use crate::browser::BrowserRuntimeState;
use crate::config::{ACTIONS_PER_ROW, BROWSERS_PER_ROW, CARD_ICON_SIZE, QRCODE_ICON_SIZE};
use crate::icons::{file_uri, is_qrcode, IconResolver};
use crate::navigation::DotState;
use crate::pages::{ActionSpec, ActionType, BrowserSpec};
use crate::system_info::SystemInfo;
use eframe::egui;
use std::path::Path;

const LOG_PANEL_WIDTH: f32 = 320.0;
const LOGO_SIZE: f32 = 128.0;
const PAGE_ICON_SIZE: f32 = 48.0;
const DOT_SIZE: f32 = 12.0;

/// What the user clicked this frame, applied after rendering
enum Clicked {
    Action(ActionSpec),
    Browser(usize),
}

fn icon_image(path: &Path, size: f32) -> egui::Image<'static> {
    egui::Image::new(file_uri(path))
        .fit_to_exact_size(egui::vec2(size, size))
}

fn page_header(
    ui: &mut egui::Ui,
    icons: &IconResolver,
    title: &str,
    subtitle: &str,
    icon: Option<&str>,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(12.0);
        if let Some(path) = icon.and_then(|name| icons.action_icon(name)) {
            ui.add(icon_image(&path, PAGE_ICON_SIZE));
            ui.add_space(6.0);
        }
        ui.heading(egui::RichText::new(title).size(26.0).strong());
        if !subtitle.is_empty() {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(subtitle).weak());
        }
        ui.add_space(20.0);
    });
}

fn render_welcome(ui: &mut egui::Ui, info: Option<&SystemInfo>) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);

        let Some(info) = info else {
            ui.add(egui::Spinner::new().size(32.0));
            ui.label("Collecting system information...");
            return;
        };

        if let Some(logo) = &info.logo {
            ui.add(icon_image(logo, LOGO_SIZE));
            ui.add_space(12.0);
        }

        ui.heading(egui::RichText::new(&info.pretty_name).size(32.0).strong());
        ui.add_space(4.0);
        ui.label(egui::RichText::new("Welcome to your new system").size(18.0));

        if let Some(version) = &info.version {
            ui.add_space(8.0);
            egui::Frame::new()
                .fill(ui.visuals().selection.bg_fill)
                .corner_radius(10.0)
                .inner_margin(egui::Margin::symmetric(10, 3))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("v{}", version))
                            .color(ui.visuals().selection.stroke.color),
                    );
                });
        }

        ui.add_space(24.0);

        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui| {
                egui::Grid::new("system_info")
                    .num_columns(2)
                    .spacing([24.0, 8.0])
                    .show(ui, |ui| {
                        for (label, value) in [
                            ("Kernel", &info.kernel),
                            ("Architecture", &info.architecture),
                            ("Desktop", &info.desktop),
                            ("Display", &info.display),
                            ("Packages", &info.packages),
                        ] {
                            ui.label(egui::RichText::new(label).strong());
                            ui.label(value);
                            ui.end_row();
                        }
                    });
            });

        if let Some(url) = &info.home_url {
            ui.add_space(12.0);
            ui.hyperlink(url);
        }
    });
}

/// Returns true when a clickable card was clicked
fn action_card(ui: &mut egui::Ui, icons: &IconResolver, action: &ActionSpec) -> bool {
    let size = if is_qrcode(&action.icon) {
        QRCODE_ICON_SIZE
    } else {
        CARD_ICON_SIZE
    };
    let clickable = action.action_type != ActionType::Image;

    let response = egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                if let Some(path) = icons.action_icon(&action.icon) {
                    ui.add(icon_image(&path, size));
                }
                ui.add_space(6.0);
                ui.label(&action.label);
            });
        })
        .response;

    if !clickable {
        return false;
    }
    let response = response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    response.clicked()
}

fn browser_card(
    ui: &mut egui::Ui,
    icons: &IconResolver,
    spec: &BrowserSpec,
    state: &BrowserRuntimeState,
) -> bool {
    let mut frame = egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(12));
    if state.is_default {
        frame = frame.stroke(egui::Stroke::new(2.0, ui.visuals().selection.bg_fill));
    }

    let response = ui
        .add_enabled_ui(!state.loading, |ui| {
            if !state.installed {
                ui.multiply_opacity(0.6);
            }
            frame
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        if let Some(path) = icons.browser_icon(&spec.package) {
                            ui.add(icon_image(&path, CARD_ICON_SIZE));
                        }
                        ui.add_space(6.0);
                        ui.label(egui::RichText::new(&spec.label).strong());
                        ui.add_space(4.0);
                        if state.loading {
                            ui.add(egui::Spinner::new());
                        } else if state.is_default {
                            ui.colored_label(ui.visuals().selection.bg_fill, "✔ Default");
                        } else if state.installed {
                            ui.label("Installed");
                        } else {
                            ui.label(egui::RichText::new("Not installed").weak());
                        }
                    });
                })
                .response
        })
        .inner;

    if state.loading {
        return false;
    }
    response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .clicked()
}

fn render_error(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.colored_label(
            ui.visuals().error_fg_color,
            egui::RichText::new("⚠").size(48.0),
        );
        ui.add_space(12.0);
        ui.heading("Could not load the welcome pages");
        ui.add_space(8.0);
        ui.label(message);
        ui.add_space(8.0);
        ui.label(egui::RichText::new("Check the log for details.").weak());
    });
}

/// Returns the index of a clicked dot
fn progress_dots(ui: &mut egui::Ui, dots: &[DotState]) -> Option<usize> {
    let mut clicked = None;
    let visuals = ui.visuals().clone();

    ui.horizontal(|ui| {
        for (i, dot) in dots.iter().enumerate() {
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(DOT_SIZE, DOT_SIZE), egui::Sense::click());
            let (radius, color) = match dot {
                DotState::Active => (DOT_SIZE / 2.0, visuals.selection.bg_fill),
                DotState::Completed => (DOT_SIZE / 2.5, visuals.weak_text_color()),
                DotState::Pending => (DOT_SIZE / 3.0, visuals.widgets.inactive.bg_fill),
            };
            ui.painter().circle_filled(rect.center(), radius, color);
            if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                clicked = Some(i);
            }
        }
    });

    clicked
}

impl eframe::App for WelcomeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let current = self.navigation.current();
                ui.label(
                    egui::RichText::new(format!(
                        "{}  ({}/{})",
                        self.pages[current].title(),
                        current + 1,
                        self.navigation.count()
                    ))
                    .weak(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("📜").on_hover_text("Toggle Log Area").clicked() {
                        self.show_log = !self.show_log;

                        // Adjust window size when toggling log
                        let current_size = ctx.content_rect().size();
                        let new_width = if self.show_log {
                            current_size.x + LOG_PANEL_WIDTH
                        } else {
                            current_size.x - LOG_PANEL_WIDTH
                        };
                        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                            new_width,
                            current_size.y,
                        )));
                    }
                });
            });
        });

        if self.show_log {
            egui::SidePanel::right("log_panel")
                .resizable(true)
                .default_width(LOG_PANEL_WIDTH)
                .min_width(200.0)
                .show(ctx, |ui| {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.heading("Log");
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("X").on_hover_text("Close Log").clicked() {
                                self.show_log = false;
                                let current_size = ui.ctx().content_rect().size();
                                ui.ctx().send_viewport_cmd(egui::ViewportCommand::InnerSize(
                                    egui::vec2(current_size.x - LOG_PANEL_WIDTH, current_size.y),
                                ));
                            }
                        });
                    });

                    ui.horizontal(|ui| {
                        if ui.button("📋 Copy to Clipboard").clicked() {
                            let log_path = crate::debug::get_log_path();
                            match std::fs::read_to_string(&log_path) {
                                Ok(contents) => match arboard::Clipboard::new()
                                    .and_then(|mut clipboard| clipboard.set_text(contents))
                                {
                                    Ok(_) => self.log("Log copied to clipboard"),
                                    Err(e) => {
                                        self.log(&format!("Failed to copy to clipboard: {}", e))
                                    }
                                },
                                Err(e) => self.log(&format!("Failed to read log file: {}", e)),
                            }
                        }
                        ui.label(format!(
                            "Log: {:?}",
                            crate::debug::get_log_path().file_name().unwrap_or_default()
                        ));
                    });

                    ui.separator();

                    egui::ScrollArea::vertical()
                        .stick_to_bottom(true)
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            let messages = self
                                .log_messages
                                .lock()
                                .map(|logs| logs.join("\n"))
                                .unwrap_or_default();
                            ui.add(
                                egui::TextEdit::multiline(&mut messages.as_str())
                                    .font(egui::TextStyle::Monospace)
                                    .desired_width(f32::INFINITY)
                                    .interactive(false),
                            );
                        });
                });
        }

        let mut go_back = false;
        let mut go_next = false;
        let mut jump = None;

        egui::TopBottomPanel::bottom("navigation")
            .min_height(52.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.columns(3, |columns| {
                    columns[0].allocate_ui_with_layout(
                        egui::Vec2::ZERO,
                        egui::Layout::left_to_right(egui::Align::Center),
                        |ui| {
                            let mut enabled = self.autostart_enabled;
                            let response = ui.add_enabled(
                                self.autostart.is_some(),
                                egui::Checkbox::new(&mut enabled, "Show on startup"),
                            );
                            if response.changed() {
                                self.set_autostart(enabled);
                            }
                        },
                    );

                    columns[1].vertical_centered(|ui| {
                        jump = progress_dots(ui, &self.navigation.dots());
                    });

                    columns[2].allocate_ui_with_layout(
                        egui::Vec2::ZERO,
                        egui::Layout::right_to_left(egui::Align::Center),
                        |ui| {
                            let next_label = if self.navigation.is_last() {
                                "Get Started"
                            } else {
                                "Next"
                            };
                            let next = egui::Button::new(egui::RichText::new(next_label).strong())
                                .min_size(egui::vec2(110.0, 32.0))
                                .fill(ui.visuals().selection.bg_fill);
                            if ui.add(next).clicked() {
                                go_next = true;
                            }

                            if !self.navigation.is_first()
                                && ui
                                    .add(egui::Button::new("Back").min_size(egui::vec2(90.0, 32.0)))
                                    .clicked()
                            {
                                go_back = true;
                            }
                        },
                    );
                });
                ui.add_space(8.0);
            });

        let mut clicked = None;
        let current = self.navigation.current();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match &self.pages[current] {
                    Page::Welcome => render_welcome(ui, self.system_info.as_ref()),
                    Page::Actions {
                        title,
                        subtitle,
                        icon,
                        actions,
                    } => {
                        page_header(ui, &self.icons, title, subtitle, icon.as_deref());
                        for row in actions.chunks(ACTIONS_PER_ROW) {
                            ui.columns(ACTIONS_PER_ROW, |columns| {
                                for (column, action) in columns.iter_mut().zip(row) {
                                    if action_card(column, &self.icons, action) {
                                        clicked = Some(Clicked::Action(action.clone()));
                                    }
                                }
                            });
                            ui.add_space(12.0);
                        }
                    }
                    Page::Browsers {
                        title,
                        subtitle,
                        icon,
                        browsers,
                        states,
                    } => {
                        page_header(ui, &self.icons, title, subtitle, icon.as_deref());
                        let entries: Vec<_> = browsers.iter().zip(states).enumerate().collect();
                        for row in entries.chunks(BROWSERS_PER_ROW) {
                            ui.columns(BROWSERS_PER_ROW, |columns| {
                                for (column, (index, (spec, state))) in
                                    columns.iter_mut().zip(row)
                                {
                                    if browser_card(column, &self.icons, spec, state) {
                                        clicked = Some(Clicked::Browser(*index));
                                    }
                                }
                            });
                            ui.add_space(12.0);
                        }
                    }
                    Page::LoadError(message) => render_error(ui, message),
                });
        });

        match clicked {
            Some(Clicked::Action(action)) => self.run_action(&action),
            Some(Clicked::Browser(index)) => self.start_browser_select(current, index, ctx),
            None => {}
        }

        if let Some(page) = jump {
            self.jump_to(page);
        } else if go_back {
            self.go_back();
        } else if go_next {
            self.go_next(ctx);
        }
    }
}
