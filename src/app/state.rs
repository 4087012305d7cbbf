// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use super::theme;
use crate::autostart::Autostart;
use crate::browser::{BrowserEvent, BrowserManager, BrowserRuntimeState, ScriptHelper};
use crate::config::AppPaths;
use crate::dispatch::{ActionDispatcher, SystemLauncher};
use crate::icons::IconResolver;
use crate::navigation::Navigation;
use crate::pages::{load_pages, ActionSpec, BrowserSpec, ConfigLoadError, PageKind, PageSpec};
use crate::system_info::SystemInfo;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// One page as displayed. Page 0 is always `Welcome`.
#[derive(Debug, Clone)]
pub(super) enum Page {
    Welcome,
    Actions {
        title: String,
        subtitle: String,
        icon: Option<String>,
        actions: Vec<ActionSpec>,
    },
    Browsers {
        title: String,
        subtitle: String,
        icon: Option<String>,
        browsers: Arc<Vec<BrowserSpec>>,
        states: Vec<BrowserRuntimeState>,
    },
    /// Shown in place of the configured pages when pages.yaml can't be loaded
    LoadError(String),
}

impl Page {
    fn from_spec(spec: PageSpec) -> Self {
        match spec.kind {
            PageKind::Content(actions) => Page::Actions {
                title: spec.title,
                subtitle: spec.subtitle,
                icon: spec.icon,
                actions,
            },
            PageKind::Browsers(browsers) => Page::Browsers {
                title: spec.title,
                subtitle: spec.subtitle,
                icon: spec.icon,
                states: vec![BrowserRuntimeState::default(); browsers.len()],
                browsers: Arc::new(browsers),
            },
        }
    }

    pub(super) fn title(&self) -> &str {
        match self {
            Page::Welcome => "Welcome",
            Page::Actions { title, .. } | Page::Browsers { title, .. } => title,
            Page::LoadError(_) => "Error",
        }
    }
}

/// Intro page followed by the configured pages, or by a single error page
pub(super) fn build_pages(loaded: Result<Vec<PageSpec>, ConfigLoadError>) -> Vec<Page> {
    let mut pages = vec![Page::Welcome];
    match loaded {
        Ok(specs) => pages.extend(specs.into_iter().map(Page::from_spec)),
        Err(e) => pages.push(Page::LoadError(e.to_string())),
    }
    pages
}

pub struct WelcomeApp {
    // Runtime for background work
    pub(super) runtime: Runtime,

    // Pages and position
    pub(super) pages: Vec<Page>,
    pub(super) navigation: Navigation,

    // Side effects
    pub(super) dispatcher: ActionDispatcher<SystemLauncher>,
    pub(super) browser_manager: Arc<BrowserManager<ScriptHelper>>,
    pub(super) icons: IconResolver,
    pub(super) autostart: Option<Autostart>,
    pub(super) autostart_enabled: bool,

    // Intro page facts, filled in once collected
    pub(super) system_info: Option<SystemInfo>,
    pub(super) system_info_rx: mpsc::UnboundedReceiver<SystemInfo>,

    // Browser events tagged with the index of the page they belong to
    pub(super) browser_tx: mpsc::UnboundedSender<(usize, BrowserEvent)>,
    pub(super) browser_rx: mpsc::UnboundedReceiver<(usize, BrowserEvent)>,

    // Log panel
    pub(super) log_messages: Arc<Mutex<Vec<String>>>,
    pub(super) show_log: bool,
}

impl WelcomeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, paths: AppPaths) -> Self {
        theme::apply(&cc.egui_ctx);
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let runtime = Runtime::new().expect("Failed to create Tokio runtime");

        crate::debug::log_section("Startup");
        crate::debug::log(&format!("Resource root: {:?}", paths.root));

        let loaded = load_pages(&paths.pages_file());
        match &loaded {
            Ok(specs) => {
                for spec in specs {
                    crate::debug::log(&format!("Page '{}' ({:?})", spec.title, spec.page_type()));
                }
            }
            Err(e) => crate::debug::log(&format!("ERROR: {}", e)),
        }
        let pages = build_pages(loaded);
        let navigation = Navigation::new(pages.len());

        let autostart = Autostart::for_user(&paths);
        match &autostart {
            Some(a) => crate::debug::log(&format!("Autostart file: {:?}", a.user_file())),
            None => crate::debug::log(
                "WARNING: no user config directory, autostart toggle disabled",
            ),
        }
        let autostart_enabled = autostart.as_ref().map_or(true, Autostart::is_enabled);

        // System info is a handful of blocking commands; collect once in the background
        let (info_tx, info_rx) = mpsc::unbounded_channel();
        let ctx = cc.egui_ctx.clone();
        runtime.spawn(async move {
            if let Ok(info) = tokio::task::spawn_blocking(SystemInfo::collect).await {
                let _ = info_tx.send(info);
                ctx.request_repaint();
            }
        });

        let (browser_tx, browser_rx) = mpsc::unbounded_channel();

        let app = Self {
            runtime,
            pages,
            navigation,
            dispatcher: ActionDispatcher::system(paths.clone()),
            browser_manager: Arc::new(BrowserManager::new(ScriptHelper::new(
                paths.browser_script(),
            ))),
            icons: IconResolver::new(&paths),
            autostart,
            autostart_enabled,
            system_info: None,
            system_info_rx: info_rx,
            browser_tx,
            browser_rx,
            log_messages: Arc::new(Mutex::new(Vec::new())),
            show_log: false,
        };

        for page_index in 0..app.pages.len() {
            app.refresh_browsers(page_index, &cc.egui_ctx);
        }

        app
    }
}
