// ============================================================================
// WELCOME CONFIGURATION
// ============================================================================
// Edit this file to customize the welcome assistant for your distribution.
//
// QUICK START - To rebrand the assistant, change these values:
//   1. APP_NAME            - Your distribution name (e.g., "BigLinux")
//   2. DEFAULT_APP_ROOT    - Where pages.yaml, scripts/ and image/ are installed
//   3. AUTOSTART_FILE_NAME - The .desktop file used for "Show on startup"
//
// Page content (titles, actions, browsers) lives in pages.yaml under the
// application root, not in this file.
// ============================================================================

use eframe::egui;
use std::path::{Path, PathBuf};

// ----------------------------------------------------------------------------
// BRANDING
// ----------------------------------------------------------------------------

/// The name of your distribution (used when os-release has no PRETTY_NAME)
pub const APP_NAME: &str = "BigLinux";

/// Window title (displayed in title bar)
pub const WINDOW_TITLE: &str = "Welcome";

/// Application id, also the base name of the autostart .desktop file
pub const APP_ID: &str = "org.biglinux.welcome";

// ----------------------------------------------------------------------------
// RESOURCE LOCATIONS
// ----------------------------------------------------------------------------

/// Installed resource root (pages.yaml, scripts/, image/)
pub const DEFAULT_APP_ROOT: &str = "/usr/share/biglinux/welcome";

/// Environment variable that overrides DEFAULT_APP_ROOT (useful when running
/// from a source checkout)
pub const APP_ROOT_ENV: &str = "BIGLINUX_WELCOME_PATH";

/// Page configuration, relative to the resource root
pub const PAGES_FILE: &str = "pages.yaml";

/// Browser helper script, relative to the resource root
pub const BROWSER_SCRIPT: &str = "scripts/browser.sh";

/// Image directory, relative to the resource root
pub const IMAGE_DIR: &str = "image";

/// Generic fallback graphic, relative to IMAGE_DIR
pub const FALLBACK_IMAGE: &str = "main/image-missing-symbolic.svg";

/// Window icon, relative to IMAGE_DIR (only used with the "icon" feature)
#[cfg(feature = "icon")]
pub const APP_ICON_PNG: &str = "main/welcome.png";

// ----------------------------------------------------------------------------
// AUTOSTART
// ----------------------------------------------------------------------------

/// Name of the autostart entry in ~/.config/autostart and /etc/xdg/autostart
pub const AUTOSTART_FILE_NAME: &str = "org.biglinux.welcome.desktop";

/// System-wide autostart template
pub const SYSTEM_AUTOSTART_DIR: &str = "/etc/xdg/autostart";

// ----------------------------------------------------------------------------
// WINDOW SETTINGS
// ----------------------------------------------------------------------------

/// Default window size (width, height)
pub const WINDOW_SIZE: (f32, f32) = (1000.0, 780.0);

/// Minimum window size (width, height)
pub const WINDOW_MIN_SIZE: (f32, f32) = (760.0, 560.0);

/// Action cards per row on content pages
pub const ACTIONS_PER_ROW: usize = 4;

/// Browser cards per row on the browser page
pub const BROWSERS_PER_ROW: usize = 5;

/// Icon edge length for action and browser cards
pub const CARD_ICON_SIZE: f32 = 64.0;

/// Larger edge length for QR code images
pub const QRCODE_ICON_SIZE: f32 = 200.0;

// ----------------------------------------------------------------------------
// APPLICATION PATHS
// ----------------------------------------------------------------------------

/// Resource root of the installed application.
///
/// Resolved once in `main` and handed to every component that needs to find
/// bundled files, so nothing reads a global path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub root: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use APP_ROOT_ENV if set and non-empty, DEFAULT_APP_ROOT otherwise
    pub fn from_env() -> Self {
        match std::env::var(APP_ROOT_ENV) {
            Ok(root) if !root.trim().is_empty() => Self::new(root),
            _ => Self::new(DEFAULT_APP_ROOT),
        }
    }

    pub fn pages_file(&self) -> PathBuf {
        self.root.join(PAGES_FILE)
    }

    pub fn browser_script(&self) -> PathBuf {
        self.root.join(BROWSER_SCRIPT)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.root.join(IMAGE_DIR)
    }

    pub fn fallback_image(&self) -> PathBuf {
        self.image_dir().join(FALLBACK_IMAGE)
    }

    /// Resolve a path relative to the resource root
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// System autostart template, falling back to the .desktop file shipped
    /// next to the resources (development / non-standard installs)
    pub fn autostart_template(&self) -> PathBuf {
        let system = Path::new(SYSTEM_AUTOSTART_DIR).join(AUTOSTART_FILE_NAME);
        if system.exists() {
            return system;
        }
        self.shipped_autostart_file()
    }

    /// <prefix>/share/applications entry next to <prefix>/share/biglinux/welcome
    fn shipped_autostart_file(&self) -> PathBuf {
        self.root
            .join("../../applications")
            .join(AUTOSTART_FILE_NAME)
    }
}

// ----------------------------------------------------------------------------
// ICON CONFIGURATION
// ----------------------------------------------------------------------------
// The window icon is read from image/main/welcome.png under the resource root
// when built with `--features icon`. Without the feature the window manager
// picks the icon from the installed .desktop file.
// ----------------------------------------------------------------------------

/// Load the application icon for the window
/// Returns None if no icon is configured or if loading fails
pub fn load_app_icon(paths: &AppPaths) -> Option<egui::IconData> {
    #[cfg(feature = "icon")]
    {
        let image = image::open(paths.image_dir().join(APP_ICON_PNG))
            .ok()?
            .into_rgba8();
        let (width, height) = image.dimensions();
        Some(egui::IconData {
            rgba: image.into_raw(),
            width,
            height,
        })
    }
    #[cfg(not(feature = "icon"))]
    {
        let _ = paths;
        None
    }
}
