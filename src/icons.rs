// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use crate::config::AppPaths;
use std::path::{Path, PathBuf};

const THEME_ROOT: &str = "/usr/share/icons";
const PIXMAPS: &str = "/usr/share/pixmaps";
const THEMES: &[&str] = &["breeze", "Adwaita", "hicolor"];
const SIZES: &[&str] = &["scalable", "256x256", "128x128", "64x64", "48x48"];
const CONTEXTS: &[&str] = &[
    "apps",
    "places",
    "status",
    "actions",
    "devices",
    "categories",
];
const EXTENSIONS: &[&str] = &["svg", "png"];

const BROWSER_FALLBACK: &str = "web-browser";
const MISSING_ICON: &str = "image-missing";

/// Resolves icon names from pages.yaml to image files.
///
/// Lookup order for a name: bundled file under `image/`, then the icon
/// theme (bare names only), then the bundled fallback graphic, then the
/// theme's "image-missing". `None` means the card is drawn without an icon.
#[derive(Debug, Clone)]
pub struct IconResolver {
    image_dir: PathBuf,
    fallback_image: PathBuf,
    theme_roots: Vec<PathBuf>,
    pixmap_dirs: Vec<PathBuf>,
}

impl IconResolver {
    pub fn new(paths: &AppPaths) -> Self {
        Self::with_roots(
            paths,
            vec![PathBuf::from(THEME_ROOT)],
            vec![PathBuf::from(PIXMAPS)],
        )
    }

    pub fn with_roots(
        paths: &AppPaths,
        theme_roots: Vec<PathBuf>,
        pixmap_dirs: Vec<PathBuf>,
    ) -> Self {
        Self {
            image_dir: paths.image_dir(),
            fallback_image: paths.fallback_image(),
            theme_roots,
            pixmap_dirs,
        }
    }

    pub fn action_icon(&self, name: &str) -> Option<PathBuf> {
        self.bundled(name)
            .or_else(|| self.themed(name))
            .or_else(|| self.fallback())
    }

    /// Bundled image/browsers/<package>.svg, else the generic browser icon
    pub fn browser_icon(&self, package: &str) -> Option<PathBuf> {
        self.bundled(&format!("browsers/{}.svg", package))
            .or_else(|| self.themed(BROWSER_FALLBACK))
            .or_else(|| self.fallback())
    }

    fn bundled(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let path = self.image_dir.join(name);
        path.is_file().then_some(path)
    }

    fn fallback(&self) -> Option<PathBuf> {
        if self.fallback_image.is_file() {
            Some(self.fallback_image.clone())
        } else {
            self.themed(MISSING_ICON)
        }
    }

    /// Names with a path separator or image extension refer to bundled files only
    fn themed(&self, name: &str) -> Option<PathBuf> {
        let has_image_ext = Path::new(name)
            .extension()
            .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)));
        if name.is_empty() || name.contains('/') || has_image_ext {
            return None;
        }

        for root in &self.theme_roots {
            for theme in THEMES {
                for size in SIZES {
                    for context in CONTEXTS {
                        for ext in EXTENSIONS {
                            let path = root
                                .join(theme)
                                .join(size)
                                .join(context)
                                .join(format!("{}.{}", name, ext));
                            if path.is_file() {
                                return Some(path);
                            }
                        }
                    }
                }
            }
        }

        self.pixmap_dirs
            .iter()
            .flat_map(|dir| {
                EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{}.{}", name, ext)))
            })
            .find(|path| path.is_file())
    }
}

/// QR code images are drawn larger than regular card icons
pub fn is_qrcode(icon: &str) -> bool {
    icon.to_lowercase().contains("qrcode")
}

/// file:// URI for egui's image loaders
pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}
