// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use crate::config::{AppPaths, AUTOSTART_FILE_NAME};
use std::io;
use std::path::{Path, PathBuf};

const HIDDEN_KEY: &str = "Hidden=";
const HIDDEN_TRUE: &str = "Hidden=true";

/// "Show on startup" toggle backed by the user's autostart .desktop file.
///
/// The user file overrides the system one; it is created from the system
/// template on demand and disabled with `Hidden=true`.
#[derive(Debug, Clone)]
pub struct Autostart {
    user_file: PathBuf,
    system_template: PathBuf,
}

impl Autostart {
    pub fn new(user_file: impl Into<PathBuf>, system_template: impl Into<PathBuf>) -> Self {
        Self {
            user_file: user_file.into(),
            system_template: system_template.into(),
        }
    }

    /// ~/.config/autostart entry, templated from the system entry
    pub fn for_user(paths: &AppPaths) -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        Some(Self::new(
            config_dir.join("autostart").join(AUTOSTART_FILE_NAME),
            paths.autostart_template(),
        ))
    }

    pub fn user_file(&self) -> &Path {
        &self.user_file
    }

    /// Enabled unless the user file exists and is hidden
    pub fn is_enabled(&self) -> bool {
        match std::fs::read_to_string(&self.user_file) {
            Ok(contents) => !contents.lines().any(|l| l.trim() == HIDDEN_TRUE),
            Err(_) => true,
        }
    }

    pub fn set_enabled(&self, enabled: bool) -> io::Result<()> {
        if let Some(dir) = self.user_file.parent() {
            std::fs::create_dir_all(dir)?;
        }

        if enabled {
            if self.user_file.exists() {
                let contents = std::fs::read_to_string(&self.user_file)?;
                let kept: Vec<&str> = contents
                    .lines()
                    .filter(|l| !l.starts_with(HIDDEN_KEY))
                    .collect();
                std::fs::write(&self.user_file, join_lines(&kept))?;
            } else {
                self.copy_template()?;
            }
        } else {
            if !self.user_file.exists() {
                self.copy_template()?;
            }
            let contents = std::fs::read_to_string(&self.user_file).unwrap_or_default();
            let mut replaced = false;
            let mut lines: Vec<&str> = contents
                .lines()
                .map(|l| {
                    if l.starts_with(HIDDEN_KEY) {
                        replaced = true;
                        HIDDEN_TRUE
                    } else {
                        l
                    }
                })
                .collect();
            if !replaced {
                lines.push(HIDDEN_TRUE);
            }
            std::fs::write(&self.user_file, join_lines(&lines))?;
        }

        crate::debug::log(&format!(
            "Autostart {} ({:?})",
            if enabled { "enabled" } else { "disabled" },
            self.user_file
        ));
        Ok(())
    }

    /// Missing template is not an error; the system entry simply doesn't exist
    fn copy_template(&self) -> io::Result<()> {
        if self.system_template.exists() {
            std::fs::copy(&self.system_template, &self.user_file)?;
        } else {
            crate::debug::log(&format!(
                "Autostart template {:?} not found",
                self.system_template
            ));
        }
        Ok(())
    }
}

fn join_lines(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
