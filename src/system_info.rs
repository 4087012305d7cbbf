// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use crate::config::APP_NAME;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

const OS_RELEASE: &str = "/etc/os-release";
const UNKNOWN: &str = "Unknown";

/// Facts shown on the introductory page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub pretty_name: String,
    pub version: Option<String>,
    pub logo: Option<PathBuf>,
    pub home_url: Option<String>,
    pub kernel: String,
    pub architecture: String,
    pub desktop: String,
    pub display: String,
    pub packages: String,
}

impl SystemInfo {
    /// Blocking: runs several version and package-count commands
    pub fn collect() -> Self {
        crate::debug::log_section("System Info");

        let os = std::fs::read_to_string(OS_RELEASE)
            .map(|contents| parse_os_release(&contents))
            .unwrap_or_else(|e| {
                crate::debug::log(&format!("Error reading {}: {}", OS_RELEASE, e));
                HashMap::new()
            });

        let info = Self {
            pretty_name: os
                .get("PRETTY_NAME")
                .cloned()
                .unwrap_or_else(|| APP_NAME.to_string()),
            version: os.get("VERSION").filter(|v| !v.is_empty()).cloned(),
            logo: os
                .get("LOGO")
                .and_then(|logo| find_logo(logo, &logo_search_roots())),
            home_url: os.get("HOME_URL").filter(|url| !url.is_empty()).cloned(),
            kernel: kernel_release().unwrap_or_else(|| UNKNOWN.to_string()),
            architecture: std::env::consts::ARCH.to_string(),
            desktop: desktop_name(),
            display: display_server(
                std::env::var("XDG_SESSION_TYPE").ok().as_deref(),
                std::env::var_os("WAYLAND_DISPLAY").is_some(),
                std::env::var_os("DISPLAY").is_some(),
            ),
            packages: package_counts(),
        };

        crate::debug::log(&format!("{:?}", info));
        info
    }
}

/// Parse os-release style `KEY=value` lines, stripping surrounding quotes
pub fn parse_os_release(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

fn logo_search_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("/usr/share")]
}

/// Look up a distribution logo the way os-release LOGO names are installed
pub fn find_logo(logo: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    if logo.is_empty() {
        return None;
    }

    let candidates = [
        format!("pixmaps/{}", logo),
        format!("pixmaps/{}.png", logo),
        format!("pixmaps/{}.svg", logo),
        format!("icons/hicolor/scalable/apps/{}.svg", logo),
        format!("icons/hicolor/256x256/apps/{}.png", logo),
        format!("icons/hicolor/128x128/apps/{}.png", logo),
    ];

    roots
        .iter()
        .flat_map(|root| candidates.iter().map(move |c| root.join(c)))
        .find(|path| path.is_file())
}

/// Kernel release as reported by uname(2)
pub fn kernel_release() -> Option<String> {
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
    if unsafe { libc::uname(&mut uts) } != 0 {
        return None;
    }
    let release = unsafe { std::ffi::CStr::from_ptr(uts.release.as_ptr()) };
    Some(release.to_string_lossy().into_owned())
}

fn desktop_name() -> String {
    let desktop = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();

    if desktop.contains("KDE") || desktop.to_lowercase().contains("plasma") {
        versioned("Plasma", command_version("plasmashell", "plasmashell"))
    } else if desktop.contains("GNOME") {
        versioned("GNOME", command_version("gnome-shell", "GNOME Shell"))
    } else if desktop.contains("XFCE") {
        versioned("XFCE", command_version("xfce4-session", "xfce4-session"))
    } else if desktop.is_empty() {
        UNKNOWN.to_string()
    } else {
        desktop
    }
}

fn versioned(name: &str, version: Option<String>) -> String {
    match version {
        Some(v) => format!("{} {}", name, v),
        None => name.to_string(),
    }
}

/// Last word of the first output line containing `marker`
fn command_version(program: &str, marker: &str) -> Option<String> {
    let output = Command::new(program).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    version_from_output(&String::from_utf8_lossy(&output.stdout), marker)
}

pub fn version_from_output(stdout: &str, marker: &str) -> Option<String> {
    stdout
        .lines()
        .find(|line| line.contains(marker))
        .and_then(|line| line.split_whitespace().last())
        .map(str::to_string)
}

/// Wayland or X11, from the session type or whichever display socket is set
pub fn display_server(session_type: Option<&str>, wayland: bool, x11: bool) -> String {
    match session_type.map(str::to_lowercase).as_deref() {
        Some("wayland") => return "Wayland".to_string(),
        Some("x11") => return "X11".to_string(),
        _ => {}
    }
    if wayland {
        "Wayland".to_string()
    } else if x11 {
        "X11".to_string()
    } else {
        UNKNOWN.to_string()
    }
}

fn count_lines(program: &str, args: &[&str]) -> Option<usize> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|l| !l.trim().is_empty())
            .count(),
    )
}

fn package_counts() -> String {
    let counts: Vec<String> = [
        ("Pacman", count_lines("pacman", &["-Q"])),
        ("Flatpak", count_lines("flatpak", &["list", "--app"])),
    ]
    .into_iter()
    .filter_map(|(name, count)| count.map(|c| format!("{}: {}", name, c)))
    .collect();

    if counts.is_empty() {
        UNKNOWN.to_string()
    } else {
        counts.join(" | ")
    }
}
