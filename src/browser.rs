// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use crate::pages::{BrowserSpec, Variant};
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelperError {
    #[error("browser helper {script:?} could not be run: {source}")]
    Missing {
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("browser helper '{subcommand}' exited with {status}: {stderr}")]
    Failed {
        subcommand: String,
        status: String,
        stderr: String,
    },
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("installing {package} failed: {source}")]
    InstallFailed {
        package: String,
        #[source]
        source: HelperError,
    },
    #[error("setting {desktop} as default browser failed: {source}")]
    SetDefaultFailed {
        desktop: String,
        #[source]
        source: HelperError,
    },
}

/// External collaborator that queries and changes browser installation state
pub trait BrowserHelper: Send + Sync {
    /// Desktop identifier of the current default browser
    fn current_default(&self) -> Result<String, HelperError>;
    /// Whether the package manager reports the package as installed
    fn check(&self, package: &str) -> Result<bool, HelperError>;
    /// Install a package; may prompt for privileges and take arbitrarily long
    fn install(&self, package: &str) -> Result<(), HelperError>;
    /// Make the given desktop identifier the default browser
    fn set_default(&self, desktop: &str) -> Result<(), HelperError>;
}

/// Runs the bundled browser.sh helper
pub struct ScriptHelper {
    script: PathBuf,
}

impl ScriptHelper {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, HelperError> {
        let output = Command::new(&self.script)
            .args(args)
            .output()
            .map_err(|source| HelperError::Missing {
                script: self.script.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(HelperError::Failed {
                subcommand: args.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl BrowserHelper for ScriptHelper {
    fn current_default(&self) -> Result<String, HelperError> {
        self.run(&["getBrowser"])
    }

    fn check(&self, package: &str) -> Result<bool, HelperError> {
        Ok(self.run(&["check", package])? == "true")
    }

    fn install(&self, package: &str) -> Result<(), HelperError> {
        self.run(&["install", package]).map(|_| ())
    }

    fn set_default(&self, desktop: &str) -> Result<(), HelperError> {
        self.run(&["setBrowser", desktop]).map(|_| ())
    }
}

/// Derived, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserRuntimeState {
    pub installed: bool,
    pub detected_desktop: Option<String>,
    pub is_default: bool,
    pub loading: bool,
}

/// Progress of a select flow, delivered to whoever owns the displayed state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    Loading { index: usize, loading: bool },
    Refreshed(Vec<BrowserRuntimeState>),
}

/// First variant, in declared order, whose check path exists
pub fn detect_variant(spec: &BrowserSpec) -> Option<&Variant> {
    spec.variants
        .iter()
        .find(|v| !v.check.as_os_str().is_empty() && v.check.exists())
}

/// Derive the state of every spec against a known default identifier
pub fn reconcile(specs: &[BrowserSpec], current_default: Option<&str>) -> Vec<BrowserRuntimeState> {
    specs
        .iter()
        .map(|spec| {
            let detected = detect_variant(spec).map(|v| v.desktop.clone());
            let is_default = match (&detected, current_default) {
                (Some(desktop), Some(default)) => desktop == default,
                _ => false,
            };
            BrowserRuntimeState {
                installed: detected.is_some(),
                detected_desktop: detected,
                is_default,
                loading: false,
            }
        })
        .collect()
}

/// Installs and selects browsers through a helper, and re-derives their state
pub struct BrowserManager<H: BrowserHelper> {
    helper: H,
}

impl<H: BrowserHelper> BrowserManager<H> {
    pub fn new(helper: H) -> Self {
        Self { helper }
    }

    /// Unknown when the helper fails or prints nothing
    fn current_default(&self) -> Option<String> {
        match self.helper.current_default() {
            Ok(desktop) => {
                let desktop = desktop.trim();
                if desktop.is_empty() {
                    None
                } else {
                    Some(desktop.to_string())
                }
            }
            Err(e) => {
                crate::debug::log(&format!("Could not query default browser: {}", e));
                None
            }
        }
    }

    /// Blocking: queries the helper once. Call off the UI thread.
    pub fn refresh(&self, specs: &[BrowserSpec]) -> Vec<BrowserRuntimeState> {
        let current = self.current_default();
        crate::debug::log(&format!("Current default browser: {:?}", current));
        reconcile(specs, current.as_deref())
    }

    /// Install the browser if needed, then make it the default.
    ///
    /// Every step runs even when an earlier one failed; the first failure is
    /// returned once the flow is done.
    pub fn select(&self, spec: &BrowserSpec) -> Result<(), ActionError> {
        crate::debug::log_section(&format!("Select browser: {}", spec.label));
        let mut first_error = None;

        if detect_variant(spec).is_none() {
            crate::debug::log(&format!("Installing package {}", spec.package));
            if let Err(source) = self.helper.install(&spec.package) {
                crate::debug::log(&format!("ERROR: install failed: {}", source));
                first_error = Some(ActionError::InstallFailed {
                    package: spec.package.clone(),
                    source,
                });
            }
        }

        // Installation may have produced a different variant than expected
        match detect_variant(spec) {
            Some(variant) if variant.desktop.is_empty() => {
                crate::debug::log(&format!(
                    "{} is installed but has no desktop identifier, not setting default",
                    spec.label
                ));
            }
            Some(variant) => {
                crate::debug::log(&format!("Setting default browser to {}", variant.desktop));
                if let Err(source) = self.helper.set_default(&variant.desktop) {
                    crate::debug::log(&format!("ERROR: setBrowser failed: {}", source));
                    first_error.get_or_insert(ActionError::SetDefaultFailed {
                        desktop: variant.desktop.clone(),
                        source,
                    });
                }
            }
            None => {
                let reported = self.helper.check(&spec.package);
                crate::debug::log(&format!(
                    "No variant of {} detected after install (package check: {:?})",
                    spec.package, reported
                ));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Full select flow for a worker thread: loading on, select, loading off,
    /// refresh. Always ends with a `Refreshed` event.
    pub fn select_and_reconcile<F>(&self, specs: &[BrowserSpec], index: usize, mut notify: F)
    where
        F: FnMut(BrowserEvent),
    {
        let Some(spec) = specs.get(index) else {
            return;
        };

        notify(BrowserEvent::Loading {
            index,
            loading: true,
        });

        if let Err(e) = self.select(spec) {
            crate::debug::log(&format!("Browser action for {} failed: {}", spec.label, e));
        }

        notify(BrowserEvent::Loading {
            index,
            loading: false,
        });
        notify(BrowserEvent::Refreshed(self.refresh(specs)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    /// Helper double: install creates the marker files it was told about
    #[derive(Default)]
    struct FakeHelper {
        default: Mutex<String>,
        installs: Mutex<Vec<(String, Vec<PathBuf>)>>,
        calls: Mutex<Vec<String>>,
        fail_install: bool,
        fail_set_default: bool,
        fail_query: bool,
    }

    impl FakeHelper {
        fn installs_create(self, package: &str, markers: Vec<PathBuf>) -> Self {
            self.installs
                .lock()
                .unwrap()
                .push((package.to_string(), markers));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl BrowserHelper for FakeHelper {
        fn current_default(&self) -> Result<String, HelperError> {
            self.calls.lock().unwrap().push("getBrowser".into());
            if self.fail_query {
                return Err(HelperError::Failed {
                    subcommand: "getBrowser".into(),
                    status: "exit status: 1".into(),
                    stderr: String::new(),
                });
            }
            Ok(self.default.lock().unwrap().clone())
        }

        fn check(&self, package: &str) -> Result<bool, HelperError> {
            self.calls.lock().unwrap().push(format!("check {}", package));
            Ok(false)
        }

        fn install(&self, package: &str) -> Result<(), HelperError> {
            self.calls.lock().unwrap().push(format!("install {}", package));
            if self.fail_install {
                return Err(HelperError::Failed {
                    subcommand: format!("install {}", package),
                    status: "exit status: 1".into(),
                    stderr: "cancelled".into(),
                });
            }
            for (pkg, markers) in self.installs.lock().unwrap().iter() {
                if pkg == package {
                    for marker in markers {
                        std::fs::create_dir_all(marker.parent().unwrap()).unwrap();
                        std::fs::write(marker, b"").unwrap();
                    }
                }
            }
            Ok(())
        }

        fn set_default(&self, desktop: &str) -> Result<(), HelperError> {
            self.calls.lock().unwrap().push(format!("setBrowser {}", desktop));
            if self.fail_set_default {
                return Err(HelperError::Failed {
                    subcommand: format!("setBrowser {}", desktop),
                    status: "exit status: 2".into(),
                    stderr: String::new(),
                });
            }
            *self.default.lock().unwrap() = desktop.to_string();
            Ok(())
        }
    }

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    fn browser(package: &str, variants: &[(&Path, &str)]) -> BrowserSpec {
        BrowserSpec {
            label: package.to_string(),
            package: package.to_string(),
            variants: variants
                .iter()
                .map(|(check, desktop)| Variant {
                    check: check.to_path_buf(),
                    desktop: desktop.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn first_existing_variant_wins() {
        let dir = tempfile::tempdir().unwrap();
        let native = dir.path().join("usr/lib/brave/brave");
        let flatpak = dir.path().join("flatpak/com.brave.Browser");
        touch(&native);
        touch(&flatpak);

        let spec = browser(
            "brave",
            &[
                (&native, "brave.desktop"),
                (&flatpak, "com.brave.Browser.desktop"),
            ],
        );
        let states = reconcile(&[spec], Some("com.brave.Browser.desktop"));

        assert!(states[0].installed);
        assert_eq!(states[0].detected_desktop.as_deref(), Some("brave.desktop"));
        assert!(!states[0].is_default);
    }

    #[test]
    fn later_variant_detected_when_earlier_missing() {
        let dir = tempfile::tempdir().unwrap();
        let flatpak = dir.path().join("flatpak/org.chromium.Chromium");
        touch(&flatpak);

        let spec = browser(
            "chromium",
            &[
                (&dir.path().join("usr/bin/chromium"), "chromium.desktop"),
                (&flatpak, "org.chromium.Chromium.desktop"),
            ],
        );
        let states = reconcile(&[spec], Some("org.chromium.Chromium.desktop"));

        assert!(states[0].installed);
        assert!(states[0].is_default);
    }

    #[test]
    fn not_installed_is_never_default() {
        let dir = tempfile::tempdir().unwrap();
        let spec = browser("vivaldi", &[(&dir.path().join("opt/vivaldi"), "vivaldi.desktop")]);
        let states = reconcile(&[spec], Some("vivaldi.desktop"));

        assert_eq!(states[0], BrowserRuntimeState::default());
    }

    #[test]
    fn empty_check_path_is_skipped() {
        let spec = browser("odd", &[(Path::new(""), "odd.desktop")]);
        assert!(detect_variant(&spec).is_none());
    }

    #[test]
    fn unknown_default_marks_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("firefox");
        touch(&marker);
        let spec = browser("firefox", &[(&marker, "firefox.desktop")]);

        let helper = FakeHelper {
            fail_query: true,
            ..Default::default()
        };
        let states = BrowserManager::new(helper).refresh(&[spec]);
        assert!(states[0].installed);
        assert!(!states[0].is_default);
    }

    #[test]
    fn refresh_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("firefox");
        touch(&marker);
        let specs = vec![
            browser("firefox", &[(&marker, "firefox.desktop")]),
            browser("opera", &[(&dir.path().join("opera"), "opera.desktop")]),
        ];

        let helper = FakeHelper::default();
        *helper.default.lock().unwrap() = "firefox.desktop\n".to_string();
        let manager = BrowserManager::new(helper);

        let first = manager.refresh(&specs);
        let second = manager.refresh(&specs);
        assert_eq!(first, second);
        assert!(first[0].is_default);
    }

    #[test]
    fn select_installs_then_sets_default() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("opt/firefox/firefox");
        let specs = vec![browser("firefox", &[(&marker, "firefox.desktop")])];
        let manager = BrowserManager::new(
            FakeHelper::default().installs_create("firefox", vec![marker.clone()]),
        );

        let before = manager.refresh(&specs);
        assert!(!before[0].installed);
        assert!(!before[0].is_default);

        let mut events = Vec::new();
        manager.select_and_reconcile(&specs, 0, |e| events.push(e));

        assert_eq!(
            events[0],
            BrowserEvent::Loading {
                index: 0,
                loading: true
            }
        );
        assert_eq!(
            events[1],
            BrowserEvent::Loading {
                index: 0,
                loading: false
            }
        );
        let BrowserEvent::Refreshed(after) = &events[2] else {
            panic!("expected refresh last");
        };
        assert!(after[0].installed);
        assert_eq!(after[0].detected_desktop.as_deref(), Some("firefox.desktop"));
        assert!(after[0].is_default);
        assert!(!after[0].loading);

        let calls = manager.helper.calls();
        assert!(calls.contains(&"install firefox".to_string()));
        assert!(calls.contains(&"setBrowser firefox.desktop".to_string()));
    }

    #[test]
    fn installed_browser_skips_install() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("usr/lib/firefox/firefox");
        touch(&marker);
        let spec = browser("firefox", &[(&marker, "firefox.desktop")]);

        let manager = BrowserManager::new(FakeHelper::default());
        manager.select(&spec).unwrap();

        assert_eq!(manager.helper.calls(), vec!["setBrowser firefox.desktop"]);
    }

    #[test]
    fn failed_install_still_reconciles() {
        let dir = tempfile::tempdir().unwrap();
        let specs = vec![browser(
            "librewolf",
            &[(&dir.path().join("librewolf"), "librewolf.desktop")],
        )];
        let manager = BrowserManager::new(FakeHelper {
            fail_install: true,
            ..Default::default()
        });

        assert!(matches!(
            manager.select(&specs[0]),
            Err(ActionError::InstallFailed { .. })
        ));

        let mut events = Vec::new();
        manager.select_and_reconcile(&specs, 0, |e| events.push(e));
        assert!(matches!(
            events.last(),
            Some(BrowserEvent::Refreshed(states)) if !states[0].installed
        ));
        assert!(manager.helper.calls().contains(&"check librewolf".to_string()));
    }

    #[test]
    fn failed_set_default_leaves_browser_installed() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("edge");
        let specs = vec![browser(
            "microsoft-edge-stable-bin",
            &[(&marker, "microsoft-edge.desktop")],
        )];
        let manager = BrowserManager::new(
            FakeHelper {
                fail_set_default: true,
                ..Default::default()
            }
            .installs_create("microsoft-edge-stable-bin", vec![marker.clone()]),
        );

        assert!(matches!(
            manager.select(&specs[0]),
            Err(ActionError::SetDefaultFailed { .. })
        ));
        let states = manager.refresh(&specs);
        assert!(states[0].installed);
        assert!(!states[0].is_default);
    }

    #[test]
    fn out_of_range_index_emits_nothing() {
        let manager = BrowserManager::new(FakeHelper::default());
        let mut events = Vec::new();
        manager.select_and_reconcile(&[], 3, |e| events.push(e));
        assert!(events.is_empty());
    }

    #[test]
    fn variant_without_check_is_not_installed() {
        let yaml = r#"
- title: Browsers
  page_type: browsers
  actions:
    - label: Firefox
      package: firefox
      variants:
        - desktop: firefox.desktop
"#;
        let pages = crate::pages::parse_pages(yaml).unwrap();
        let crate::pages::PageKind::Browsers(specs) = &pages[0].kind else {
            panic!("expected browser page");
        };

        let states = reconcile(specs, Some("firefox.desktop"));
        assert_eq!(states[0], BrowserRuntimeState::default());
    }

    #[test]
    fn detected_variant_without_desktop_skips_set_default() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("usr/bin/falkon");
        touch(&marker);
        let spec = browser("falkon", &[(&marker, "")]);

        let manager = BrowserManager::new(FakeHelper::default());
        manager.select(&spec).unwrap();

        assert!(manager.helper.calls().is_empty());
    }

    /// Executable stand-in for browser.sh
    fn helper_script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("browser.sh");
        std::fs::write(&script, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    const SCRIPT_BODY: &str = r#"case "$1" in
  getBrowser) printf '  firefox.desktop  \n' ;;
  check)
    if [ "$2" = firefox ]; then echo true; else echo "true-ish"; fi ;;
  install) echo "target not found: $2" >&2; exit 3 ;;
  setBrowser) exit 0 ;;
esac
"#;

    #[test]
    fn script_output_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let helper = ScriptHelper::new(helper_script(dir.path(), SCRIPT_BODY));

        assert_eq!(helper.current_default().unwrap(), "firefox.desktop");
        helper.set_default("firefox.desktop").unwrap();
    }

    #[test]
    fn script_check_needs_exact_true() {
        let dir = tempfile::tempdir().unwrap();
        let helper = ScriptHelper::new(helper_script(dir.path(), SCRIPT_BODY));

        assert!(helper.check("firefox").unwrap());
        assert!(!helper.check("chromium").unwrap());
    }

    #[test]
    fn script_nonzero_exit_is_failed() {
        let dir = tempfile::tempdir().unwrap();
        let helper = ScriptHelper::new(helper_script(dir.path(), SCRIPT_BODY));

        match helper.install("brave-bin") {
            Err(HelperError::Failed {
                subcommand, stderr, ..
            }) => {
                assert_eq!(subcommand, "install brave-bin");
                assert_eq!(stderr, "target not found: brave-bin");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn missing_script_is_helper_error() {
        let helper = ScriptHelper::new("/nonexistent/browser.sh");
        assert!(matches!(
            helper.current_default(),
            Err(HelperError::Missing { .. })
        ));
    }
}
