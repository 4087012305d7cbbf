// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

use crate::config::AppPaths;
use crate::pages::{ActionSpec, ActionType};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to launch '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },
    #[error("failed to open '{uri}': {reason}")]
    HandlerFailed { uri: String, reason: String },
}

/// Platform primitives used to carry out an action.
///
/// Both calls are fire-and-forget: they return once the process is started,
/// not when it finishes.
pub trait Launcher {
    fn spawn_detached(&self, argv: &[String]) -> std::io::Result<()>;
    fn open_uri(&self, uri: &str) -> std::io::Result<()>;
}

/// Spawns real processes and opens URIs through xdg-open
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn spawn_detached(&self, argv: &[String]) -> std::io::Result<()> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command")
        })?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // Reap the child so it does not linger as a zombie
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }

    fn open_uri(&self, uri: &str) -> std::io::Result<()> {
        self.spawn_detached(&["xdg-open".to_string(), uri.to_string()])
    }
}

/// Carries out the action bound to a card
pub struct ActionDispatcher<L: Launcher> {
    paths: AppPaths,
    launcher: L,
}

impl ActionDispatcher<SystemLauncher> {
    pub fn system(paths: AppPaths) -> Self {
        Self::new(paths, SystemLauncher)
    }
}

impl<L: Launcher> ActionDispatcher<L> {
    pub fn new(paths: AppPaths, launcher: L) -> Self {
        Self { paths, launcher }
    }

    pub fn dispatch(&self, action: &ActionSpec) -> Result<(), DispatchError> {
        crate::debug::log(&format!(
            "Action triggered: type={:?}, command='{}'",
            action.action_type, action.command
        ));

        match action.action_type {
            ActionType::App => self.spawn(&action.command),
            ActionType::Script => {
                let script = self.paths.resolve(&action.command);
                self.spawn(&script.to_string_lossy())
            }
            ActionType::Url => {
                self.launcher
                    .open_uri(&action.command)
                    .map_err(|e| DispatchError::HandlerFailed {
                        uri: action.command.clone(),
                        reason: e.to_string(),
                    })
            }
            ActionType::Image => Ok(()),
        }
    }

    fn spawn(&self, command: &str) -> Result<(), DispatchError> {
        let spawn_failed = |reason: String| DispatchError::SpawnFailed {
            command: command.to_string(),
            reason,
        };

        let argv = shell_words::split(command).map_err(|e| spawn_failed(e.to_string()))?;
        if argv.is_empty() {
            return Err(spawn_failed("empty command".to_string()));
        }

        self.launcher
            .spawn_detached(&argv)
            .map_err(|e| spawn_failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLauncher {
        spawned: RefCell<Vec<Vec<String>>>,
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Launcher for RecordingLauncher {
        fn spawn_detached(&self, argv: &[String]) -> std::io::Result<()> {
            if self.fail {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such file",
                ));
            }
            self.spawned.borrow_mut().push(argv.to_vec());
            Ok(())
        }

        fn open_uri(&self, uri: &str) -> std::io::Result<()> {
            if self.fail {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no handler",
                ));
            }
            self.opened.borrow_mut().push(uri.to_string());
            Ok(())
        }
    }

    fn action(action_type: ActionType, command: &str) -> ActionSpec {
        ActionSpec {
            label: "test".to_string(),
            icon: String::new(),
            action_type,
            command: command.to_string(),
        }
    }

    fn dispatcher(launcher: RecordingLauncher) -> ActionDispatcher<RecordingLauncher> {
        ActionDispatcher::new(AppPaths::new("/usr/share/biglinux/welcome"), launcher)
    }

    #[test]
    fn url_opens_once_without_spawning() {
        let d = dispatcher(RecordingLauncher::default());
        d.dispatch(&action(ActionType::Url, "https://example.com"))
            .unwrap();

        assert_eq!(
            *d.launcher.opened.borrow(),
            vec!["https://example.com".to_string()]
        );
        assert!(d.launcher.spawned.borrow().is_empty());
    }

    #[test]
    fn app_command_is_tokenized() {
        let d = dispatcher(RecordingLauncher::default());
        d.dispatch(&action(ActionType::App, "kcmshell6 'kcm_style' --args \"a b\""))
            .unwrap();

        assert_eq!(
            d.launcher.spawned.borrow()[0],
            vec!["kcmshell6", "kcm_style", "--args", "a b"]
        );
    }

    #[test]
    fn unterminated_quote_is_spawn_failure() {
        let d = dispatcher(RecordingLauncher::default());
        let err = d
            .dispatch(&action(ActionType::App, "bad command \"unterminated}"))
            .unwrap_err();

        assert!(matches!(err, DispatchError::SpawnFailed { .. }));
        assert!(d.launcher.spawned.borrow().is_empty());
    }

    #[test]
    fn empty_app_command_is_spawn_failure() {
        let d = dispatcher(RecordingLauncher::default());
        let err = d.dispatch(&action(ActionType::App, "   ")).unwrap_err();
        assert!(matches!(err, DispatchError::SpawnFailed { .. }));
    }

    #[test]
    fn script_resolves_against_app_root() {
        let d = dispatcher(RecordingLauncher::default());
        d.dispatch(&action(ActionType::Script, "scripts/theme.sh --dark"))
            .unwrap();

        assert_eq!(
            d.launcher.spawned.borrow()[0],
            vec!["/usr/share/biglinux/welcome/scripts/theme.sh", "--dark"]
        );
    }

    #[test]
    fn image_does_nothing() {
        let d = dispatcher(RecordingLauncher::default());
        d.dispatch(&action(ActionType::Image, "")).unwrap();
        assert!(d.launcher.spawned.borrow().is_empty());
        assert!(d.launcher.opened.borrow().is_empty());
    }

    #[test]
    fn launcher_failures_map_to_error_kinds() {
        let d = dispatcher(RecordingLauncher {
            fail: true,
            ..Default::default()
        });

        assert!(matches!(
            d.dispatch(&action(ActionType::Url, "https://example.com")),
            Err(DispatchError::HandlerFailed { .. })
        ));
        assert!(matches!(
            d.dispatch(&action(ActionType::App, "missing-program")),
            Err(DispatchError::SpawnFailed { .. })
        ));
    }

    #[test]
    fn system_launcher_reports_missing_program() {
        let argv = vec!["/nonexistent/biglinux-welcome-test-binary".to_string()];
        assert!(SystemLauncher.spawn_detached(&argv).is_err());
    }
}
