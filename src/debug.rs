// Centralized debug logging for the welcome assistant
// Logs are written to a temp file and shown in the in-app log panel

use crate::config::AppPaths;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

const LOG_FILE_NAME: &str = "biglinux_welcome_debug.txt";

lazy_static::lazy_static! {
    static ref DEBUG_LOG: Mutex<DebugLog> = Mutex::new(DebugLog::new());
}

pub struct DebugLog {
    path: PathBuf,
    enabled: bool,
}

impl DebugLog {
    fn new() -> Self {
        let path = std::env::temp_dir().join(LOG_FILE_NAME);

        // Clear existing log and write header
        let enabled = match std::fs::File::create(&path) {
            Ok(mut f) => {
                let _ = writeln!(f, "=== BigLinux Welcome Debug Log ===");
                let _ = writeln!(f, "Version: {}", env!("CARGO_PKG_VERSION"));
                let _ = writeln!(f, "Log file: {:?}", path);
                let _ = writeln!(f, "Resource root: {:?}", AppPaths::from_env().root);
                let _ = writeln!(
                    f,
                    "Session: {} / {}",
                    std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default(),
                    std::env::var("XDG_SESSION_TYPE").unwrap_or_default()
                );
                let _ = writeln!(f, "Timestamp: {:?}", std::time::SystemTime::now());
                let _ = writeln!(f, "Platform: {}", std::env::consts::OS);
                let _ = writeln!(f, "Arch: {}", std::env::consts::ARCH);
                let _ = writeln!(f);
                true
            }
            Err(e) => {
                eprintln!("Debug log disabled, cannot create {:?}: {}", path, e);
                false
            }
        };

        Self { path, enabled }
    }
}

/// Log a debug message
pub fn log(message: &str) {
    if let Ok(debug_log) = DEBUG_LOG.lock() {
        if debug_log.enabled {
            if let Ok(mut f) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&debug_log.path)
            {
                let timestamp = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                let _ = writeln!(f, "[{}] {}", timestamp, message);
            }
        }
    }
}

/// Log a section header
pub fn log_section(section: &str) {
    log(&format!("\n=== {} ===", section));
}

/// Get the path to the debug log file
pub fn get_log_path() -> PathBuf {
    if let Ok(debug_log) = DEBUG_LOG.lock() {
        debug_log.path.clone()
    } else {
        std::env::temp_dir().join(LOG_FILE_NAME)
    }
}
