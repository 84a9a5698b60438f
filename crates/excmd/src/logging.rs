//! File logger behind the `log` facade.
//!
//! The TUI owns the terminal, so log records go to
//! `<state dir>/excmd/excmd.log` instead of stderr. The level comes from
//! config and can be overridden with `EXCMD_LOG`.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

const LEVEL_ENV: &str = "EXCMD_LOG";

struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{secs} {:<5} {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

pub fn log_path() -> Option<PathBuf> {
    let base = match dirs::state_dir() {
        Some(dir) => dir,
        None => dirs::home_dir()?.join(".local").join("state"),
    };
    Some(base.join("excmd").join("excmd.log"))
}

/// Resolve the effective level: `EXCMD_LOG` wins over the configured one.
/// Unparseable values fall back to `warn`.
pub fn resolve_level(configured: Option<&str>) -> LevelFilter {
    let from_env = std::env::var(LEVEL_ENV).ok();
    from_env
        .as_deref()
        .or(configured)
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Install the file logger. Logging stays off when the file cannot be opened.
pub fn init(configured: Option<&str>) {
    let level = resolve_level(configured);
    if level == LevelFilter::Off {
        return;
    }
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let logger = FileLogger {
        level,
        file: Mutex::new(file),
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}
