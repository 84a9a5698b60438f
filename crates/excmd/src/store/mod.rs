//! Persistent and in-memory stores behind the host traits.
//!
//! File-backed stores live in the data directory (default
//! `<data dir>/excmd`), one plain text file per store:
//! - `bookmark`: `URI<TAB>title<TAB>tags`
//! - `history`, `command`, `search`: one entry per line, oldest first
//! - `queue`: one URI per line, head first
//!
//! Settings, shortcuts and key mappings only live for the session and are
//! populated by the rc file.

mod bookmarks;
mod history;
#[cfg(feature = "queue")]
mod queue;
mod settings;
mod shortcuts;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub use bookmarks::BookmarkStore;
pub use history::HistoryStore;
#[cfg(feature = "queue")]
pub use queue::QueueStore;
pub use settings::SettingsTable;
pub use shortcuts::ShortcutTable;

/// Default location for the file-backed stores.
pub fn default_data_dir() -> Option<PathBuf> {
    if let Some(dir) = dirs::data_dir() {
        return Some(dir.join("excmd"));
    }
    let home = dirs::home_dir()?;
    Some(home.join(".local").join("share").join("excmd"))
}

/// Non-empty lines of a store file; a missing file reads as empty.
fn read_lines(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(contents) => contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn write_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut contents = lines.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    fs::write(path, contents)
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

/// Tabs and newlines would break the line format.
fn clean_field(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch == '\t' || ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect()
}
