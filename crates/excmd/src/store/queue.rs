use std::io;
use std::path::{Path, PathBuf};

use super::{append_line, read_lines, write_lines};

/// Read-it-later list of URIs, head first.
#[derive(Debug, Clone)]
pub struct QueueStore {
    path: PathBuf,
}

impl QueueStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("queue"),
        }
    }

    pub fn items(&self) -> Vec<String> {
        read_lines(&self.path)
    }

    pub fn push(&self, uri: &str) -> io::Result<()> {
        append_line(&self.path, uri.trim())
    }

    pub fn unshift(&self, uri: &str) -> io::Result<()> {
        let mut items = self.items();
        items.insert(0, uri.trim().to_string());
        write_lines(&self.path, &items)
    }

    pub fn pop(&self) -> io::Result<Option<String>> {
        let mut items = self.items();
        if items.is_empty() {
            return Ok(None);
        }
        let head = items.remove(0);
        write_lines(&self.path, &items)?;
        Ok(Some(head))
    }

    pub fn clear(&self) -> io::Result<()> {
        write_lines(&self.path, &[])
    }
}
