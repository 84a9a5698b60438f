use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use super::{clean_field, read_lines, write_lines};
use crate::host::HistoryKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub value: String,
    pub title: Option<String>,
}

impl HistoryEntry {
    fn parse(line: &str) -> Self {
        match line.split_once('\t') {
            Some((value, title)) => Self {
                value: value.to_string(),
                title: (!title.is_empty()).then(|| title.to_string()),
            },
            None => Self {
                value: line.to_string(),
                title: None,
            },
        }
    }

    fn to_line(&self) -> String {
        match &self.title {
            Some(title) => format!("{}\t{}", clean_field(&self.value), clean_field(title)),
            None => clean_field(&self.value),
        }
    }
}

/// Bounded histories, one file per kind, oldest entry first on disk.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
    max_items: usize,
}

impl HistoryStore {
    pub fn new(data_dir: &Path, max_items: usize) -> Self {
        Self {
            dir: data_dir.to_path_buf(),
            max_items,
        }
    }

    fn path(&self, kind: HistoryKind) -> PathBuf {
        let name = match kind {
            HistoryKind::Url => "history",
            HistoryKind::Command => "command",
            HistoryKind::Search => "search",
        };
        self.dir.join(name)
    }

    /// Record `value` as the newest entry, dropping an older duplicate.
    pub fn add(&self, kind: HistoryKind, value: &str, title: Option<&str>) -> io::Result<()> {
        if value.trim().is_empty() || self.max_items == 0 {
            return Ok(());
        }
        let path = self.path(kind);
        // stored values have their separators cleaned
        let stored = clean_field(value);
        let mut lines: Vec<String> = read_lines(&path)
            .into_iter()
            .filter(|line| HistoryEntry::parse(line).value != stored)
            .collect();
        let entry = HistoryEntry {
            value: value.to_string(),
            title: title.filter(|title| !title.is_empty()).map(str::to_string),
        };
        lines.push(entry.to_line());
        if lines.len() > self.max_items {
            let excess = lines.len() - self.max_items;
            debug!("dropping {excess} old {kind:?} history entries");
            lines.drain(..excess);
        }
        write_lines(&path, &lines)
    }

    /// Entries whose value or title contains `filter`, newest first.
    pub fn list(&self, kind: HistoryKind, filter: &str) -> Vec<HistoryEntry> {
        read_lines(&self.path(kind))
            .iter()
            .rev()
            .map(|line| HistoryEntry::parse(line))
            .filter(|entry| {
                filter.is_empty()
                    || entry.value.contains(filter)
                    || entry
                        .title
                        .as_deref()
                        .is_some_and(|title| title.contains(filter))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::HistoryStore;
    use crate::host::HistoryKind;
    use tempfile::TempDir;

    fn values(store: &HistoryStore, kind: HistoryKind, filter: &str) -> Vec<String> {
        store
            .list(kind, filter)
            .into_iter()
            .map(|entry| entry.value)
            .collect()
    }

    #[test]
    fn newest_first_and_deduplicated() {
        let dir = TempDir::new().expect("temp dir");
        let store = HistoryStore::new(dir.path(), 10);
        for entry in ["open a", "set b", "open a"] {
            store.add(HistoryKind::Command, entry, None).expect("add");
        }
        assert_eq!(
            values(&store, HistoryKind::Command, ""),
            vec!["open a", "set b"]
        );
        assert_eq!(values(&store, HistoryKind::Command, "set"), vec!["set b"]);
        assert!(values(&store, HistoryKind::Search, "").is_empty());
    }

    #[test]
    fn entries_with_tabs_are_deduplicated() {
        let dir = TempDir::new().expect("temp dir");
        let store = HistoryStore::new(dir.path(), 10);
        for entry in ["shellcmd printf 'a\tb'", "set x", "shellcmd printf 'a\tb'"] {
            store.add(HistoryKind::Command, entry, None).expect("add");
        }
        assert_eq!(
            values(&store, HistoryKind::Command, ""),
            vec!["shellcmd printf 'a b'", "set x"]
        );
    }

    #[test]
    fn truncates_to_max_items() {
        let dir = TempDir::new().expect("temp dir");
        let store = HistoryStore::new(dir.path(), 2);
        for entry in ["one", "two", "three"] {
            store.add(HistoryKind::Search, entry, None).expect("add");
        }
        assert_eq!(
            values(&store, HistoryKind::Search, ""),
            vec!["three", "two"]
        );
    }

    #[test]
    fn url_history_matches_titles() {
        let dir = TempDir::new().expect("temp dir");
        let store = HistoryStore::new(dir.path(), 10);
        store
            .add(HistoryKind::Url, "https://lwn.net/", Some("Linux news"))
            .expect("add");
        store
            .add(HistoryKind::Url, "https://crates.io/", None)
            .expect("add");

        let found = store.list(HistoryKind::Url, "news");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title.as_deref(), Some("Linux news"));
    }

    #[test]
    fn blank_entries_are_ignored() {
        let dir = TempDir::new().expect("temp dir");
        let store = HistoryStore::new(dir.path(), 10);
        store.add(HistoryKind::Command, "  ", None).expect("add");
        assert!(values(&store, HistoryKind::Command, "").is_empty());
    }
}
