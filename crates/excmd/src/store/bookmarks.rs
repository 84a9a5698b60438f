use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use super::{append_line, clean_field, read_lines, write_lines};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub uri: String,
    pub title: String,
    pub tags: Vec<String>,
}

impl Bookmark {
    fn parse(line: &str) -> Option<Self> {
        let mut fields = line.splitn(3, '\t');
        let uri = fields.next()?.trim();
        if uri.is_empty() {
            return None;
        }
        let title = fields.next().unwrap_or_default().to_string();
        let tags = fields
            .next()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Some(Self {
            uri: uri.to_string(),
            title,
            tags,
        })
    }

    fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}",
            clean_field(&self.uri),
            clean_field(&self.title),
            clean_field(&self.tags.join(" "))
        )
    }
}

#[derive(Debug, Clone)]
pub struct BookmarkStore {
    path: PathBuf,
}

impl BookmarkStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("bookmark"),
        }
    }

    pub fn load(&self) -> Vec<Bookmark> {
        read_lines(&self.path)
            .iter()
            .filter_map(|line| Bookmark::parse(line))
            .collect()
    }

    pub fn add(&self, uri: &str, title: Option<&str>, tags: &str) -> io::Result<()> {
        let bookmark = Bookmark {
            uri: uri.to_string(),
            title: title.unwrap_or_default().to_string(),
            tags: tags.split_whitespace().map(str::to_string).collect(),
        };
        append_line(&self.path, &bookmark.to_line())
    }

    /// Drop every bookmark for `uri`; `Ok(false)` when there was none.
    pub fn remove(&self, uri: &str) -> io::Result<bool> {
        let bookmarks = self.load();
        let kept: Vec<String> = bookmarks
            .iter()
            .filter(|bookmark| bookmark.uri != uri)
            .map(Bookmark::to_line)
            .collect();
        if kept.len() == bookmarks.len() {
            return Ok(false);
        }
        write_lines(&self.path, &kept)?;
        Ok(true)
    }

    /// Bookmarks tagged with every word of `filter`; all of them when empty.
    pub fn by_tags(&self, filter: &str) -> Vec<Bookmark> {
        let wanted: Vec<&str> = filter.split_whitespace().collect();
        self.load()
            .into_iter()
            .filter(|bookmark| {
                wanted
                    .iter()
                    .all(|tag| bookmark.tags.iter().any(|have| have == tag))
            })
            .collect()
    }

    /// Distinct tags starting with `filter`, sorted.
    pub fn tags(&self, filter: &str) -> Vec<String> {
        let tags: BTreeSet<String> = self
            .load()
            .into_iter()
            .flat_map(|bookmark| bookmark.tags)
            .filter(|tag| tag.starts_with(filter))
            .collect();
        tags.into_iter().collect()
    }
}
