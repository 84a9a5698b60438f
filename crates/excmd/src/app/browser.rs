//! Headless browser state implementing the host traits.
//!
//! There is no rendering engine: a page is its address, a title derived
//! from the host name, and the tab it lives in. Everything else the command
//! line needs (stores, settings, mappings, shell) hangs off this struct.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::Config;
use crate::host::{
    Bookmarks, Candidate, Histories, HistoryKind, InputLine, MapMode, Mappings, MessageLevel,
    Notify, Page, Settings, Shell, ShellOutput, Shortcuts, Target,
};
use crate::keymap::{parse_keys, Key, KeyMaps};
use crate::shell::run_argv;
#[cfg(feature = "queue")]
use crate::store::QueueStore;
use crate::store::{BookmarkStore, HistoryStore, SettingsTable, ShortcutTable};

use super::state::Mode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub uri: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: MessageLevel,
    pub sticky: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub forward: bool,
    pub matches: usize,
}

/// Keys queued by `:normal`, fed to the key handler after the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub keys: Vec<Key>,
    pub remap: bool,
}

pub struct Browser {
    pub mode: Mode,
    pub input: String,
    pub output: Option<Message>,
    pub tabs: Vec<Tab>,
    pub current: usize,
    /// Text typed in insert mode.
    pub typed: String,
    pub search: Option<SearchState>,
    pub replay: Vec<Replay>,
    pub quit_requested: bool,
    pub maps: KeyMaps,
    pub settings: SettingsTable,
    data_dir: PathBuf,
    shell_program: String,
    shell_flag: String,
    bookmarks: BookmarkStore,
    history: HistoryStore,
    #[cfg(feature = "queue")]
    queue: QueueStore,
    shortcuts: ShortcutTable,
}

impl Browser {
    pub fn new(config: &Config) -> Self {
        let data_dir = config.files.data_dir.clone();
        Self {
            mode: Mode::Normal,
            input: String::new(),
            output: None,
            tabs: Vec::new(),
            current: 0,
            typed: String::new(),
            search: None,
            replay: Vec::new(),
            quit_requested: false,
            maps: KeyMaps::default(),
            settings: SettingsTable::new(&config.browser.home_page),
            shell_program: config.shell.program.clone(),
            shell_flag: config.shell.flag.clone(),
            bookmarks: BookmarkStore::new(&data_dir),
            history: HistoryStore::new(&data_dir, config.history.max_items),
            #[cfg(feature = "queue")]
            queue: QueueStore::new(&data_dir),
            shortcuts: ShortcutTable::default(),
            data_dir,
        }
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.current)
    }

    pub fn home_page(&self) -> String {
        self.settings
            .text("home-page")
            .unwrap_or("about:blank")
            .to_string()
    }

    /// Turn typed text into a loadable address.
    ///
    /// Full URIs and `about:` pages pass through, existing files become
    /// `file://` URIs, text with a space or without a dot goes through the
    /// shortcuts, anything else is taken as a host name.
    pub fn resolve_uri(&self, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return self.home_page();
        }
        if text.contains("://") || text.starts_with("about:") {
            return text.to_string();
        }
        let path = Path::new(text);
        if path.exists() {
            let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            return format!("file://{}", absolute.display());
        }
        if text.contains(' ') || !text.contains('.') {
            if let Some(uri) = self.shortcuts.expand(text) {
                return uri;
            }
        }
        format!("http://{text}")
    }

    pub fn next_tab(&mut self, forward: bool) {
        if self.tabs.is_empty() {
            return;
        }
        let len = self.tabs.len();
        self.current = if forward {
            (self.current + 1) % len
        } else {
            (self.current + len - 1) % len
        };
    }

    /// Close the current tab; the last tab quits.
    pub fn close_tab(&mut self) {
        if self.tabs.len() <= 1 {
            self.quit_requested = true;
            return;
        }
        self.tabs.remove(self.current);
        if self.current >= self.tabs.len() {
            self.current = self.tabs.len() - 1;
        }
    }

    /// Lines shown in the page area.
    pub fn page_lines(&self) -> Vec<String> {
        let Some(tab) = self.current_tab() else {
            return Vec::new();
        };
        let mut lines = vec![tab.uri.clone()];
        if let Some(title) = &tab.title {
            lines.push(title.clone());
        }
        if !self.typed.is_empty() {
            lines.push(String::new());
            lines.push(self.typed.clone());
        }
        lines
    }

    pub fn repeat_search(&mut self, reverse: bool) {
        let Some(search) = self.search.clone() else {
            return;
        };
        self.search(&search.query, search.forward != reverse, false);
    }

    fn save_path(&self, uri: &str) -> PathBuf {
        let name: String = uri
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' { ch } else { '_' })
            .collect();
        self.data_dir.join("downloads").join(name)
    }

    fn report_io(&self, action: &str, result: io::Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!("{action} failed: {err}");
                false
            }
        }
    }
}

fn title_for(uri: &str) -> Option<String> {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let host = rest.split(&['/', '?', '#'][..]).next().unwrap_or_default();
    (!host.is_empty()).then(|| host.to_string())
}

impl InputLine for Browser {
    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn set_input_text(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn enter_normal_mode(&mut self) {
        self.mode = Mode::Normal;
        self.input.clear();
    }
}

impl Notify for Browser {
    fn echo(&mut self, level: MessageLevel, sticky: bool, message: &str) {
        self.output = Some(Message {
            level,
            sticky,
            text: message.to_string(),
        });
    }
}

impl Page for Browser {
    fn uri(&self) -> Option<String> {
        self.current_tab().map(|tab| tab.uri.clone())
    }

    fn title(&self) -> Option<String> {
        self.current_tab().and_then(|tab| tab.title.clone())
    }

    fn load_uri(&mut self, uri: &str, target: Target) -> Result<(), String> {
        let resolved = self.resolve_uri(uri);
        let tab = Tab {
            title: title_for(&resolved),
            uri: resolved.clone(),
        };
        debug!("loading {resolved} into {target:?}");
        match target {
            Target::NewTab => {
                self.tabs.push(tab);
                self.current = self.tabs.len() - 1;
            }
            Target::Current if self.tabs.is_empty() => self.tabs.push(tab),
            Target::Current => self.tabs[self.current] = tab,
        }
        self.search = None;
        if !resolved.starts_with("about:") {
            let title = self.title();
            self.add_history(HistoryKind::Url, &resolved, title.as_deref());
        }
        Ok(())
    }

    fn eval_script(&mut self, _script: &str) -> Result<String, String> {
        Err("No script engine available".to_string())
    }

    fn print(&mut self) -> Result<(), String> {
        Err("Printing is not supported".to_string())
    }

    fn save(&mut self, path: Option<&str>) -> Result<String, String> {
        let uri = self.uri().ok_or_else(|| "No page to save".to_string())?;
        let target = path.map_or_else(|| self.save_path(&uri), PathBuf::from);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| err.to_string())?;
        }
        fs::write(&target, format!("{uri}\n")).map_err(|err| err.to_string())?;
        Ok(target.display().to_string())
    }

    fn search(&mut self, query: &str, forward: bool, incremental: bool) {
        if incremental && !self.settings.bool("incsearch") {
            return;
        }
        let matches = self
            .page_lines()
            .iter()
            .map(|line| line.matches(query).count())
            .sum();
        self.search = (!query.is_empty()).then(|| SearchState {
            query: query.to_string(),
            forward,
            matches,
        });
        if !incremental && !query.is_empty() && matches == 0 {
            self.echo(
                MessageLevel::Error,
                false,
                &format!("Pattern not found: {query}"),
            );
        }
    }

    fn quit(&mut self) {
        self.quit_requested = true;
    }
}

impl Bookmarks for Browser {
    fn add_bookmark(&mut self, uri: &str, title: Option<&str>, tags: &str) -> bool {
        let result = self.bookmarks.add(uri, title, tags);
        self.report_io("bookmark add", result)
    }

    fn remove_bookmark(&mut self, uri: &str) -> bool {
        match self.bookmarks.remove(uri) {
            Ok(removed) => removed,
            Err(err) => {
                warn!("bookmark remove failed: {err}");
                false
            }
        }
    }

    fn bookmarks_by_tags(&self, filter: &str) -> Vec<Candidate> {
        self.bookmarks
            .by_tags(filter)
            .into_iter()
            .map(|bookmark| Candidate::with_detail(bookmark.uri, bookmark.title))
            .collect()
    }

    fn bookmark_tags(&self, filter: &str) -> Vec<String> {
        self.bookmarks.tags(filter)
    }
}

impl Histories for Browser {
    fn add_history(&mut self, kind: HistoryKind, entry: &str, title: Option<&str>) {
        let result = self.history.add(kind, entry, title);
        self.report_io("history add", result);
    }

    fn history_list(&self, kind: HistoryKind, filter: &str) -> Vec<Candidate> {
        self.history
            .list(kind, filter)
            .into_iter()
            .map(|entry| match entry.title {
                Some(title) => Candidate::with_detail(entry.value, title),
                None => Candidate::new(entry.value),
            })
            .collect()
    }
}

impl Settings for Browser {
    fn apply_setting(&mut self, name: &str, value: Option<&str>) -> Result<Option<String>, String> {
        self.settings.apply(name, value)
    }

    fn setting_names(&self, filter: &str) -> Vec<String> {
        self.settings.names(filter)
    }
}

impl Shortcuts for Browser {
    fn add_shortcut(&mut self, name: &str, uri: &str) -> bool {
        self.shortcuts.add(name, uri)
    }

    fn remove_shortcut(&mut self, name: &str) -> bool {
        self.shortcuts.remove(name)
    }

    fn set_default_shortcut(&mut self, name: &str) -> bool {
        self.shortcuts.set_default(name)
    }
}

impl Mappings for Browser {
    fn insert_map(&mut self, lhs: &str, rhs: &str, mode: MapMode, remap: bool) {
        self.maps.insert(lhs, rhs, mode, remap);
    }

    fn delete_map(&mut self, lhs: &str, mode: MapMode) -> bool {
        self.maps.remove(lhs, mode)
    }

    fn replay_keys(&mut self, keys: &str, remap: bool) {
        self.replay.push(Replay {
            keys: parse_keys(keys),
            remap,
        });
    }
}

#[cfg(feature = "queue")]
impl crate::host::Queue for Browser {
    fn queue_push(&mut self, uri: &str) -> bool {
        let result = self.queue.push(uri);
        self.report_io("queue push", result)
    }

    fn queue_unshift(&mut self, uri: &str) -> bool {
        let result = self.queue.unshift(uri);
        self.report_io("queue unshift", result)
    }

    fn queue_pop(&mut self) -> Option<String> {
        match self.queue.pop() {
            Ok(head) => head,
            Err(err) => {
                warn!("queue pop failed: {err}");
                None
            }
        }
    }

    fn queue_clear(&mut self) -> bool {
        let result = self.queue.clear();
        self.report_io("queue clear", result)
    }
}

impl Shell for Browser {
    fn shell_prefix(&self) -> Vec<String> {
        vec![self.shell_program.clone(), self.shell_flag.clone()]
    }

    fn run(&mut self, argv: &[String]) -> ShellOutput {
        run_argv(argv)
    }
}
