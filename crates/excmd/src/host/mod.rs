//! Collaborator interfaces used by the command line.
//!
//! The interpreter never touches the page, the stores or the input widget
//! directly. Everything goes through these traits so the front-end (and the
//! tests) can supply their own implementations:
//! - `InputLine`: the editable command line and mode switching
//! - `Notify`: user feedback
//! - `Page`: the current page and its navigation
//! - `Bookmarks`, `Histories`, `Settings`, `Shortcuts`, `Mappings`, `Queue`:
//!   persistent stores
//! - `Shell`: synchronous subprocess execution

/// Severity of a message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
}

/// Where a URI should be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Current,
    NewTab,
}

/// History streams kept by the host.
///
/// Forward and backward searches share one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKind {
    Url,
    Command,
    Search,
}

/// Input mode a key mapping applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapMode {
    Normal,
    Insert,
    Command,
}

/// A completion entry with optional secondary text (e.g. a page title).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub detail: Option<String>,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            detail: None,
        }
    }

    pub fn with_detail(value: impl Into<String>, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            value: value.into(),
            detail: (!detail.is_empty()).then_some(detail),
        }
    }
}

/// Captured result of a subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

pub trait InputLine {
    fn input_text(&self) -> String;
    fn set_input_text(&mut self, text: &str);
    /// Leave command mode after a line was submitted or cancelled.
    fn enter_normal_mode(&mut self);
}

pub trait Notify {
    /// Show a message; `sticky` messages stay until replaced.
    fn echo(&mut self, level: MessageLevel, sticky: bool, message: &str);
}

pub trait Page {
    fn uri(&self) -> Option<String>;
    fn title(&self) -> Option<String>;
    fn load_uri(&mut self, uri: &str, target: Target) -> Result<(), String>;
    fn eval_script(&mut self, script: &str) -> Result<String, String>;
    fn print(&mut self) -> Result<(), String>;
    fn save(&mut self, path: Option<&str>) -> Result<String, String>;
    fn search(&mut self, query: &str, forward: bool, incremental: bool);
    fn quit(&mut self);
}

pub trait Bookmarks {
    fn add_bookmark(&mut self, uri: &str, title: Option<&str>, tags: &str) -> bool;
    fn remove_bookmark(&mut self, uri: &str) -> bool;
    /// Bookmarked URIs carrying every tag in `filter`.
    fn bookmarks_by_tags(&self, filter: &str) -> Vec<Candidate>;
    /// Distinct tags starting with `filter`.
    fn bookmark_tags(&self, filter: &str) -> Vec<String>;
}

pub trait Histories {
    fn add_history(&mut self, kind: HistoryKind, entry: &str, title: Option<&str>);
    /// Entries containing `filter`, newest first.
    fn history_list(&self, kind: HistoryKind, filter: &str) -> Vec<Candidate>;
}

pub trait Settings {
    /// Apply `name` with an optional value; `Ok(Some(_))` carries text to show.
    fn apply_setting(&mut self, name: &str, value: Option<&str>) -> Result<Option<String>, String>;
    fn setting_names(&self, filter: &str) -> Vec<String>;
}

pub trait Shortcuts {
    fn add_shortcut(&mut self, name: &str, uri: &str) -> bool;
    fn remove_shortcut(&mut self, name: &str) -> bool;
    fn set_default_shortcut(&mut self, name: &str) -> bool;
}

pub trait Mappings {
    fn insert_map(&mut self, lhs: &str, rhs: &str, mode: MapMode, remap: bool);
    fn delete_map(&mut self, lhs: &str, mode: MapMode) -> bool;
    /// Feed keys to normal mode, expanding mappings when `remap` is set.
    fn replay_keys(&mut self, keys: &str, remap: bool);
}

#[cfg(feature = "queue")]
pub trait Queue {
    fn queue_push(&mut self, uri: &str) -> bool;
    fn queue_unshift(&mut self, uri: &str) -> bool;
    fn queue_pop(&mut self) -> Option<String>;
    fn queue_clear(&mut self) -> bool;
}

pub trait Shell {
    /// Program and flag used to run a command line, e.g. `["/bin/sh", "-c"]`.
    fn shell_prefix(&self) -> Vec<String>;
    fn run(&mut self, argv: &[String]) -> ShellOutput;
}

/// Everything a command handler may need.
#[cfg(feature = "queue")]
pub trait Host:
    InputLine + Notify + Page + Bookmarks + Histories + Settings + Shortcuts + Mappings + Queue + Shell
{
}

#[cfg(feature = "queue")]
impl<T> Host for T where
    T: InputLine
        + Notify
        + Page
        + Bookmarks
        + Histories
        + Settings
        + Shortcuts
        + Mappings
        + Queue
        + Shell
{
}

/// Everything a command handler may need.
#[cfg(not(feature = "queue"))]
pub trait Host:
    InputLine + Notify + Page + Bookmarks + Histories + Settings + Shortcuts + Mappings + Shell
{
}

#[cfg(not(feature = "queue"))]
impl<T> Host for T where
    T: InputLine + Notify + Page + Bookmarks + Histories + Settings + Shortcuts + Mappings + Shell
{
}
