//! Configuration loading and merging.
//!
//! Config is loaded from two sources with the local file taking precedence:
//! 1. User-level: `~/.config/excmd/config.toml`
//! 2. Local: `<cwd>/.excmd/config.toml`
//!
//! Besides the TOML config, an rc file of ex commands (default
//! `~/.config/excmd/excmdrc`) is run at startup.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::default_data_dir;


const DEFAULT_HOME_PAGE: &str = "about:blank";
const DEFAULT_SHELL_PROGRAM: &str = "/bin/sh";
const DEFAULT_SHELL_FLAG: &str = "-c";
const DEFAULT_HISTORY_MAX_ITEMS: usize = 500;

#[derive(Debug, Clone)]
pub struct Config {
    pub browser: BrowserConfig,
    pub shell: ShellConfig,
    pub history: HistoryConfig,
    pub completion: CompletionConfig,
    pub files: FilesConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub home_page: String,
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub program: String,
    pub flag: String,
}

#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub max_items: usize,
}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub wrap: bool,
}

#[derive(Debug, Clone)]
pub struct FilesConfig {
    pub data_dir: PathBuf,
    pub rc: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    browser: Option<RawBrowser>,
    shell: Option<RawShell>,
    history: Option<RawHistory>,
    completion: Option<RawCompletion>,
    files: Option<RawFiles>,
    log: Option<RawLog>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBrowser {
    #[serde(alias = "homePage", alias = "home-page")]
    home_page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawShell {
    program: Option<String>,
    flag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHistory {
    #[serde(alias = "maxItems", alias = "max-items")]
    max_items: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCompletion {
    wrap: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFiles {
    #[serde(alias = "dataDir", alias = "data-dir")]
    data_dir: Option<String>,
    rc: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLog {
    level: Option<String>,
}

fn read_toml(path: &Path) -> Option<RawConfig> {
    let contents = fs::read_to_string(path).ok()?;
    if contents.trim().is_empty() {
        return None;
    }
    toml::from_str::<RawConfig>(&contents).ok()
}

/// Pick the local value, then the user value.
fn pick<S, T>(
    local: Option<&RawConfig>,
    user: Option<&RawConfig>,
    section: impl Fn(&RawConfig) -> Option<&S>,
    field: impl Fn(&S) -> Option<T>,
) -> Option<T> {
    local
        .and_then(&section)
        .and_then(&field)
        .or_else(|| user.and_then(&section).and_then(&field))
}

fn merge_config(user: Option<RawConfig>, local: Option<RawConfig>) -> Config {
    let user = user.as_ref();
    let local = local.as_ref();

    let home_page = pick(local, user, |c| c.browser.as_ref(), |b| b.home_page.clone())
        .unwrap_or_else(|| DEFAULT_HOME_PAGE.to_string());
    let program = pick(local, user, |c| c.shell.as_ref(), |s| s.program.clone())
        .unwrap_or_else(|| DEFAULT_SHELL_PROGRAM.to_string());
    let flag = pick(local, user, |c| c.shell.as_ref(), |s| s.flag.clone())
        .unwrap_or_else(|| DEFAULT_SHELL_FLAG.to_string());
    let max_items = pick(local, user, |c| c.history.as_ref(), |h| h.max_items)
        .unwrap_or(DEFAULT_HISTORY_MAX_ITEMS);
    let wrap = pick(local, user, |c| c.completion.as_ref(), |c| c.wrap).unwrap_or(true);
    let data_dir = pick(local, user, |c| c.files.as_ref(), |f| f.data_dir.clone())
        .map(|dir| expand_home(&dir))
        .or_else(default_data_dir)
        .unwrap_or_else(|| PathBuf::from(".excmd"));
    let rc = pick(local, user, |c| c.files.as_ref(), |f| f.rc.clone())
        .map(|rc| expand_home(&rc))
        .or_else(default_rc_path)
        .unwrap_or_else(|| PathBuf::from("excmdrc"));
    let level = pick(local, user, |c| c.log.as_ref(), |l| l.level.clone());

    Config {
        browser: BrowserConfig { home_page },
        shell: ShellConfig { program, flag },
        history: HistoryConfig { max_items },
        completion: CompletionConfig { wrap },
        files: FilesConfig { data_dir, rc },
        log: LogConfig { level },
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn user_config_dir() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("excmd"))
}

pub fn user_config_path() -> Option<PathBuf> {
    Some(user_config_dir()?.join("config.toml"))
}

pub fn local_config_path(cwd: &Path) -> PathBuf {
    cwd.join(".excmd").join("config.toml")
}

fn default_rc_path() -> Option<PathBuf> {
    Some(user_config_dir()?.join("excmdrc"))
}

pub fn load_config(cwd: &Path) -> Config {
    let local_config = read_toml(&local_config_path(cwd));
    let user_config = user_config_path().and_then(|path| read_toml(&path));
    merge_config(user_config, local_config)
}

/// Command lines of the rc file: blank lines and `#` comments are skipped.
/// A missing file has no lines.
pub fn rc_lines(path: &Path) -> Vec<String> {
    let Ok(contents) = fs::read_to_string(path) else {
        return Vec::new();
    };
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
