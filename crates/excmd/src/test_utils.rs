#[cfg(test)]
use std::cell::Cell;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::env;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(test)]
use std::path::Path;

#[cfg(test)]
use crate::config::{
    BrowserConfig, CompletionConfig, Config, FilesConfig, HistoryConfig, LogConfig, ShellConfig,
};
#[cfg(test)]
use crate::host::{
    Bookmarks, Candidate, Histories, HistoryKind, InputLine, MapMode, Mappings, MessageLevel,
    Notify, Page, Settings, Shell, ShellOutput, Shortcuts, Target,
};

#[cfg(test)]
pub fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
pub struct EnvVarGuard {
    key: &'static str,
    original: Option<String>,
}

#[cfg(test)]
impl EnvVarGuard {
    pub fn set(key: &'static str, value: String) -> Self {
        let original = env::var(key).ok();
        env::set_var(key, value);
        Self { key, original }
    }

    pub fn unset(key: &'static str) -> Self {
        let original = env::var(key).ok();
        env::remove_var(key);
        Self { key, original }
    }
}

#[cfg(test)]
impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(value) = &self.original {
            env::set_var(self.key, value);
        } else {
            env::remove_var(self.key);
        }
    }
}

/// Config rooted in `dir`, independent of the user's files.
#[cfg(test)]
pub fn test_config(dir: &Path) -> Config {
    Config {
        browser: BrowserConfig {
            home_page: "about:home".to_string(),
        },
        shell: ShellConfig {
            program: "/bin/sh".to_string(),
            flag: "-c".to_string(),
        },
        history: HistoryConfig { max_items: 50 },
        completion: CompletionConfig { wrap: true },
        files: FilesConfig {
            data_dir: dir.join("data"),
            rc: dir.join("excmdrc"),
        },
        log: LogConfig { level: None },
    }
}

/// In-memory host that records every call made by the interpreter.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FakeHost {
    pub input: String,
    pub normal_mode_entered: usize,
    pub messages: Vec<(MessageLevel, String)>,
    pub uri: Option<String>,
    pub title: Option<String>,
    pub loaded: Vec<(String, Target)>,
    pub load_error: Option<String>,
    pub script_result: Option<Result<String, String>>,
    pub saved: Vec<Option<String>>,
    pub searches: Vec<(String, bool, bool)>,
    pub quit: bool,
    pub bookmarks: Vec<(String, Option<String>, String)>,
    pub tags: Vec<String>,
    pub history: HashMap<HistoryKind, Vec<String>>,
    pub history_added: Vec<(HistoryKind, String)>,
    pub history_fetches: Cell<usize>,
    pub settings_applied: Vec<(String, Option<String>)>,
    pub setting_names: Vec<String>,
    pub shortcuts: HashMap<String, String>,
    pub default_shortcut: Option<String>,
    pub maps: Vec<(String, String, MapMode, bool)>,
    pub replayed: Vec<(String, bool)>,
    pub queue: Vec<String>,
    pub shell_calls: Vec<Vec<String>>,
    pub shell_output: Option<ShellOutput>,
}

#[cfg(test)]
impl FakeHost {
    pub fn with_input(input: &str) -> Self {
        Self {
            input: input.to_string(),
            ..Self::default()
        }
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(level, _)| *level == MessageLevel::Error)
            .map(|(_, message)| message.as_str())
            .collect()
    }
}

#[cfg(test)]
impl InputLine for FakeHost {
    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn set_input_text(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn enter_normal_mode(&mut self) {
        self.normal_mode_entered += 1;
    }
}

#[cfg(test)]
impl Notify for FakeHost {
    fn echo(&mut self, level: MessageLevel, _sticky: bool, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}

#[cfg(test)]
impl Page for FakeHost {
    fn uri(&self) -> Option<String> {
        self.uri.clone()
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn load_uri(&mut self, uri: &str, target: Target) -> Result<(), String> {
        if let Some(err) = &self.load_error {
            return Err(err.clone());
        }
        self.loaded.push((uri.to_string(), target));
        self.uri = Some(uri.to_string());
        Ok(())
    }

    fn eval_script(&mut self, _script: &str) -> Result<String, String> {
        self.script_result
            .clone()
            .unwrap_or_else(|| Err("no script engine".to_string()))
    }

    fn print(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn save(&mut self, path: Option<&str>) -> Result<String, String> {
        self.saved.push(path.map(str::to_string));
        Ok(path.unwrap_or("download").to_string())
    }

    fn search(&mut self, query: &str, forward: bool, incremental: bool) {
        self.searches.push((query.to_string(), forward, incremental));
    }

    fn quit(&mut self) {
        self.quit = true;
    }
}

#[cfg(test)]
impl Bookmarks for FakeHost {
    fn add_bookmark(&mut self, uri: &str, title: Option<&str>, tags: &str) -> bool {
        self.bookmarks
            .push((uri.to_string(), title.map(str::to_string), tags.to_string()));
        true
    }

    fn remove_bookmark(&mut self, uri: &str) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|(existing, _, _)| existing != uri);
        self.bookmarks.len() != before
    }

    fn bookmarks_by_tags(&self, filter: &str) -> Vec<Candidate> {
        self.bookmarks
            .iter()
            .filter(|(_, _, tags)| filter.is_empty() || tags.split(' ').any(|tag| tag == filter))
            .map(|(uri, _, _)| Candidate::new(uri.clone()))
            .collect()
    }

    fn bookmark_tags(&self, filter: &str) -> Vec<String> {
        self.tags
            .iter()
            .filter(|tag| tag.starts_with(filter))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
impl Histories for FakeHost {
    fn add_history(&mut self, kind: HistoryKind, entry: &str, _title: Option<&str>) {
        self.history_added.push((kind, entry.to_string()));
    }

    fn history_list(&self, kind: HistoryKind, filter: &str) -> Vec<Candidate> {
        self.history_fetches.set(self.history_fetches.get() + 1);
        self.history
            .get(&kind)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.contains(filter))
                    .map(|entry| Candidate::new(entry.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Settings for FakeHost {
    fn apply_setting(&mut self, name: &str, value: Option<&str>) -> Result<Option<String>, String> {
        if !self.setting_names.is_empty() && !self.setting_names.iter().any(|known| known == name) {
            return Err(format!("Unknown setting: {name}"));
        }
        self.settings_applied
            .push((name.to_string(), value.map(str::to_string)));
        Ok(None)
    }

    fn setting_names(&self, filter: &str) -> Vec<String> {
        self.setting_names
            .iter()
            .filter(|name| name.starts_with(filter))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
impl Shortcuts for FakeHost {
    fn add_shortcut(&mut self, name: &str, uri: &str) -> bool {
        self.shortcuts.insert(name.to_string(), uri.to_string());
        true
    }

    fn remove_shortcut(&mut self, name: &str) -> bool {
        self.shortcuts.remove(name).is_some()
    }

    fn set_default_shortcut(&mut self, name: &str) -> bool {
        if !self.shortcuts.contains_key(name) {
            return false;
        }
        self.default_shortcut = Some(name.to_string());
        true
    }
}

#[cfg(test)]
impl Mappings for FakeHost {
    fn insert_map(&mut self, lhs: &str, rhs: &str, mode: MapMode, remap: bool) {
        self.maps
            .push((lhs.to_string(), rhs.to_string(), mode, remap));
    }

    fn delete_map(&mut self, lhs: &str, mode: MapMode) -> bool {
        let before = self.maps.len();
        self.maps
            .retain(|(existing, _, existing_mode, _)| !(existing == lhs && *existing_mode == mode));
        self.maps.len() != before
    }

    fn replay_keys(&mut self, keys: &str, remap: bool) {
        self.replayed.push((keys.to_string(), remap));
    }
}

#[cfg(all(test, feature = "queue"))]
impl crate::host::Queue for FakeHost {
    fn queue_push(&mut self, uri: &str) -> bool {
        self.queue.push(uri.to_string());
        true
    }

    fn queue_unshift(&mut self, uri: &str) -> bool {
        self.queue.insert(0, uri.to_string());
        true
    }

    fn queue_pop(&mut self) -> Option<String> {
        if self.queue.is_empty() {
            return None;
        }
        Some(self.queue.remove(0))
    }

    fn queue_clear(&mut self) -> bool {
        self.queue.clear();
        true
    }
}

#[cfg(test)]
impl Shell for FakeHost {
    fn shell_prefix(&self) -> Vec<String> {
        vec!["/bin/sh".to_string(), "-c".to_string()]
    }

    fn run(&mut self, argv: &[String]) -> ShellOutput {
        self.shell_calls.push(argv.to_vec());
        self.shell_output.clone().unwrap_or(ShellOutput {
            status: 0,
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}
