//! Key notation parsing and per-mode key mappings.
//!
//! Parses vim key notation like "gg", "<C-f>" or ":open<Space>home<CR>"
//! into key sequences, and renders crossterm KeyEvents back to notation.
//!
//! Used by the `:map` family and `:normal` replay.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::host::MapMode;

/// A single key press with the modifiers that matter for mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub ctrl: bool,
    pub alt: bool,
}

impl Key {
    pub fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            ctrl: false,
            alt: false,
        }
    }

    /// The typed character, if no modifier is held.
    pub fn as_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch) if !self.ctrl && !self.alt => Some(ch),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn to_event(self) -> KeyEvent {
        let mut modifiers = KeyModifiers::NONE;
        if self.ctrl {
            modifiers |= KeyModifiers::CONTROL;
        }
        if self.alt {
            modifiers |= KeyModifiers::ALT;
        }
        if self.code == KeyCode::BackTab {
            modifiers |= KeyModifiers::SHIFT;
        }
        KeyEvent::new(self.code, modifiers)
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let code = match event.code {
            KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            code => code,
        };
        Self {
            code,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
        }
    }
}

/// Parse key notation into keys. Unknown `<...>` groups are taken literally.
pub fn parse_keys(notation: &str) -> Vec<Key> {
    let chars: Vec<char> = notation.chars().collect();
    let mut keys = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        if chars[idx] == '<' {
            if let Some(len) = chars[idx + 1..].iter().position(|ch| *ch == '>') {
                let name: String = chars[idx + 1..idx + 1 + len].iter().collect();
                if let Some(key) = parse_named(&name) {
                    keys.push(key);
                    idx += len + 2;
                    continue;
                }
            }
        }
        keys.push(Key::char(chars[idx]));
        idx += 1;
    }
    keys
}

fn parse_named(name: &str) -> Option<Key> {
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "s-tab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "bs" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "lt" => KeyCode::Char('<'),
        _ => return parse_modified(name),
    };
    Some(Key::plain(code))
}

fn parse_modified(name: &str) -> Option<Key> {
    let (modifier, rest) = name.split_once('-')?;
    let mut chars = rest.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match modifier.to_ascii_lowercase().as_str() {
        "c" => Some(Key {
            code: KeyCode::Char(ch.to_ascii_lowercase()),
            ctrl: true,
            alt: false,
        }),
        "a" | "m" => Some(Key {
            code: KeyCode::Char(ch),
            ctrl: false,
            alt: true,
        }),
        _ => None,
    }
}

/// Render a key back to notation, e.g. for showing pending keys.
pub fn key_notation(key: &Key) -> String {
    match key.code {
        KeyCode::Char('<') => "<lt>".to_string(),
        KeyCode::Char(' ') => "<Space>".to_string(),
        KeyCode::Char(ch) if key.ctrl => format!("<C-{ch}>"),
        KeyCode::Char(ch) if key.alt => format!("<A-{ch}>"),
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => "<CR>".to_string(),
        KeyCode::Esc => "<Esc>".to_string(),
        KeyCode::Tab => "<Tab>".to_string(),
        KeyCode::BackTab => "<S-Tab>".to_string(),
        KeyCode::Backspace => "<BS>".to_string(),
        KeyCode::Up => "<Up>".to_string(),
        KeyCode::Down => "<Down>".to_string(),
        KeyCode::Left => "<Left>".to_string(),
        KeyCode::Right => "<Right>".to_string(),
        KeyCode::Home => "<Home>".to_string(),
        KeyCode::End => "<End>".to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub lhs: Vec<Key>,
    pub rhs: Vec<Key>,
    pub remap: bool,
}

/// Result of looking up pending keys.
#[derive(Debug, PartialEq, Eq)]
pub enum MapMatch<'a> {
    None,
    /// Pending keys are a strict prefix of at least one mapping.
    Partial,
    Full(&'a Mapping),
}

#[derive(Debug, Clone, Default)]
pub struct KeyMaps {
    modes: HashMap<MapMode, Vec<Mapping>>,
}

impl KeyMaps {
    /// Add or replace the mapping for `lhs`.
    pub fn insert(&mut self, lhs: &str, rhs: &str, mode: MapMode, remap: bool) {
        let lhs = parse_keys(lhs);
        if lhs.is_empty() {
            return;
        }
        let maps = self.modes.entry(mode).or_default();
        maps.retain(|existing| existing.lhs != lhs);
        maps.push(Mapping {
            lhs,
            rhs: parse_keys(rhs),
            remap,
        });
    }

    pub fn remove(&mut self, lhs: &str, mode: MapMode) -> bool {
        let lhs = parse_keys(lhs);
        let Some(maps) = self.modes.get_mut(&mode) else {
            return false;
        };
        let before = maps.len();
        maps.retain(|existing| existing.lhs != lhs);
        maps.len() != before
    }

    pub fn lookup(&self, mode: MapMode, pending: &[Key]) -> MapMatch<'_> {
        let Some(maps) = self.modes.get(&mode) else {
            return MapMatch::None;
        };
        if let Some(full) = maps.iter().find(|map| map.lhs == pending) {
            return MapMatch::Full(full);
        }
        if maps
            .iter()
            .any(|map| map.lhs.len() > pending.len() && map.lhs.starts_with(pending))
        {
            return MapMatch::Partial;
        }
        MapMatch::None
    }

    #[cfg(test)]
    pub fn len(&self, mode: MapMode) -> usize {
        self.modes.get(&mode).map_or(0, Vec::len)
    }
}
