//! Search shortcuts: named URI templates where `$0` takes the query.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ShortcutTable {
    entries: BTreeMap<String, String>,
    default: Option<String>,
}

impl ShortcutTable {
    pub fn add(&mut self, name: &str, uri: &str) -> bool {
        if name.is_empty() || uri.is_empty() || name.contains(' ') {
            return false;
        }
        self.entries.insert(name.to_string(), uri.to_string());
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        if self.entries.remove(name).is_none() {
            return false;
        }
        if self.default.as_deref() == Some(name) {
            self.default = None;
        }
        true
    }

    pub fn set_default(&mut self, name: &str) -> bool {
        if !self.entries.contains_key(name) {
            return false;
        }
        self.default = Some(name.to_string());
        true
    }

    /// Build a URI from `text`.
    ///
    /// A leading word naming a shortcut selects it and the rest becomes the
    /// query; otherwise the default shortcut gets the whole text.
    pub fn expand(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if let Some((name, query)) = text.split_once(' ') {
            if let Some(template) = self.entries.get(name) {
                return Some(fill_template(template, query.trim()));
            }
        }
        let template = self.entries.get(self.default.as_deref()?)?;
        Some(fill_template(template, text))
    }
}

fn fill_template(template: &str, query: &str) -> String {
    template.replace("$0", &encode_query(query))
}

/// Percent-encode everything but unreserved characters; spaces become `+`.
fn encode_query(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for byte in query.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
