//! Typed runtime settings changed with `:set`.
//!
//! Supported forms, vim style:
//! - `name`: turn a boolean on
//! - `noname`: turn a boolean off
//! - `name!`: toggle a boolean
//! - `name?`: report the current value
//! - `name=value`: assign, checked against the setting's type

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsTable {
    values: BTreeMap<String, SettingValue>,
}

impl SettingsTable {
    pub fn new(home_page: &str) -> Self {
        let mut values = BTreeMap::new();
        let defaults = [
            ("home-page", SettingValue::Text(home_page.to_string())),
            ("incsearch", SettingValue::Bool(false)),
            ("images", SettingValue::Bool(true)),
            ("scripts", SettingValue::Bool(true)),
            ("scroll-step", SettingValue::Int(40)),
            ("status-bar", SettingValue::Bool(true)),
            ("user-agent", SettingValue::Text(default_user_agent())),
        ];
        for (name, value) in defaults {
            values.insert(name.to_string(), value);
        }
        Self { values }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    pub fn bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(SettingValue::Bool(true)))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(SettingValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Names starting with `filter`, sorted.
    pub fn names(&self, filter: &str) -> Vec<String> {
        self.values
            .keys()
            .filter(|name| name.starts_with(filter))
            .cloned()
            .collect()
    }

    /// Apply one `:set` argument. `Ok(Some(_))` carries text to show.
    pub fn apply(&mut self, name: &str, value: Option<&str>) -> Result<Option<String>, String> {
        if let Some(value) = value {
            return self.assign(name, value).map(|()| None);
        }

        if let Some(base) = name.strip_suffix('?') {
            let current = self.lookup(base)?;
            return Ok(Some(format!("{base}={current}")));
        }
        if let Some(base) = name.strip_suffix('!') {
            let current = self.lookup(base)?;
            let SettingValue::Bool(on) = current else {
                return Err(format!("Can't toggle {base}"));
            };
            let toggled = !*on;
            self.values
                .insert(base.to_string(), SettingValue::Bool(toggled));
            return Ok(None);
        }

        match self.values.get(name) {
            Some(SettingValue::Bool(_)) => {
                self.values.insert(name.to_string(), SettingValue::Bool(true));
                Ok(None)
            }
            Some(_) => Err(format!("Missing value for {name}")),
            None => {
                let base = name
                    .strip_prefix("no")
                    .filter(|base| matches!(self.values.get(*base), Some(SettingValue::Bool(_))))
                    .ok_or_else(|| format!("Unknown setting: {name}"))?;
                self.values
                    .insert(base.to_string(), SettingValue::Bool(false));
                Ok(None)
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<&SettingValue, String> {
        self.values
            .get(name)
            .ok_or_else(|| format!("Unknown setting: {name}"))
    }

    fn assign(&mut self, name: &str, raw: &str) -> Result<(), String> {
        let parsed = match self.lookup(name)? {
            SettingValue::Bool(_) => match raw.trim() {
                "true" | "on" | "1" => SettingValue::Bool(true),
                "false" | "off" | "0" => SettingValue::Bool(false),
                _ => return Err(format!("Invalid value for {name}: {raw}")),
            },
            SettingValue::Int(_) => raw
                .trim()
                .parse()
                .map(SettingValue::Int)
                .map_err(|_| format!("Invalid value for {name}: {raw}"))?,
            SettingValue::Text(_) => SettingValue::Text(raw.to_string()),
        };
        self.values.insert(name.to_string(), parsed);
        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("excmd/{}", env!("CARGO_PKG_VERSION"))
}
