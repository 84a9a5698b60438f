//! Up/Down recall of earlier command lines and searches.

use log::debug;

use super::{Ex, Session};
use crate::commands::ExError;
use crate::host::{Host, HistoryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep {
    Older,
    Newer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySession {
    prefix: char,
    /// Typed query first, then matches from newest to oldest.
    entries: Vec<String>,
    cursor: usize,
}

impl HistorySession {
    pub fn shown(&self) -> String {
        format!("{}{}", self.prefix, self.entries[self.cursor])
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Ex {
    /// Step through the history stream selected by the input's sigil.
    ///
    /// Editing a recalled entry ends the walk, so the next step searches
    /// the history again using the edited text as the filter.
    pub fn step_history(&mut self, step: HistoryStep, host: &mut dyn Host) -> Result<(), ExError> {
        let input = host.input_text();
        if let Session::History(session) = &self.session {
            if session.shown() != input {
                debug!("input diverged from history entry, restarting");
                self.session = Session::Idle;
            }
        }

        if !matches!(self.session, Session::History(_)) {
            // a completion cycle gives way here as well
            self.session = Session::Idle;
            // the sigil must be the first char, as shown() rebuilds it
            let mut chars = input.chars();
            let prefix = chars.next().ok_or(ExError::NoHistoryContext)?;
            let kind = match prefix {
                ':' => HistoryKind::Command,
                '/' | '?' => HistoryKind::Search,
                _ => return Err(ExError::NoHistoryContext),
            };
            let query = chars.as_str();
            let found = host.history_list(kind, query);
            if found.is_empty() {
                return Err(ExError::NoHistoryContext);
            }
            let mut entries = Vec::with_capacity(found.len() + 1);
            entries.push(query.to_string());
            entries.extend(found.into_iter().map(|candidate| candidate.value));
            debug!("history session for {kind:?} with {} entries", entries.len());
            self.session = Session::History(HistorySession {
                prefix,
                entries,
                cursor: 0,
            });
        }

        let Session::History(session) = &mut self.session else {
            return Err(ExError::NoHistoryContext);
        };
        match step {
            HistoryStep::Older if session.cursor + 1 < session.entries.len() => session.cursor += 1,
            HistoryStep::Newer if session.cursor > 0 => session.cursor -= 1,
            _ => {}
        }
        host.set_input_text(&session.shown());
        Ok(())
    }
}
