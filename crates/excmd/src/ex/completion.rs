//! Tab completion for the input line.
//!
//! A session remembers what text it last wrote. As long as the input still
//! equals that text, further steps cycle through the candidate list that was
//! fetched when the session started. Any other input starts over.

use log::debug;

use super::{Ex, Session};
use crate::commands::{parse_count, ExCode, ExError, InputCursor};
use crate::host::{Candidate, Host, HistoryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStep {
    Next,
    Prev,
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSession {
    /// Text written before the selected candidate, e.g. `:set ` or `/`.
    prefix: String,
    /// Input as last written by this session.
    current: String,
    /// Count typed before a command name, put back on selection.
    count: u32,
    candidates: Vec<Candidate>,
    selected: usize,
}

impl CompletionSession {
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub fn current(&self) -> &str {
        &self.current
    }

    fn step(&mut self, backward: bool, wrap: bool) {
        let last = self.candidates.len().saturating_sub(1);
        self.selected = match (backward, self.selected) {
            (true, 0) if wrap => last,
            (true, 0) => 0,
            (true, idx) => idx - 1,
            (false, idx) if idx >= last && wrap => 0,
            (false, idx) if idx >= last => last,
            (false, idx) => idx + 1,
        };
    }

    fn compose(&self, value: &str) -> String {
        if self.count > 0 {
            format!("{}{}{}", self.prefix, self.count, value)
        } else {
            format!("{}{}", self.prefix, value)
        }
    }
}

/// Where the cursor of a completion request sits.
struct Context {
    prefix: String,
    count: u32,
    candidates: Vec<Candidate>,
}

impl Ex {
    /// Move through completion candidates, starting a session if needed.
    pub fn complete(&mut self, step: CompletionStep, host: &mut dyn Host) -> Result<(), ExError> {
        if step == CompletionStep::Stop {
            self.leave();
            return Ok(());
        }
        let backward = step == CompletionStep::Prev;
        let input = host.input_text();

        if let Session::Completion(session) = &mut self.session {
            if session.current == input {
                session.step(backward, self.options.wrap_completion);
                let text = session.compose(&session.candidates[session.selected].value);
                session.current = text.clone();
                host.set_input_text(&text);
                return Ok(());
            }
            debug!("input diverged from completion, restarting");
        }
        // either a stale completion or a history walk; both give way
        self.session = Session::Idle;

        let context = self.completion_context(&input, host)?;
        if context.candidates.is_empty() {
            return Err(ExError::NoCompletionContext);
        }
        debug!(
            "completion started with {} candidates after {:?}",
            context.candidates.len(),
            context.prefix
        );
        let selected = if backward {
            context.candidates.len() - 1
        } else {
            0
        };
        let mut session = CompletionSession {
            prefix: context.prefix,
            current: String::new(),
            count: context.count,
            candidates: context.candidates,
            selected,
        };
        let text = session.compose(&session.candidates[selected].value);
        session.current = text.clone();
        host.set_input_text(&text);
        self.session = Session::Completion(session);
        Ok(())
    }

    /// Write the candidate chosen by the presentation layer to the input.
    pub fn select(&mut self, value: &str, host: &mut dyn Host) -> Result<(), ExError> {
        let Session::Completion(session) = &mut self.session else {
            return Err(ExError::NoCompletionContext);
        };
        if let Some(idx) = session.candidates.iter().position(|c| c.value == value) {
            session.selected = idx;
        }
        session.current = session.compose(value);
        host.set_input_text(&session.current);
        Ok(())
    }

    fn completion_context(&self, input: &str, host: &dyn Host) -> Result<Context, ExError> {
        let mut cursor = InputCursor::new(input);
        match cursor.advance() {
            Some(':') => {}
            Some('/' | '?') => {
                let mut candidates = host.history_list(HistoryKind::Search, &cursor.rest());
                sort_by_value(&mut candidates);
                return Ok(Context {
                    prefix: cursor.slice(0, 1),
                    count: 0,
                    candidates,
                });
            }
            _ => return Err(ExError::NoCompletionContext),
        }

        cursor.skip_spaces();
        let count = parse_count(&mut cursor);
        let name_start = cursor.pos();

        if let Ok(command) = self.registry.resolve(&mut cursor) {
            if cursor.peek() == Some(' ') {
                let prefix = cursor.slice(0, cursor.pos() + 1);
                cursor.skip_spaces();
                let arg = cursor.rest();
                let candidates = match command.code {
                    ExCode::Open | ExCode::TabOpen => match arg.strip_prefix('!') {
                        Some(tags) => host.bookmarks_by_tags(tags),
                        None => host.history_list(HistoryKind::Url, &arg),
                    },
                    ExCode::Set => {
                        let mut names = host.setting_names(&arg);
                        names.sort();
                        names.into_iter().map(Candidate::new).collect()
                    }
                    ExCode::BookmarkAdd => {
                        let mut tags = host.bookmark_tags(&arg);
                        tags.sort();
                        tags.into_iter().map(Candidate::new).collect()
                    }
                    _ => return Err(ExError::NoCompletionContext),
                };
                return Ok(Context {
                    prefix,
                    count: 0,
                    candidates,
                });
            }
        }

        cursor.rewind(name_start);
        let candidates = self
            .registry
            .fill_command_names(&cursor.rest())
            .into_iter()
            .map(Candidate::new)
            .collect();
        Ok(Context {
            prefix: ":".to_string(),
            count,
            candidates,
        })
    }
}

fn sort_by_value(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| a.value.cmp(&b.value));
}
