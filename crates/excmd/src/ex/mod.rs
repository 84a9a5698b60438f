//! The command line interpreter.
//!
//! `Ex` ties the registry, parser and dispatcher together and owns the one
//! interactive session that may be rewriting the input line: either a
//! completion cycle or a history walk. Starting one ends the other, since
//! both write to the same buffer.

mod completion;
mod history;

#[cfg(test)]
mod tests;

use log::{debug, warn};

use crate::commands::{
    dispatch, parse, CommandContext, ExError, InputCursor, Placeholders, Registry,
};
use crate::host::{Host, HistoryKind, MessageLevel};

pub use completion::{CompletionSession, CompletionStep};
pub use history::{HistorySession, HistoryStep};

/// Options the front-end may tune from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExOptions {
    /// Wrap around when cycling past the first or last candidate.
    pub wrap_completion: bool,
}

impl Default for ExOptions {
    fn default() -> Self {
        Self {
            wrap_completion: true,
        }
    }
}

/// The interactive session currently driving the input line.
#[derive(Debug, Default)]
pub enum Session {
    #[default]
    Idle,
    Completion(CompletionSession),
    History(HistorySession),
}

pub struct Ex {
    registry: Registry<'static>,
    options: ExOptions,
    session: Session,
}

impl Ex {
    pub fn new(options: ExOptions) -> Self {
        Self::with_registry(Registry::default(), options)
    }

    pub fn with_registry(registry: Registry<'static>, options: ExOptions) -> Self {
        Self {
            registry,
            options,
            session: Session::Idle,
        }
    }

    #[cfg(test)]
    pub fn registry(&self) -> &Registry<'static> {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Completion session, if one is active.
    pub fn completion(&self) -> Option<&CompletionSession> {
        match &self.session {
            Session::Completion(session) => Some(session),
            _ => None,
        }
    }

    /// Command names starting with `filter`, in registry order.
    pub fn fill_command_names(&self, filter: &str) -> Vec<String> {
        self.registry.fill_command_names(filter)
    }

    /// Parse and run every command of `input`.
    ///
    /// Stops at the first command that fails to parse or whose handler
    /// fails; the error is echoed before it is returned.
    pub fn run_string(&mut self, input: &str, host: &mut dyn Host) -> Result<(), ExError> {
        let mut cursor = InputCursor::new(input);
        loop {
            let placeholders = Placeholders {
                uri: host.uri(),
                home: dirs::home_dir().map(|home| home.to_string_lossy().to_string()),
            };
            let inv = match parse(&mut cursor, &self.registry, &placeholders) {
                Ok(Some(inv)) => inv,
                Ok(None) => return Ok(()),
                Err(err) => return Err(report(host, err)),
            };
            let mut ctx = CommandContext::new(&mut *host);
            if let Err(err) = dispatch(&inv, &mut ctx) {
                warn!(":{} failed: {err}", inv.command.name);
                return Err(report(host, err));
            }
        }
    }

    /// Handle Enter on the input line.
    ///
    /// `:` lines run as commands, `/` and `?` lines start a search. Both are
    /// recorded in their history stream first.
    pub fn submit(&mut self, host: &mut dyn Host) -> Result<(), ExError> {
        self.session = Session::Idle;
        let text = host.input_text();
        let mut chars = text.chars();
        let Some(sigil) = chars.next() else {
            return Ok(());
        };
        let rest = chars.as_str();
        match sigil {
            ':' => {
                host.add_history(HistoryKind::Command, rest, None);
                host.enter_normal_mode();
                self.run_string(rest, host)
            }
            '/' | '?' => {
                host.add_history(HistoryKind::Search, rest, None);
                host.enter_normal_mode();
                host.search(rest, sigil == '/', false);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Called by the front-end after every edit of the input line.
    pub fn input_changed(&mut self, host: &mut dyn Host) {
        let text = host.input_text();
        let mut chars = text.chars();
        if let Some(sigil @ ('/' | '?')) = chars.next() {
            host.search(chars.as_str(), sigil == '/', true);
        }
    }

    /// Abort editing: drop any session and clear the line.
    pub fn cancel(&mut self, host: &mut dyn Host) {
        self.session = Session::Idle;
        host.enter_normal_mode();
        host.set_input_text("");
    }

    /// Leaving command mode ends completion.
    pub fn leave(&mut self) {
        if matches!(self.session, Session::Completion(_)) {
            debug!("completion session ended");
            self.session = Session::Idle;
        }
    }
}

fn report(host: &mut dyn Host, err: ExError) -> ExError {
    debug!("reporting error: {err}");
    host.echo(MessageLevel::Error, false, &err.to_string());
    err
}
