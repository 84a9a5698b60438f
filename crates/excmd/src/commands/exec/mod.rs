//! Command execution handlers.
//!
//! Every registry code maps to one handler. Handlers receive the parsed
//! invocation plus the host, and either succeed (optionally echoing a
//! message) or return an [`ExError`] for the caller to report.

mod bookmark;
mod map;
mod page;
#[cfg(feature = "queue")]
mod queue;
mod set;
mod shell;
mod shortcut;


use log::debug;

use super::error::ExError;
use super::parse::Invocation;
use super::registry::ExCode;
use crate::host::Host;

/// Context provided to command handlers.
pub struct CommandContext<'h> {
    pub host: &'h mut dyn Host,
}

impl<'h> CommandContext<'h> {
    pub fn new(host: &'h mut dyn Host) -> Self {
        Self { host }
    }
}

/// Run the handler bound to the invocation's command.
pub fn dispatch(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    debug!(
        "dispatch :{} count={} bang={} lhs={:?} rhs={:?}",
        inv.command.name, inv.count, inv.bang, inv.lhs, inv.rhs
    );
    match inv.command.code {
        ExCode::BookmarkAdd => bookmark::bookmark_add(inv, ctx),
        ExCode::BookmarkRemove => bookmark::bookmark_remove(inv, ctx),
        ExCode::Eval => page::eval(inv, ctx),
        ExCode::Hardcopy => page::hardcopy(ctx),
        ExCode::Cmap
        | ExCode::Cnoremap
        | ExCode::Imap
        | ExCode::Inoremap
        | ExCode::Nmap
        | ExCode::Nnoremap => map::map(inv, ctx),
        ExCode::Cunmap | ExCode::Iunmap | ExCode::Nunmap => map::unmap(inv, ctx),
        ExCode::Normal => map::normal(inv, ctx),
        ExCode::Open | ExCode::TabOpen => page::open(inv, ctx),
        #[cfg(feature = "queue")]
        ExCode::QueueClear | ExCode::QueuePop | ExCode::QueuePush | ExCode::QueueUnshift => {
            queue::queue(inv, ctx)
        }
        ExCode::Quit => page::quit(ctx),
        ExCode::Save => page::save(inv, ctx),
        ExCode::Set => set::set(inv, ctx),
        ExCode::ShellCmd => shell::shellcmd(inv, ctx),
        ExCode::ShortcutAdd | ExCode::ShortcutDefault | ExCode::ShortcutRemove => {
            shortcut::shortcut(inv, ctx)
        }
    }
}

/// Fail with [`ExError::MalformedArgument`] when `value` is empty.
fn require<'v>(inv: &Invocation<'_>, value: &'v str) -> Result<&'v str, ExError> {
    if value.is_empty() {
        return Err(ExError::MalformedArgument {
            command: inv.command.name,
        });
    }
    Ok(value)
}
