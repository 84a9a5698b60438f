use crate::commands::error::ExError;
use crate::commands::parse::Invocation;
use crate::commands::registry::ExCode;

use super::{require, CommandContext};

/// `:shortcut-add name=uri`, `:shortcut-remove name`, `:shortcut-default name`.
pub(super) fn shortcut(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    let rhs = require(inv, inv.rhs.trim())?;
    match inv.command.code {
        ExCode::ShortcutAdd => {
            let Some((name, uri)) = rhs.split_once('=') else {
                return Err(ExError::MalformedArgument {
                    command: inv.command.name,
                });
            };
            if !ctx.host.add_shortcut(name.trim(), uri.trim()) {
                return Err(ExError::failure(format!("Invalid shortcut: {name}")));
            }
        }
        ExCode::ShortcutRemove => {
            if !ctx.host.remove_shortcut(rhs) {
                return Err(ExError::failure(format!("No shortcut named {rhs}")));
            }
        }
        ExCode::ShortcutDefault => {
            if !ctx.host.set_default_shortcut(rhs) {
                return Err(ExError::failure(format!("No shortcut named {rhs}")));
            }
        }
        _ => unreachable!("not a shortcut command: {}", inv.command.name),
    }
    Ok(())
}
