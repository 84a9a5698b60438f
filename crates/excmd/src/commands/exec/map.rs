use crate::commands::error::ExError;
use crate::commands::parse::Invocation;
use crate::commands::registry::ExCode;
use crate::host::MapMode;

use super::{require, CommandContext};

fn map_mode(code: ExCode) -> MapMode {
    match code {
        ExCode::Cmap | ExCode::Cnoremap | ExCode::Cunmap => MapMode::Command,
        ExCode::Imap | ExCode::Inoremap | ExCode::Iunmap => MapMode::Insert,
        _ => MapMode::Normal,
    }
}

/// `:{n,i,c}[nore]map {lhs} {rhs}`
pub(super) fn map(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    let lhs = require(inv, &inv.lhs)?;
    let rhs = require(inv, &inv.rhs)?;
    let remap = !matches!(
        inv.command.code,
        ExCode::Cnoremap | ExCode::Inoremap | ExCode::Nnoremap
    );
    ctx.host
        .insert_map(lhs, rhs, map_mode(inv.command.code), remap);
    Ok(())
}

/// `:{n,i,c}unmap {lhs}`
pub(super) fn unmap(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    let lhs = require(inv, &inv.lhs)?;
    let mode = map_mode(inv.command.code);
    if !ctx.host.delete_map(lhs, mode) {
        return Err(ExError::failure(format!("No such mapping: {lhs}")));
    }
    Ok(())
}

/// `:normal[!] {keys}` replays keys in normal mode; `!` skips mappings.
pub(super) fn normal(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    ctx.host.enter_normal_mode();
    ctx.host.replay_keys(&inv.lhs, !inv.bang);
    Ok(())
}
