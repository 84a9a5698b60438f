use crate::commands::error::ExError;
use crate::commands::parse::Invocation;
use crate::commands::registry::ExCode;
use crate::host::{MessageLevel, Target};

use super::{require, CommandContext};

/// `:open` and `:tabopen`.
pub(super) fn open(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    let target = if inv.command.code == ExCode::TabOpen {
        Target::NewTab
    } else {
        Target::Current
    };
    ctx.host
        .load_uri(&inv.rhs, target)
        .map_err(ExError::failure)
}

/// `:eval {script}` shows the script result.
pub(super) fn eval(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    let script = require(inv, &inv.rhs)?;
    let value = ctx.host.eval_script(script).map_err(ExError::failure)?;
    ctx.host.echo(MessageLevel::Normal, true, &value);
    Ok(())
}

pub(super) fn hardcopy(ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    ctx.host.print().map_err(ExError::failure)
}

/// `:save [path]` saves the current page, to `path` when given.
pub(super) fn save(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    ctx.host.enter_normal_mode();
    let path = (!inv.rhs.is_empty()).then_some(inv.rhs.as_str());
    let saved = ctx.host.save(path).map_err(ExError::failure)?;
    ctx.host
        .echo(MessageLevel::Normal, false, &format!("  Saved {saved}"));
    Ok(())
}

pub(super) fn quit(ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    ctx.host.quit();
    Ok(())
}
