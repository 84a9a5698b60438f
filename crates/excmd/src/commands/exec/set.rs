use crate::commands::error::ExError;
use crate::commands::parse::Invocation;
use crate::host::MessageLevel;

use super::{require, CommandContext};

/// `:set name`, `:set name=value`: split at the first `=`.
pub(super) fn set(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    let rhs = require(inv, &inv.rhs)?;
    let (name, value) = match rhs.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (rhs, None),
    };
    let report = ctx
        .host
        .apply_setting(name.trim(), value)
        .map_err(ExError::failure)?;
    if let Some(report) = report {
        ctx.host.echo(MessageLevel::Normal, true, &report);
    }
    Ok(())
}
