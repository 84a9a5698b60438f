use log::warn;

use crate::commands::error::ExError;
use crate::commands::parse::Invocation;
use crate::host::MessageLevel;

use super::{require, CommandContext};

/// `:shellcmd {cmd}` runs the command through the configured shell.
///
/// Blocks until the child exits; no timeout is applied.
pub(super) fn shellcmd(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    let command = require(inv, &inv.rhs)?;
    let mut argv = ctx.host.shell_prefix();
    argv.push(command.to_string());

    let output = ctx.host.run(&argv);
    if output.success() {
        ctx.host.echo(
            MessageLevel::Normal,
            false,
            &format!("  {}", output.stdout.trim_end()),
        );
        return Ok(());
    }
    warn!("shellcmd {command:?} exited with {}", output.status);
    Err(ExError::failure(format!(
        "[{}] {}",
        output.status,
        output.stderr.trim_end()
    )))
}
