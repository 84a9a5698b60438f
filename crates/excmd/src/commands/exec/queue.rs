use crate::commands::error::ExError;
use crate::commands::parse::Invocation;
use crate::commands::registry::ExCode;
use crate::host::{MessageLevel, Target};

use super::CommandContext;

/// Read-it-later queue commands. Without an argument push and unshift use
/// the current page.
pub(super) fn queue(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    match inv.command.code {
        ExCode::QueuePush | ExCode::QueueUnshift => {
            let uri = if inv.rhs.is_empty() {
                ctx.host.uri()
            } else {
                Some(inv.rhs.clone())
            };
            let Some(uri) = uri else {
                return Err(ExError::failure("Nothing to queue"));
            };
            let queued = if inv.command.code == ExCode::QueuePush {
                ctx.host.queue_push(&uri)
            } else {
                ctx.host.queue_unshift(&uri)
            };
            if !queued {
                return Err(ExError::failure(format!("Could not queue {uri}")));
            }
            ctx.host.echo(MessageLevel::Normal, false, "  Pushed to queue");
        }
        ExCode::QueuePop => {
            let Some(uri) = ctx.host.queue_pop() else {
                return Err(ExError::failure("Queue is empty"));
            };
            ctx.host
                .load_uri(&uri, Target::Current)
                .map_err(ExError::failure)?;
        }
        ExCode::QueueClear => {
            if !ctx.host.queue_clear() {
                return Err(ExError::failure("Could not clear queue"));
            }
            ctx.host.echo(MessageLevel::Normal, false, "  Queue cleared");
        }
        _ => unreachable!("not a queue command: {}", inv.command.name),
    }
    Ok(())
}
