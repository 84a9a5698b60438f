use crate::commands::error::ExError;
use crate::commands::parse::Invocation;
use crate::host::MessageLevel;

use super::CommandContext;

/// `:bma [tags]` bookmarks the current page.
pub(super) fn bookmark_add(inv: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> Result<(), ExError> {
    let Some(uri) = ctx.host.uri() else {
        return Err(ExError::failure("No page to bookmark"));
    };
    let title = ctx.host.title();
    if !ctx.host.add_bookmark(&uri, title.as_deref(), inv.rhs.trim()) {
        return Err(ExError::failure(format!("Could not bookmark {uri}")));
    }
    ctx.host.echo(MessageLevel::Normal, true, "  Bookmark added");
    Ok(())
}

/// `:bmr [uri]` removes a bookmark, defaulting to the current page.
pub(super) fn bookmark_remove(
    inv: &Invocation<'_>,
    ctx: &mut CommandContext<'_>,
) -> Result<(), ExError> {
    let uri = if inv.rhs.is_empty() {
        ctx.host.uri()
    } else {
        Some(inv.rhs.clone())
    };
    let Some(uri) = uri else {
        return Err(ExError::failure("No bookmark to remove"));
    };
    if !ctx.host.remove_bookmark(&uri) {
        return Err(ExError::failure(format!("No bookmark for {uri}")));
    }
    ctx.host.echo(MessageLevel::Normal, true, "  Bookmark removed");
    Ok(())
}
