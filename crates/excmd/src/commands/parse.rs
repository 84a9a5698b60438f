//! Command line parsing.
//!
//! Turns `[count]name[!] [lhs] [rhs]` into an [`Invocation`], resolving the
//! name against the registry. A single line may chain several commands
//! separated by `|` or newlines; each call to [`parse`] consumes one.

use super::cursor::InputCursor;
use super::error::ExError;
use super::registry::{ArgFlags, CommandSpec, Registry};

const ESCAPE: char = '\\';
const LHS_END: &[char] = &[' '];
const RHS_END: &[char] = &['|', '\n'];

/// One parsed command occurrence.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub count: u32,
    pub command: &'a CommandSpec,
    pub bang: bool,
    pub lhs: String,
    pub rhs: String,
}

/// Values substituted for `%` and `~/` in expandable arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    pub uri: Option<String>,
    pub home: Option<String>,
}

/// Parse the next command from the cursor.
///
/// Returns `Ok(None)` once only separators remain.
pub fn parse<'a>(
    cursor: &mut InputCursor,
    registry: &Registry<'a>,
    placeholders: &Placeholders,
) -> Result<Option<Invocation<'a>>, ExError> {
    cursor.skip_while(|ch| ch == ':' || ch == ' ');
    if cursor.is_at_end() {
        return Ok(None);
    }

    let count = parse_count(cursor);
    cursor.skip_spaces();
    let command = registry.resolve(cursor)?;

    let mut bang = false;
    if command.allows(ArgFlags::BANG) && cursor.peek() == Some('!') {
        cursor.advance();
        bang = true;
    }

    cursor.skip_spaces();
    let lhs = if command.allows(ArgFlags::LHS) {
        parse_escaped(cursor, LHS_END, None)
    } else {
        String::new()
    };

    cursor.skip_spaces();
    let rhs = if command.allows(ArgFlags::RHS) {
        let expand = command.allows(ArgFlags::EXPAND).then_some(placeholders);
        parse_escaped(cursor, RHS_END, expand)
    } else {
        String::new()
    };

    // step over the separator so the next call starts at the next command
    cursor.advance();

    Ok(Some(Invocation {
        count,
        command,
        bang,
        lhs,
        rhs,
    }))
}

/// Parse a leading decimal count, 0 when absent.
pub fn parse_count(cursor: &mut InputCursor) -> u32 {
    let mut count: u32 = 0;
    while let Some(digit) = cursor.peek().and_then(|ch| ch.to_digit(10)) {
        count = count.saturating_mul(10).saturating_add(digit);
        cursor.advance();
    }
    count
}

/// Read characters up to the first unescaped terminator.
///
/// A backslash before the first terminator yields the terminator itself,
/// before anything else it is kept along with the next char. A trailing
/// backslash stays a backslash.
pub fn parse_escaped(
    cursor: &mut InputCursor,
    terminators: &[char],
    expand: Option<&Placeholders>,
) -> String {
    let escapable = terminators[0];
    let mut out = String::new();
    let mut prev: Option<char> = None;

    while let Some(ch) = cursor.peek() {
        if terminators.contains(&ch) {
            break;
        }
        cursor.advance();

        if ch == ESCAPE {
            match cursor.advance() {
                None => out.push(ESCAPE),
                Some(next) if next == escapable => out.push(next),
                Some(next) => {
                    out.push(ESCAPE);
                    out.push(next);
                }
            }
            prev = Some(ch);
            continue;
        }

        if let Some(placeholders) = expand {
            if ch == '%' {
                if let Some(uri) = placeholders.uri.as_deref() {
                    out.push_str(uri);
                }
                prev = Some(ch);
                continue;
            }
            let word_start = prev.map_or(true, |before| before == ' ');
            if ch == '~' && word_start && cursor.peek() == Some('/') {
                if let Some(home) = placeholders.home.as_deref() {
                    out.push_str(home.trim_end_matches('/'));
                    out.push('/');
                    cursor.advance();
                    prev = Some('/');
                    continue;
                }
            }
        }

        out.push(ch);
        prev = Some(ch);
    }
    out
}

/// Escape every occurrence of `terminator` so that [`parse_escaped`] reads
/// `value` back unchanged.
#[cfg(test)]
pub fn escape_arg(value: &str, terminator: char) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == terminator {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}
