//! Command registry and name matching.
//!
//! Defines all available ex commands with their argument shapes. The table
//! order matters: commands are grouped by their leading characters and the
//! first entry that matches an abbreviation wins, like vim does for `:s`.

use bitflags::bitflags;

use super::cursor::InputCursor;
use super::error::ExError;

/// Longest token echoed back for an unknown command.
const MAX_UNKNOWN_TOKEN: usize = 20;

bitflags! {
    /// Argument shape accepted by a command.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ArgFlags: u8 {
        /// Command may be followed by `!`.
        const BANG = 1 << 0;
        /// Single word argument after the name.
        const LHS = 1 << 1;
        /// Free text argument up to `|` or end of line.
        const RHS = 1 << 2;
        /// Expand `%` and `~/` in the free text argument.
        const EXPAND = 1 << 3;
    }
}

/// Stable identifier of a command, used for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExCode {
    BookmarkAdd,
    BookmarkRemove,
    Eval,
    Hardcopy,
    Cmap,
    Cnoremap,
    Imap,
    Nmap,
    Nnoremap,
    Cunmap,
    Iunmap,
    Inoremap,
    Nunmap,
    Normal,
    Open,
    #[cfg(feature = "queue")]
    QueueClear,
    #[cfg(feature = "queue")]
    QueuePop,
    #[cfg(feature = "queue")]
    QueuePush,
    #[cfg(feature = "queue")]
    QueueUnshift,
    Quit,
    Save,
    ShortcutAdd,
    ShortcutDefault,
    ShortcutRemove,
    Set,
    ShellCmd,
    TabOpen,
}

/// Specification for a single command.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub code: ExCode,
    pub flags: ArgFlags,
    pub description: &'static str,
}

impl CommandSpec {
    pub fn allows(&self, flag: ArgFlags) -> bool {
        self.flags.contains(flag)
    }
}

const fn spec(
    name: &'static str,
    code: ExCode,
    flags: ArgFlags,
    description: &'static str,
) -> CommandSpec {
    CommandSpec {
        name,
        code,
        flags,
        description,
    }
}

const NONE: ArgFlags = ArgFlags::empty();
const RHS: ArgFlags = ArgFlags::RHS;
const LHS: ArgFlags = ArgFlags::LHS;
const LHS_RHS: ArgFlags = ArgFlags::LHS.union(ArgFlags::RHS);
const RHS_EXPAND: ArgFlags = ArgFlags::RHS.union(ArgFlags::EXPAND);
const BANG_LHS: ArgFlags = ArgFlags::BANG.union(ArgFlags::LHS);

/// All commands, in matching order.
///
/// Entries sharing a first letter must stay next to each other, matching
/// gives up as soon as it leaves a group.
pub const COMMANDS: &[CommandSpec] = &[
    spec("bma", ExCode::BookmarkAdd, RHS, "Bookmark the current page with optional tags"),
    spec("bmr", ExCode::BookmarkRemove, RHS, "Remove a bookmark (defaults to current page)"),
    spec("cmap", ExCode::Cmap, LHS_RHS, "Map keys in command mode"),
    spec("cnoremap", ExCode::Cnoremap, LHS_RHS, "Map keys in command mode without remapping"),
    spec("cunmap", ExCode::Cunmap, LHS, "Remove a command mode mapping"),
    spec("hardcopy", ExCode::Hardcopy, NONE, "Print the current page"),
    spec("eval", ExCode::Eval, RHS, "Evaluate a script in the current page"),
    spec("imap", ExCode::Imap, LHS_RHS, "Map keys in input mode"),
    spec("inoremap", ExCode::Inoremap, LHS_RHS, "Map keys in input mode without remapping"),
    spec("iunmap", ExCode::Iunmap, LHS, "Remove an input mode mapping"),
    spec("nmap", ExCode::Nmap, LHS_RHS, "Map keys in normal mode"),
    spec("nnoremap", ExCode::Nnoremap, LHS_RHS, "Map keys in normal mode without remapping"),
    spec("normal", ExCode::Normal, BANG_LHS, "Replay keys in normal mode (! skips mappings)"),
    spec("nunmap", ExCode::Nunmap, LHS, "Remove a normal mode mapping"),
    spec("open", ExCode::Open, RHS_EXPAND, "Open a URL in the current tab"),
    spec("quit", ExCode::Quit, NONE, "Exit"),
    #[cfg(feature = "queue")]
    spec("qunshift", ExCode::QueueUnshift, RHS, "Put a URL at the front of the read-it-later queue"),
    #[cfg(feature = "queue")]
    spec("qclear", ExCode::QueueClear, RHS, "Empty the read-it-later queue"),
    #[cfg(feature = "queue")]
    spec("qpop", ExCode::QueuePop, NONE, "Open the first queued URL"),
    #[cfg(feature = "queue")]
    spec("qpush", ExCode::QueuePush, RHS, "Append a URL to the read-it-later queue"),
    spec("save", ExCode::Save, RHS_EXPAND, "Save the current page"),
    spec("set", ExCode::Set, RHS, "Change a setting (name, name=value, name!, name?)"),
    spec("shellcmd", ExCode::ShellCmd, RHS_EXPAND, "Run a shell command"),
    spec("shortcut-add", ExCode::ShortcutAdd, RHS, "Add a search shortcut (name=uri with $0)"),
    spec("shortcut-default", ExCode::ShortcutDefault, RHS, "Use a shortcut for plain words"),
    spec("shortcut-remove", ExCode::ShortcutRemove, RHS, "Remove a search shortcut"),
    spec("tabopen", ExCode::TabOpen, RHS_EXPAND, "Open a URL in a new tab"),
];

/// Ordered view over a command table.
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    commands: &'a [CommandSpec],
}

impl Default for Registry<'static> {
    fn default() -> Self {
        Self { commands: COMMANDS }
    }
}

impl<'a> Registry<'a> {
    #[cfg(test)]
    pub fn new(commands: &'a [CommandSpec]) -> Self {
        Self { commands }
    }

    #[cfg(test)]
    pub fn commands(&self) -> &'a [CommandSpec] {
        self.commands
    }

    /// Resolve a possibly abbreviated command name at the cursor.
    ///
    /// Consumes characters while at least one entry still agrees with the
    /// typed prefix and the next character is not a space or `!`. The first
    /// entry in table order agreeing with the consumed prefix is returned.
    /// On failure the rest of the word is consumed for the error message.
    pub fn resolve(&self, cursor: &mut InputCursor) -> Result<&'a CommandSpec, ExError> {
        let mut typed: Vec<char> = Vec::new();
        let mut first = 0usize;
        let mut matches = 0usize;

        while let Some(ch) = cursor.peek() {
            typed.push(ch);
            let len = typed.len();
            matches = 0;
            for (idx, command) in self.commands.iter().enumerate().skip(first) {
                if len > 1 && !shares_prefix(command.name, &typed[..len - 1]) {
                    break;
                }
                if command.name.chars().nth(len - 1) == Some(ch) {
                    if matches == 0 {
                        first = idx;
                    }
                    matches += 1;
                }
            }
            cursor.advance();

            if matches == 0 {
                break;
            }
            match cursor.peek() {
                None | Some(' ') | Some('!') => break,
                Some(_) => {}
            }
        }

        if matches == 0 {
            while typed.len() < MAX_UNKNOWN_TOKEN {
                match cursor.peek() {
                    Some(ch) if ch != ' ' => {
                        typed.push(ch);
                        cursor.advance();
                    }
                    _ => break,
                }
            }
            return Err(ExError::UnknownCommand {
                token: typed.into_iter().collect(),
            });
        }

        Ok(&self.commands[first])
    }

    /// Command names starting with the given text, in table order.
    pub fn fill_command_names(&self, filter: &str) -> Vec<String> {
        self.commands
            .iter()
            .filter(|command| filter.is_empty() || command.name.starts_with(filter))
            .map(|command| command.name.to_string())
            .collect()
    }
}

fn shares_prefix(name: &str, typed: &[char]) -> bool {
    let mut chars = name.chars();
    typed.iter().all(|ch| chars.next() == Some(*ch))
}

/// Generate help lines for all commands.
pub fn command_help_lines() -> Vec<String> {
    let longest = COMMANDS
        .iter()
        .map(|command| command.name.len())
        .max()
        .unwrap_or(0);
    COMMANDS
        .iter()
        .map(|command| {
            format!(
                ":{:<width$} {}",
                command.name,
                command.description,
                width = longest
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{command_help_lines, ArgFlags, CommandSpec, ExCode, Registry, COMMANDS};
    use crate::commands::cursor::InputCursor;
    use crate::commands::error::ExError;

    fn resolve_name(registry: &Registry<'_>, input: &str) -> Result<(&'static str, usize), ExError> {
        let mut cursor = InputCursor::new(input);
        let command = registry.resolve(&mut cursor)?;
        let name = COMMANDS
            .iter()
            .chain(SHADOWED.iter())
            .find(|candidate| candidate.name == command.name)
            .map(|candidate| candidate.name)
            .expect("known name");
        Ok((name, cursor.pos()))
    }

    const SHADOWED: &[CommandSpec] = &[
        CommandSpec {
            name: "map",
            code: ExCode::Nmap,
            flags: ArgFlags::LHS.union(ArgFlags::RHS),
            description: "",
        },
        CommandSpec {
            name: "mapclear",
            code: ExCode::Nunmap,
            flags: ArgFlags::empty(),
            description: "",
        },
    ];

    #[test]
    fn names_sharing_a_first_letter_are_contiguous() {
        for (idx, command) in COMMANDS.iter().enumerate() {
            let first = command.name.chars().next().expect("non-empty name");
            let last_same = COMMANDS
                .iter()
                .rposition(|other| other.name.starts_with(first))
                .expect("self matches");
            assert!(
                COMMANDS[idx..=last_same]
                    .iter()
                    .all(|other| other.name.starts_with(first)),
                "group for {first:?} is split around {}",
                command.name
            );
        }
    }

    #[test]
    fn names_are_unique() {
        for (idx, command) in COMMANDS.iter().enumerate() {
            assert!(COMMANDS[idx + 1..].iter().all(|other| other.name != command.name));
        }
    }

    #[test]
    fn abbreviation_resolves_to_first_defined() {
        let registry = Registry::default();
        assert_eq!(resolve_name(&registry, "o").unwrap().0, "open");
        assert_eq!(resolve_name(&registry, "q").unwrap().0, "quit");
        assert_eq!(resolve_name(&registry, "no").unwrap().0, "normal");
        assert_eq!(resolve_name(&registry, "n").unwrap().0, "nmap");
        assert_eq!(resolve_name(&registry, "sh").unwrap().0, "shellcmd");
        assert_eq!(resolve_name(&registry, "shortcut-r").unwrap().0, "shortcut-remove");
        assert_eq!(resolve_name(&registry, "e").unwrap().0, "eval");
    }

    #[cfg(feature = "queue")]
    #[test]
    fn shared_prefix_picks_earliest_entry() {
        let registry = Registry::default();
        assert_eq!(resolve_name(&registry, "qp").unwrap().0, "qpop");
        assert_eq!(resolve_name(&registry, "qpu").unwrap().0, "qpush");
        assert_eq!(resolve_name(&registry, "qu").unwrap().0, "quit");
        assert_eq!(resolve_name(&registry, "qun").unwrap().0, "qunshift");
    }

    #[test]
    fn full_name_that_prefixes_another_wins() {
        let registry = Registry::new(SHADOWED);
        assert_eq!(resolve_name(&registry, "map").unwrap().0, "map");
        assert_eq!(resolve_name(&registry, "map x").unwrap(), ("map", 3));
        assert_eq!(resolve_name(&registry, "mapc").unwrap().0, "mapclear");
    }

    #[test]
    fn matching_stops_before_space_and_bang() {
        let registry = Registry::default();
        assert_eq!(resolve_name(&registry, "o example.com").unwrap(), ("open", 1));
        assert_eq!(resolve_name(&registry, "norm!x").unwrap(), ("normal", 4));
    }

    #[test]
    fn unknown_command_consumes_the_word() {
        let registry = Registry::default();
        let mut cursor = InputCursor::new("frobnicate now");
        let err = registry.resolve(&mut cursor).unwrap_err();
        assert_eq!(
            err,
            ExError::UnknownCommand {
                token: "frobnicate".to_string()
            }
        );
        assert_eq!(cursor.pos(), 10);
    }

    #[test]
    fn trailing_garbage_after_a_name_is_unknown() {
        let registry = Registry::default();
        let err = resolve_name(&registry, "openx").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: openx");
    }

    #[test]
    fn empty_name_is_unknown() {
        let registry = Registry::default();
        let err = resolve_name(&registry, "").unwrap_err();
        assert_eq!(
            err,
            ExError::UnknownCommand {
                token: String::new()
            }
        );
    }

    #[test]
    fn fill_command_names_filters_by_prefix() {
        let registry = Registry::default();
        assert_eq!(
            registry.fill_command_names("sh"),
            vec!["shellcmd", "shortcut-add", "shortcut-default", "shortcut-remove"]
        );
        assert_eq!(registry.fill_command_names("").len(), COMMANDS.len());
        assert!(registry.fill_command_names("zz").is_empty());
    }

    #[test]
    fn help_lines_include_all_commands() {
        let lines = command_help_lines();
        assert_eq!(lines.len(), COMMANDS.len());
        assert!(lines.iter().all(|line| line.starts_with(':')));
        assert!(lines.iter().any(|line| line.contains(":open") && line.contains("current tab")));
    }
}
