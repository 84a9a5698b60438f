//! Command system for the `:command` line.
//!
//! - Registry: the ordered command table and prefix matching (registry.rs)
//! - Parsing: count, name, bang and arguments of one command (parse.rs)
//! - Execution: one handler per command code (exec/)
//!
//! Commands follow a `:[count]name[!] [lhs] [rhs]` pattern similar to Vim.
//! Names may be abbreviated; the first registered match wins.

mod cursor;
mod error;
mod exec;
mod parse;
mod registry;

pub use cursor::InputCursor;
pub use error::ExError;
pub use exec::{dispatch, CommandContext};
pub use parse::{parse, parse_count, Placeholders};
pub use registry::{command_help_lines, ExCode, Registry};
