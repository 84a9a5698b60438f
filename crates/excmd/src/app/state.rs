//! Application state types and core data structures.
//!
//! `App` splits into the interpreter (`Ex`) and the `Browser`, which
//! implements every host trait. Keeping them apart lets the interpreter
//! borrow the browser mutably while it runs a command.

use crate::ex::Ex;
use crate::keymap::Key;

use super::browser::Browser;

/// Input mode; decides how keys are interpreted and which maps apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
    Insert,
}

/// Main application state container.
pub struct App {
    pub ex: Ex,
    pub browser: Browser,
    /// Keys typed so far that may still complete a mapping.
    pub pending: Vec<Key>,
    /// First key of a two-key normal mode command such as `gt`.
    pub prefix: Option<char>,
    pub refresh_requested: bool,
}

pub const OUTPUT_MAX_LINES: usize = 6;
pub const BOTTOM_HORIZONTAL_PADDING: u16 = 1;
/// Bound on nested mapping expansion and `:normal` replay.
pub const MAX_MAP_DEPTH: usize = 100;
