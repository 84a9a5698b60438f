//! Application orchestration and main event loop.
//!
//! This module owns the core application lifecycle:
//! - Initialization (terminal setup, rc file)
//! - Event loop (keys, resizes)
//! - Key handling (mappings, modes, `:normal` replay)
//! - UI rendering delegation
//!
//! Submodules:
//! - browser: headless page state implementing the host traits
//! - state: App struct and type definitions
//! - runner: main loop and terminal setup
//! - input: keyboard event handling
//! - render: UI rendering methods

mod browser;
mod input;
mod render;
mod runner;
mod state;

pub use runner::run;
