//! Application event types.
//!
//! The input thread forwards terminal events over an mpsc channel; the
//! main loop handles them one at a time and redraws after each batch.

use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum AppEvent {
    Input(KeyEvent),
    Resize,
}
