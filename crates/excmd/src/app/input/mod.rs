//! Input event handling.
//!
//! Keys first go through the mappings of the current mode, then to the
//! handler of that mode. Keys queued by `:normal` are fed through the same
//! path once the command that queued them has finished.

mod command;
mod normal;


use log::{debug, warn};

use crate::events::AppEvent;
use crate::host::MapMode;
use crate::keymap::{Key, MapMatch};

use super::state::{App, Mode, MAX_MAP_DEPTH};

/// Main event dispatcher.
pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Input(event) => {
            handle_key(app, Key::from(event));
            drain_replay(app);
        }
        AppEvent::Resize => app.refresh_requested = true,
    }
}

/// Handle one typed key, expanding mappings.
pub(super) fn handle_key(app: &mut App, key: Key) {
    feed(app, key, true, 0);
}

fn map_mode(mode: Mode) -> MapMode {
    match mode {
        Mode::Normal => MapMode::Normal,
        Mode::Command => MapMode::Command,
        Mode::Insert => MapMode::Insert,
    }
}

fn feed(app: &mut App, key: Key, remap: bool, depth: usize) {
    if !remap {
        dispatch_key(app, key);
        return;
    }
    if depth > MAX_MAP_DEPTH {
        warn!("mapping recursion too deep, dropping keys");
        app.pending.clear();
        return;
    }

    app.pending.push(key);
    let mode = map_mode(app.browser.mode);
    let expansion = match app.browser.maps.lookup(mode, &app.pending) {
        MapMatch::Partial => return,
        MapMatch::Full(mapping) => Some((mapping.rhs.clone(), mapping.remap)),
        MapMatch::None => None,
    };
    let pending = std::mem::take(&mut app.pending);

    match expansion {
        Some((rhs, remap)) => {
            debug!("mapping expanded to {} keys", rhs.len());
            for key in rhs {
                feed(app, key, remap, depth + 1);
            }
        }
        None => {
            // the first key runs unmapped, the rest may start another map
            let mut keys = pending.into_iter();
            if let Some(first) = keys.next() {
                dispatch_key(app, first);
            }
            for key in keys {
                feed(app, key, true, depth + 1);
            }
        }
    }
}

fn dispatch_key(app: &mut App, key: Key) {
    match app.browser.mode {
        Mode::Normal => normal::handle_normal_key(app, key),
        Mode::Command => command::handle_command_key(app, key),
        Mode::Insert => normal::handle_insert_key(app, key),
    }
}

/// Run keys queued by `:normal`; each round may queue more.
pub(super) fn drain_replay(app: &mut App) {
    let mut rounds = 0;
    while !app.browser.replay.is_empty() {
        rounds += 1;
        if rounds > MAX_MAP_DEPTH {
            warn!(":normal recursion too deep, dropping keys");
            app.browser.replay.clear();
            return;
        }
        let batch = std::mem::take(&mut app.browser.replay);
        for replay in batch {
            app.pending.clear();
            for key in replay.keys {
                feed(app, key, replay.remap, 1);
            }
            // an unfinished mapping does not outlive the replay
            app.pending.clear();
        }
    }
}
