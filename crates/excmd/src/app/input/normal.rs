use crossterm::event::KeyCode;
use log::{debug, warn};

use crate::host::{Page, Target};
use crate::keymap::{key_notation, Key};

use crate::app::state::{App, Mode};

fn enter_command(app: &mut App, input: String) {
    app.browser.mode = Mode::Command;
    app.browser.input = input;
}

pub(super) fn handle_normal_key(app: &mut App, key: Key) {
    if let Some(prefix) = app.prefix.take() {
        handle_prefixed(app, prefix, key);
        return;
    }
    if key.code == KeyCode::Esc {
        app.browser.output = None;
        return;
    }
    let Some(ch) = key.as_char() else {
        debug!("unbound normal key {}", key_notation(&key));
        return;
    };
    let uri = app.browser.uri().unwrap_or_default();
    match ch {
        ':' => enter_command(app, ":".to_string()),
        '/' | '?' => enter_command(app, ch.to_string()),
        'o' => enter_command(app, ":open ".to_string()),
        'O' => enter_command(app, format!(":open {uri}")),
        't' => enter_command(app, ":tabopen ".to_string()),
        'T' => enter_command(app, format!(":tabopen {uri}")),
        'i' => app.browser.mode = Mode::Insert,
        'n' => app.browser.repeat_search(false),
        'N' => app.browser.repeat_search(true),
        'd' => app.browser.close_tab(),
        'g' => app.prefix = Some('g'),
        _ => debug!("unbound normal key {ch}"),
    }
}

fn handle_prefixed(app: &mut App, prefix: char, key: Key) {
    match (prefix, key.as_char()) {
        ('g', Some('h')) => {
            if let Err(err) = app.browser.load_uri("", Target::Current) {
                warn!("failed to open home page: {err}");
            }
        }
        ('g', Some('t')) => app.browser.next_tab(true),
        ('g', Some('T')) => app.browser.next_tab(false),
        _ => debug!("unbound key sequence {prefix}{}", key_notation(&key)),
    }
}

pub(super) fn handle_insert_key(app: &mut App, key: Key) {
    match key.code {
        KeyCode::Esc => app.browser.mode = Mode::Normal,
        KeyCode::Backspace => {
            app.browser.typed.pop();
        }
        KeyCode::Enter => app.browser.typed.push('\n'),
        KeyCode::Char(ch) if !key.ctrl && !key.alt => app.browser.typed.push(ch),
        _ => {}
    }
}
