use crossterm::event::KeyCode;
use log::debug;

use crate::app::browser::Browser;
use crate::commands::ExError;
use crate::ex::{CompletionStep, Ex, HistoryStep};
use crate::keymap::Key;

use crate::app::state::{App, Mode};

pub(super) fn handle_command_key(app: &mut App, key: Key) {
    let App { ex, browser, .. } = app;
    let result = match (key.code, key.ctrl) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), true) => {
            ex.cancel(browser);
            Ok(())
        }
        (KeyCode::Enter, _) => ex.submit(browser),
        (KeyCode::Tab, _) => ex.complete(CompletionStep::Next, browser),
        (KeyCode::BackTab, _) => ex.complete(CompletionStep::Prev, browser),
        (KeyCode::Char('y'), true) => accept_candidate(ex, browser),
        (KeyCode::Up, _) => ex.step_history(HistoryStep::Older, browser),
        (KeyCode::Down, _) => ex.step_history(HistoryStep::Newer, browser),
        (KeyCode::Backspace, _) => {
            browser.input.pop();
            if browser.input.is_empty() {
                ex.cancel(browser);
            } else {
                ex.input_changed(browser);
            }
            Ok(())
        }
        (KeyCode::Char('u'), true) => {
            // keep the sigil
            let sigil: String = browser.input.chars().take(1).collect();
            browser.input = sigil;
            ex.input_changed(browser);
            Ok(())
        }
        (KeyCode::Char(ch), false) if !key.alt => {
            browser.input.push(ch);
            ex.input_changed(browser);
            Ok(())
        }
        _ => Ok(()),
    };

    match result {
        // run_string already echoed it
        Err(err) if err.is_reportable() => debug!("command line action failed: {err}"),
        _ => {}
    }
    if browser.mode != Mode::Command {
        ex.leave();
    }
}

/// Keep the selected candidate and end completion.
fn accept_candidate(ex: &mut Ex, browser: &mut Browser) -> Result<(), ExError> {
    let value = ex
        .completion()
        .map(|session| session.candidates()[session.selected()].value.clone())
        .ok_or(ExError::NoCompletionContext)?;
    ex.select(&value, browser)?;
    ex.complete(CompletionStep::Stop, browser)
}
