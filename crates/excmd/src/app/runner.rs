//! Application runner and event loop.
//!
//! Handles terminal setup/teardown and the main event loop.
//! Events are read from an mpsc channel and dispatched to handlers.

use std::io;
use std::sync::mpsc::{self, Sender};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::{rc_lines, Config};
use crate::events::AppEvent;
use crate::ex::{Ex, ExOptions};
use crate::host::{Page, Target};

use super::browser::Browser;
use super::state::App;

/// Entry point: set up terminal and run the event loop.
pub fn run(config: Config, initial_uri: Option<String>) -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    app.open_initial(initial_uri.as_deref());
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop: process events until quit.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    spawn_input_thread(event_tx);

    terminal.clear()?;
    terminal.draw(|frame| super::render::render(app, frame))?;

    while !app.browser.quit_requested {
        let event = match event_rx.recv() {
            Ok(event) => event,
            Err(_) => break,
        };
        super::input::handle_event(app, event);
        // Drain any pending events before redraw
        while let Ok(event) = event_rx.try_recv() {
            if app.browser.quit_requested {
                break;
            }
            super::input::handle_event(app, event);
        }

        if app.refresh_requested {
            terminal.clear()?;
            app.refresh_requested = false;
        }

        terminal.draw(|frame| super::render::render(app, frame))?;
    }
    Ok(())
}

/// Spawn a thread to read terminal input events.
fn spawn_input_thread(sender: Sender<AppEvent>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                if sender.send(AppEvent::Input(key)).is_err() {
                    break;
                }
            }
            Ok(Event::Resize(_, _)) => {
                if sender.send(AppEvent::Resize).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });
}

impl App {
    /// Create the browser and interpreter, then run the rc file.
    pub fn new(config: Config) -> Self {
        let mut browser = Browser::new(&config);
        let mut ex = Ex::new(ExOptions {
            wrap_completion: config.completion.wrap,
        });

        let lines = rc_lines(&config.files.rc);
        info!("running {} rc lines from {}", lines.len(), config.files.rc.display());
        for line in lines {
            if ex.run_string(&line, &mut browser).is_err() {
                warn!("Invalid config: {line}");
            }
        }
        // rc output is not shown at startup, only failures are logged
        browser.output = None;

        Self {
            ex,
            browser,
            pending: Vec::new(),
            prefix: None,
            refresh_requested: false,
        }
    }

    /// Load the address given on the command line, or the home page.
    pub fn open_initial(&mut self, uri: Option<&str>) {
        let uri = uri.unwrap_or_default();
        if let Err(err) = self.browser.load_uri(uri, Target::Current) {
            warn!("failed to open {uri:?}: {err}");
        }
    }
}
