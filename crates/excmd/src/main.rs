mod app;
mod commands;
mod config;
mod events;
mod ex;
mod host;
mod keymap;
mod logging;
mod shell;
mod store;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use log::info;

fn main() -> std::io::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = config::load_config(&cwd);
    logging::init(config.log.level.as_deref());
    info!("starting with data dir {}", config.files.data_dir.display());
    app::run(config, std::env::args().nth(1))
}
