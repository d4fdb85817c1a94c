//! # Tonebridge
//!
//! A terminal keyboard for the Tonebridge audio core: runs the shared
//! clock, plays notes from key presses or a JSON score.

use log::error;

mod args;
mod controls;
mod logging;
mod runner;
mod ui;

fn main() {
    let matches = args::build_cli().get_matches();
    let log_buffer = logging::init();

    let code = match runner::run(&matches, log_buffer) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err.to_string().to_lowercase());
            -1
        }
    };

    std::process::exit(code)
}
