//! CLI argument definitions for `tonebridge`.

use clap::{Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("Tonebridge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Play timed tones against a shared audio clock")
        .arg(
            Arg::new("score")
                .long("score")
                .short('s')
                .value_name("PATH")
                .help("Path to a JSON score scheduled at startup"),
        )
        .arg(
            Arg::new("frame-rate")
                .long("frame-rate")
                .value_name("FPS")
                .default_value("60")
                .help("Clock update cadence in frames per second"),
        )
        .arg(
            Arg::new("detached")
                .long("detached")
                .action(ArgAction::SetTrue)
                .help("Run without opening an audio output device"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Suppress the status display"),
        )
        .subcommand(
            Command::new("create").about("Emit default JSON payloads").subcommand(
                Command::new("score-json").about("Print a template score JSON payload"),
            ),
        )
}
