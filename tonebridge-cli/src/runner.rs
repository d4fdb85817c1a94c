use std::{
    collections::VecDeque,
    fs, io,
    sync::{Arc, Mutex},
    thread::sleep,
    time::Duration,
};

use clap::ArgMatches;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use tonebridge_lib::engine::{Engine, EngineConfig};
use tonebridge_lib::message::Event;
use tonebridge_lib::output::OutputMode;
use tonebridge_lib::score::Score;

use crate::{controls, logging, ui};

pub fn run(
    args: &ArgMatches,
    log_buffer: Arc<Mutex<VecDeque<String>>>,
) -> Result<i32, Box<dyn std::error::Error>> {
    if let Some(("create", create)) = args.subcommand() {
        return match create.subcommand() {
            Some(("score-json", _)) => {
                println!("{}", Score::template().to_json()?);
                Ok(0)
            }
            _ => {
                eprintln!("unknown create target; try `create score-json`");
                Ok(-1)
            }
        };
    }

    info!("starting tonebridge");

    let frame_rate = args
        .get_one::<String>("frame-rate")
        .unwrap()
        .parse::<f32>()?;
    let output = if args.get_flag("detached") {
        OutputMode::Detached
    } else {
        OutputMode::Device
    };
    let quiet = args.get_flag("quiet");

    let (engine, events) = Engine::spawn(EngineConfig { frame_rate, output });
    let mut last_time = engine.initial_time();
    let mut transport = controls::Transport {
        clock_running: true,
        scheduled: 0,
    };

    engine.start_clock();

    let mut exit_at = None;
    if let Some(path) = args.get_one::<String>("score") {
        let score = Score::from_json(&fs::read_to_string(path)?)?;
        // One frame of headroom so the first note never starts in the past.
        let base = last_time + 0.1;
        for event in score.to_events(base) {
            engine.schedule_note(event);
            transport.scheduled += 1;
        }
        info!("scheduled {} notes from {}", transport.scheduled, path);
        if quiet {
            // Headless playback has no quit key; leave once the score ends.
            exit_at = Some(base + score.length());
        }
    }

    let _raw_mode = RawModeGuard::enable().ok();
    let mut terminal = if !quiet {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, EnterAlternateScreen, cursor::Hide);
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).ok()
    } else {
        None
    };

    // UI / input loop.
    loop {
        // Keep only the latest clock reading; stale frames are useless.
        while let Ok(Event::ClockUpdate { current_time }) = events.try_recv() {
            last_time = current_time;
        }

        if let Some(deadline) = exit_at {
            if last_time >= deadline {
                engine.stop_clock();
                break;
            }
        }

        if let Some(term) = terminal.as_mut() {
            let log_lines = logging::snapshot(&log_buffer);
            let status = controls::status_text(controls::StatusArgs {
                time: last_time,
                running: transport.clock_running,
                scheduled: transport.scheduled,
            });
            ui::draw_status(term, &status, &log_lines);
        }

        if !controls::handle_key_event(&engine, last_time, &mut transport) {
            break;
        }

        sleep(Duration::from_millis(50));
    }

    // Restore the terminal state before exiting.
    if let Some(mut term) = terminal {
        let _ = term.show_cursor();
        let stdout = term.backend_mut();
        let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
    }

    engine.shutdown();

    Ok(0)
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
