//! Trash Sorter runner (default binary).
//!
//! `trash-sorter` plays the game in the terminal; `trash-sorter replay` runs a
//! round headlessly from JSON lines on stdin.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use trash_sorter::app::App;
use trash_sorter::cli::{parse_args, Command};
use trash_sorter::config::AppConfig;
use trash_sorter::logging;
use trash_sorter::replay::{run_replay, ReplayOptions};
use trash_sorter::term::{FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use trash_sorter::types::TICK_MS;

/// Redraw an unchanged frame at most this often.
const IDLE_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::from_env();

    match parse_args(&args)? {
        Command::Play => play(&config),
        Command::Replay(options) => replay(options),
    }
}

fn replay(options: ReplayOptions) -> Result<()> {
    logging::init_stderr();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_replay(stdin.lock(), stdout.lock(), options)?;
    Ok(())
}

fn play(config: &AppConfig) -> Result<()> {
    if let Some(path) = config.log_path.as_deref() {
        logging::init_file(path)?;
    }
    info!(?config, "starting trash sorter");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut app = App::new(config);
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(IDLE_REDRAW_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        let bell = app.take_bells() > 0;
        if bell {
            term.queue_bell();
        }
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, app.frame_fingerprint()) || bell {
            app.render_into(viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse, viewport),
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
            if app.should_quit() {
                info!(score = app.snapshot().score, "quit");
                return Ok(());
            }
        }

        // Tick with the real elapsed time so feedback lasts as long as intended.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            app.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}
