//! Terminal blockfall runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `blockfall-term`.
//! With `BLOCKFALL_SCRIPT` set it replays that script headlessly and prints a
//! JSON summary instead.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::config::Config;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::engine::GameLoop;
use blockfall::event_log::EventLog;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::replay::replay;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::Command;

fn main() -> Result<()> {
    let config = Config::from_env();
    let mut log = EventLog::from_path(config.log_path.as_deref())?;

    if let Some(path) = config.script_path.as_deref() {
        let script =
            std::fs::read_to_string(path).with_context(|| format!("reading script {path}"))?;
        let report = replay(&script, &config, &mut log);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    log.flush();
    result
}

fn run(term: &mut TerminalRenderer, config: &Config, log: &mut EventLog) -> Result<()> {
    let state = GameState::new(config.seed).with_line_clear_delay_ms(config.line_clear_delay_ms);
    let mut game = GameLoop::with_state(state);
    if config.autostart {
        game.push_command(Command::Start);
    }

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_frame = Instant::now();

    loop {
        // Advance time, then apply everything queued since the last frame.
        let now = Instant::now();
        let elapsed = now.duration_since(last_frame);
        let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
        // Keep sub-millisecond remainders for the next frame.
        last_frame = now - Duration::from_nanos(elapsed.subsec_nanos() as u64 % 1_000_000);
        game.advance(elapsed_ms);
        game.run_pending();
        log.record_all(game.take_events());

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until the next fixed step.
        let timeout = Duration::from_millis(game.clock().until_next_ms() as u64);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        game.push_command(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
    }
}
