//! Terminal blockfall runner (default binary).
//!
//! Owns the clock: gravity is an accumulator drained once per `gravity_ms`,
//! key presses become engine intents, and the framebuffer renderer repaints
//! once per frame. Pause and restart live here; the engine knows neither.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{EngineConfig, GameSnapshot, GameState, Outcome, Randomizer};
use blockfall::input::{handle_key_event, is_pause, is_restart, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, ViewFlags, Viewport};
use blockfall::types::{BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_MS, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about = "Falling-block puzzle in the terminal")]
struct Args {
    /// Piece sequence seed. If omitted, one is derived from the clock.
    #[arg(long)]
    seed: Option<u32>,

    /// Board width in cells.
    #[arg(long, default_value_t = BOARD_WIDTH)]
    columns: i32,

    /// Board height in cells.
    #[arg(long, default_value_t = BOARD_HEIGHT)]
    rows: i32,

    /// Milliseconds between gravity steps.
    #[arg(long, default_value_t = GRAVITY_MS)]
    gravity_ms: u32,

    /// Deal pieces from shuffled bags of seven instead of uniformly.
    #[arg(long)]
    bag7: bool,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        let randomizer = if self.bag7 {
            Randomizer::Bag7
        } else {
            Randomizer::Uniform
        };
        EngineConfig::default()
            .with_board_size(self.columns, self.rows)
            .with_gravity_ms(self.gravity_ms)
            .with_randomizer(randomizer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    Quit,
    Interrupted,
}

/// Totals reported on stderr once the terminal is restored.
#[derive(Debug, Clone, Copy)]
struct Summary {
    rounds: u32,
    pieces: u32,
    lines: u32,
    last_seed: u32,
    game_over: bool,
    reason: ExitReason,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.engine_config();
    config.validate().context("invalid board configuration")?;
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = result?;
    eprintln!(
        "blockfall: {:?} after {} round(s); last round seed {}: {} piece(s), {} line(s){}",
        summary.reason,
        summary.rounds,
        summary.last_seed,
        summary.pieces,
        summary.lines,
        if summary.game_over { ", game over" } else { "" },
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: EngineConfig, seed: u32) -> Result<Summary> {
    let mut seed = seed;
    let mut game = GameState::with_config(config, seed)?;
    let mut rounds = 1;
    let mut paused = false;

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let gravity = Duration::from_millis(config.gravity_ms as u64);
    let frame = Duration::from_millis(TICK_MS as u64);
    let mut gravity_acc = Duration::ZERO;
    let mut last_frame = Instant::now();

    let summary = |game: &GameState, rounds: u32, reason: ExitReason| Summary {
        rounds,
        pieces: game.piece_id(),
        lines: game.lines(),
        last_seed: game.seed(),
        game_over: game.game_over(),
        reason,
    };

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, ViewFlags { paused }, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        let reason = if key.modifiers.contains(event::KeyModifiers::CONTROL) {
                            ExitReason::Interrupted
                        } else {
                            ExitReason::Quit
                        };
                        return Ok(summary(&game, rounds, reason));
                    }
                    if is_restart(key) {
                        seed = seed.wrapping_add(1);
                        game = GameState::with_config(config, seed)?;
                        rounds += 1;
                        paused = false;
                        gravity_acc = Duration::ZERO;
                    } else if is_pause(key) {
                        if !game.game_over() {
                            paused = !paused;
                        }
                    } else if let Some(action) = handle_key_event(key) {
                        if !paused && game.apply_action(action).lock_event().is_some() {
                            // A fresh piece gets a full gravity period.
                            gravity_acc = Duration::ZERO;
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            if paused || game.game_over() {
                continue;
            }
            gravity_acc += elapsed;
            while gravity_acc >= gravity {
                gravity_acc -= gravity;
                if matches!(game.tick(), Outcome::ToppedOut | Outcome::Ignored) {
                    break;
                }
            }
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
