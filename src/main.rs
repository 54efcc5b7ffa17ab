use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use invaders::compute::{begin, restart, tick, title_round};
use invaders::config::GameConfig;
use invaders::display::{self, Viewport};
use invaders::entities::GameStatus;
use invaders::input::KeyTracker;
use invaders::snapshot;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

#[derive(Parser)]
#[command(name = "invaders")]
#[command(about = "Space Invaders in the terminal")]
struct Args {
    /// JSON file overriding any subset of the game constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the invader fire rolls (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs rounds until the player quits, starting from the title screen.
///
/// Key state lives in a [`KeyTracker`]; each frame it is frozen into a
/// `TickInput` before the simulation step runs.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    rng: &mut impl Rng,
) -> std::io::Result<()> {
    let mut state = title_round(config);
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    if is_quit(code, modifiers) {
                        return Ok(());
                    }
                    if state.status == GameStatus::StartScreen
                        && matches!(code, KeyCode::Enter | KeyCode::Char(' '))
                    {
                        state = begin(&state);
                        keys.clear();
                        continue;
                    }
                    if state.status.is_terminal()
                        && matches!(code, KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R'))
                    {
                        state = restart(&state);
                        keys.clear();
                        continue;
                    }
                    keys.press(code, frame);
                }
                KeyEventKind::Repeat => keys.repeat(code, frame),
                // Keyboard-enhancement terminals only
                KeyEventKind::Release => keys.release(code),
            }
        }

        let input = keys.take_input(frame);
        if state.status == GameStatus::Playing {
            let next = tick(&state, &input, rng);
            let changes = snapshot::diff(&state, &next);
            if !changes.destroyed_invaders.is_empty() || changes.lives_lost > 0 {
                debug!(
                    tick = next.tick,
                    destroyed = ?changes.destroyed_invaders,
                    score_gained = changes.score_gained,
                    lives_lost = changes.lives_lost,
                    "frame changes"
                );
            }
            state = next;
        }

        display::render(out, &state, Viewport::current()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    // Stderr belongs to the game screen; without a file nothing is logged.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?args.seed, custom_config = args.config.is_some(), "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    info!("exited");
    Ok(())
}
