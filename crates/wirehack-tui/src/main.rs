mod app;
mod game;
mod render;
mod stats;
mod theme;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use wirehack_core::HackConfig;

/// Wire-hacking minigame for the terminal
#[derive(Parser)]
#[command(name = "wirehack", version, about)]
struct Args {
    /// Rows per wire (1-3)
    #[arg(long, default_value_t = 2)]
    rows: usize,
    /// Columns per wire (3-8)
    #[arg(long, default_value_t = 5)]
    columns: usize,
    /// Number of wires (1-4)
    #[arg(long, default_value_t = 3)]
    wires: usize,
    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = HackConfig::new(args.rows, args.columns, args.wires);
    let seed = args.seed.unwrap_or_else(rand::random);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, App::new(config, seed));

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with timeout for progress-bar updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
        }

        // Tick the session clock and message timers
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
