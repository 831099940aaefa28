use crate::app::{App, ScreenState};
use crate::game::format_time;
use crate::stats::StatsManager;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io;
use wirehack_core::{Port, PortSet};

/// Screen cells per tile (glyph plus padding)
const CELL_WIDTH: u16 = 4;

/// Three-character glyph for a tile's open ports
fn tile_glyph(ports: PortSet) -> &'static str {
    let has = |p| ports.contains(p);
    match (
        has(Port::North),
        has(Port::East),
        has(Port::South),
        has(Port::West),
    ) {
        (false, true, false, true) => "───",
        (true, false, true, false) => " │ ",
        (true, true, false, false) => " └─",
        (false, true, true, false) => " ┌─",
        (false, false, true, true) => "─┐ ",
        (true, false, false, true) => "─┘ ",
        _ => " ? ",
    }
}

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    execute!(stdout, Hide, Clear(ClearType::All))?;

    match app.screen_state {
        ScreenState::Playing => render_board(stdout, app)?,
        ScreenState::Win => {
            render_board(stdout, app)?;
            render_win_banner(stdout, app)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_board(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let config = app.session.config();
    let hack = app.session.hack();

    let origin_x: u16 = 4;
    let mut y: u16 = 1;

    execute!(
        stdout,
        MoveTo(origin_x, y),
        SetForegroundColor(theme.info),
        Print(format!(
            "WIRE PANEL {}x{} · {} wires · seed {}",
            config.rows(),
            config.columns(),
            config.wires(),
            app.session.seed()
        ))
    )?;
    y += 2;

    for wire in 0..config.wires() {
        let lit = wirehack_core::is_wire_lit(hack.wire(wire).expect("wire in range"));
        let label_color = if lit { theme.success } else { theme.unlit };
        execute!(
            stdout,
            MoveTo(origin_x, y),
            SetForegroundColor(label_color),
            Print(format!("wire {} [{}]", wire, if lit { "LIVE" } else { "DEAD" }))
        )?;
        y += 1;

        for row in 0..config.rows() {
            // Entry edge marker
            execute!(
                stdout,
                MoveTo(origin_x, y),
                SetForegroundColor(theme.lit),
                Print(">")
            )?;

            for col in 0..config.columns() {
                let tile = hack.tile(wire, row, col).unwrap_or_default();
                let tile_lit = hack.is_lit(wire, row, col).unwrap_or(false);
                let selected = wire == app.cursor_wire
                    && row == app.cursor_row
                    && col == app.cursor_col;

                let fg = if tile_lit { theme.lit } else { theme.unlit };
                let x = origin_x + 2 + col as u16 * CELL_WIDTH;
                if selected {
                    execute!(stdout, SetBackgroundColor(theme.cursor_bg))?;
                }
                execute!(
                    stdout,
                    MoveTo(x, y),
                    SetForegroundColor(fg),
                    Print(tile_glyph(tile.open_ports()))
                )?;
                if selected {
                    execute!(stdout, ResetColor)?;
                }
            }

            // Exit edge marker on the last column
            let exit_x = origin_x + 2 + config.columns() as u16 * CELL_WIDTH + 1;
            let exit_color = if lit { theme.success } else { theme.border };
            execute!(
                stdout,
                MoveTo(exit_x, y),
                SetForegroundColor(exit_color),
                Print(">")
            )?;
            y += 1;
        }
        y += 1;
    }

    render_progress_bar(stdout, app, origin_x, y)?;
    y += 2;

    execute!(
        stdout,
        MoveTo(origin_x, y),
        SetForegroundColor(theme.info),
        Print(format!(
            "time {}  moves {}  lit {}/{}",
            format_time(app.session.elapsed().as_secs_f32()),
            app.session.moves(),
            hack.lit_wire_count(),
            config.wires()
        ))
    )?;
    y += 1;

    if let Some(best) = app.stats.best_for(config) {
        execute!(
            stdout,
            MoveTo(origin_x, y),
            SetForegroundColor(theme.border),
            Print(format!("best {}", format_time(best)))
        )?;
    }
    y += 2;

    execute!(
        stdout,
        MoveTo(origin_x, y),
        SetForegroundColor(theme.key),
        Print("arrows/hjkl move · space rotate · r re-lock · n new · q quit")
    )?;

    if let Some(ref message) = app.message {
        execute!(
            stdout,
            MoveTo(origin_x, y + 2),
            SetForegroundColor(app.theme.success),
            Print(message)
        )?;
    }

    Ok(())
}

fn render_progress_bar(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    const WIDTH: usize = 32;
    let fraction = app.session.displayed_progress().clamp(0.0, 1.0);
    let filled = (fraction * WIDTH as f32).round() as usize;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.border),
        Print("[")
    )?;
    execute!(
        stdout,
        SetForegroundColor(theme.lit),
        Print("█".repeat(filled))
    )?;
    execute!(
        stdout,
        SetForegroundColor(theme.border),
        Print("░".repeat(WIDTH - filled)),
        Print(format!("] {:3.0}%", fraction * 100.0))
    )?;
    Ok(())
}

fn render_win_banner(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let secs = app.session.elapsed().as_secs_f32();
    let record = app
        .stats
        .by_size
        .get(&StatsManager::size_key(app.session.config()));

    let y: u16 = 0;
    execute!(
        stdout,
        MoveTo(4, y),
        SetForegroundColor(theme.success),
        Print(format!(
            ">>> ACCESS GRANTED in {} ({} moves){} <<<",
            format_time(secs),
            app.session.moves(),
            if app.session.is_fast_hack() {
                " · FAST HACK"
            } else {
                ""
            }
        ))
    )?;
    if let Some(record) = record {
        execute!(
            stdout,
            MoveTo(4, y + 1),
            SetForegroundColor(theme.info),
            Print(format!(
                "best {} · {} fast of {} hacks · n new, r re-lock, q quit",
                record
                    .best_secs
                    .map(format_time)
                    .unwrap_or_else(|| "-".to_string()),
                record.fast_hacks,
                record.hacks
            ))
        )?;
    }
    Ok(())
}
