//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! round.  No game logic is performed and nothing is remembered between
//! calls: drawing the same snapshot twice produces the same bytes.
//!
//! Field coordinates are scaled onto whatever terminal size the caller
//! reports through [`Viewport`].

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{Bullet, BulletOwner, GameStatus, Invader, InvaderKind, Round};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ELITE: Color = Color::Rgb { r: 0xfc, g: 0xf6, b: 0xb1 };
const C_GUARD: Color = Color::Rgb { r: 0xae, g: 0xd9, b: 0xe0 };
const C_GRUNT: Color = Color::Rgb { r: 0xff, g: 0x9b, b: 0x85 };
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_INVADER: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

pub const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

const PLAYER_SPRITE: &str = "/▲\\";

fn invader_sprite(kind: InvaderKind) -> (&'static str, Color) {
    match kind {
        InvaderKind::Elite => ("{@}", C_ELITE),
        InvaderKind::Guard => ("/#\\", C_GUARD),
        InvaderKind::Grunt => ("<o>", C_GRUNT),
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal area the field is drawn into.
///
/// Row 0 is the HUD, row 1 and row `rows - 2` are the border bars, the last
/// row holds the controls hint.  Columns 0 and `cols - 1` are the side walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn current() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(cols, rows))
    }

    fn inner_width(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_height(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Terminal cell containing a field point, clamped inside the border.
    pub fn to_cell(&self, x: f32, y: f32, config: &GameConfig) -> (u16, u16) {
        let w = self.inner_width();
        let h = self.inner_height();
        let col = (x / config.field_width * w).floor().clamp(0.0, w - 1.0) as u16;
        let row = (y / config.field_height * h).floor().clamp(0.0, h - 1.0) as u16;
        (col + 1, row + 2)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
///
/// A round still on the title screen draws only the title.
pub fn render<W: Write>(out: &mut W, state: &Round, vp: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if state.status == GameStatus::StartScreen {
        draw_title(out, vp)?;
        return finish_frame(out, vp);
    }

    draw_border(out, vp)?;
    draw_hud(out, state, vp)?;

    for invader in &state.invaders {
        draw_invader(out, invader, &state.config, vp)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, bullet, &state.config, vp)?;
    }

    draw_player(out, state, vp)?;
    draw_controls_hint(out, vp)?;

    match state.status {
        GameStatus::GameOver => draw_end_banner(out, vp, "GAME  OVER", Color::Red, state.score)?,
        GameStatus::Win => draw_end_banner(out, vp, "YOU  WIN!", Color::Green, state.score)?,
        GameStatus::Playing | GameStatus::StartScreen => {}
    }

    finish_frame(out, vp)
}

/// Park the cursor in a harmless spot and flush.
fn finish_frame<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let h = vp.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &Round, vp: Viewport) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("SCORE {:04}", state.score)))?;

    // Lives — right
    let hearts: String = "♥".repeat(state.lives as usize);
    let lives_text = format!("LIVES {}", hearts);
    let rx = vp.cols.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Print `sprite` centred on the field point `(cx, y)`, kept inside the walls.
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: Viewport,
    config: &GameConfig,
    (cx, y): (f32, f32),
    sprite: &str,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = vp.to_cell(cx, y, config);
    let len = sprite.chars().count() as u16;
    let max_start = vp.cols.saturating_sub(1 + len).max(1);
    let start = col.saturating_sub(len / 2).clamp(1, max_start);
    out.queue(cursor::MoveTo(start, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &Round, vp: Viewport) -> std::io::Result<()> {
    let config = &state.config;
    let p = &state.player;
    let centre = (p.x + config.player_width / 2.0, p.y);
    draw_sprite(out, vp, config, centre, PLAYER_SPRITE, C_PLAYER)
}

fn draw_invader<W: Write>(
    out: &mut W,
    invader: &Invader,
    config: &GameConfig,
    vp: Viewport,
) -> std::io::Result<()> {
    let (sprite, color) = invader_sprite(invader.kind);
    let centre = (invader.x + config.invader_width / 2.0, invader.y);
    draw_sprite(out, vp, config, centre, sprite, color)
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Bullet,
    config: &GameConfig,
    vp: Viewport,
) -> std::io::Result<()> {
    let (col, row) = vp.to_cell(bullet.x, bullet.y, config);
    out.queue(cursor::MoveTo(col, row))?;
    match bullet.owner {
        BulletOwner::Player => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("║"))?;
        }
        BulletOwner::Invader => {
            out.queue(style::SetForegroundColor(C_BULLET_INVADER))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    vp: Viewport,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = vp.cols / 2;
    let start_row = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_end_banner<W: Write>(
    out: &mut W,
    vp: Viewport,
    title: &str,
    color: Color,
    score: u32,
) -> std::io::Result<()> {
    let lines = [
        ("╔══════════════════╗".to_string(), color),
        (format!("║{:^18}║", title), color),
        ("╚══════════════════╝".to_string(), color),
        (format!("Final Score: {:04}", score), Color::Yellow),
        ("ENTER / R - Play Again   Q - Quit".to_string(), Color::White),
    ];
    draw_centered(out, vp, &lines)
}

fn draw_title<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    let lines = [
        ("★  SPACE  INVADERS  ★".to_string(), Color::Cyan),
        (String::new(), C_HINT),
        ("{@} = 30   /#\\ = 20   <o> = 10".to_string(), Color::White),
        (String::new(), C_HINT),
        (CONTROLS_HINT.to_string(), C_HINT),
        ("Press ENTER to start".to_string(), Color::Yellow),
    ];
    draw_centered(out, vp, &lines)
}
