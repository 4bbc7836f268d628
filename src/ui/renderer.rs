/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// The simulation runs in a fixed 1024×768 world regardless of terminal
/// size; the renderer scales world coordinates down to whatever grid the
/// terminal offers. Each frame:
///   1. Build the next frame into the `front` buffer
///   2. Diff against `back` (the previous frame)
///   3. Emit terminal commands only for cells that changed
///   4. Batch with `queue!`, flush once, swap buffers
///
/// This eliminates the flicker of full-screen redraws.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::catalog::{WORLD_H, WORLD_W};
use crate::domain::entity::BossPhase;
use crate::domain::physics::Body;
use crate::sim::world::{Phase, WorldState};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells, so the
    /// inter-row gap pixels on VTE terminals match the cell color exactly.
    const BASE_BG: Color = Color::Rgb { r: 18, g: 18, b: 30 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel that differs from any real cell, forcing a full repaint.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::new(ch, fg, bg));
            cx += 1;
        }
    }

    fn fill_row(&mut self, y: usize, fg: Color, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', fg, bg));
        }
    }
}

// ── Layout ──

const HUD_ROW: usize = 0;
const FIELD_ROW: usize = 1;
/// Rows reserved below the playfield: message bar + help bar.
const BOTTOM_ROWS: usize = 2;

/// Per-level playfield tint and platform color. The five levels reuse the
/// same mechanics but read differently at a glance.
fn level_theme(level: usize) -> (Color, Color) {
    match level {
        1 => (Color::Rgb { r: 18, g: 22, b: 38 }, Color::Rgb { r: 90, g: 110, b: 160 }),
        2 => (Color::Rgb { r: 16, g: 28, b: 24 }, Color::Rgb { r: 70, g: 140, b: 100 }),
        3 => (Color::Rgb { r: 30, g: 22, b: 16 }, Color::Rgb { r: 160, g: 110, b: 60 }),
        4 => (Color::Rgb { r: 28, g: 16, b: 28 }, Color::Rgb { r: 140, g: 80, b: 150 }),
        _ => (Color::Rgb { r: 32, g: 16, b: 16 }, Color::Rgb { r: 170, g: 70, b: 70 }),
    }
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Phase change → full clear for a clean transition.
        let phase_changed = self.last_phase != Some(world.phase);
        if phase_changed {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(world.phase);
        }

        self.front.clear();

        match world.phase {
            Phase::Title => self.compose_title(world),
            Phase::Playing => self.compose_game(world),
            Phase::Victory => {
                self.compose_game(world);
                self.compose_victory_banner(world);
            }
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colors at start of frame. No ResetColor here: the
        // terminal's native default may differ from BASE_BG and cause
        // line artifacts.
        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                let prev = self.back.get(x, y);

                if cell == prev {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── World → screen projection ──

    fn field_size(&self) -> (usize, usize) {
        let w = self.term_w;
        let h = self.term_h.saturating_sub(FIELD_ROW + BOTTOM_ROWS).max(1);
        (w, h)
    }

    /// Project a world rectangle to a screen cell range, inclusive of at
    /// least one cell so thin bodies never vanish.
    fn project_rect(
        &self,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        shake_dx: i32,
    ) -> (usize, usize, usize, usize) {
        let (fw, fh) = self.field_size();
        let sx = |wx: f32| ((wx / WORLD_W) * fw as f32) as i32 + shake_dx;
        let sy = |wy: f32| ((wy / WORLD_H) * fh as f32) as i32;

        let x0 = sx(left).clamp(0, fw as i32 - 1) as usize;
        let x1 = sx(right).clamp(0, fw as i32 - 1).max(x0 as i32) as usize;
        let y0 = sy(top).clamp(0, fh as i32 - 1) as usize;
        let y1 = sy(bottom).clamp(0, fh as i32 - 1).max(y0 as i32) as usize;
        (x0, x1, y0, y1)
    }

    fn fill_body(&mut self, body: &Body, ch: char, fg: Color, bg: Color, shake_dx: i32) {
        let (x0, x1, y0, y1) =
            self.project_rect(body.left(), body.top(), body.right(), body.bottom(), shake_dx);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.front.set(x, FIELD_ROW + y, Cell::new(ch, fg, bg));
            }
        }
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, w: &WorldState) {
        let (field_bg, platform_fg) = level_theme(w.level);

        // Side-contact feedback: jitter the whole playfield one column.
        let shake_dx = if w.shake_ticks > 0 {
            if w.tick % 2 == 0 { 1 } else { -1 }
        } else {
            0
        };

        // ── Playfield backdrop ──
        let (_, fh) = self.field_size();
        for y in 0..fh {
            self.front.fill_row(FIELD_ROW + y, Color::White, field_bg);
        }

        // ── Platforms ──
        for plat in &w.platforms {
            let (x0, x1, y0, y1) =
                self.project_rect(plat.left(), plat.top(), plat.right(), plat.bottom(), shake_dx);
            for y in y0..=y1 {
                for x in x0..=x1 {
                    let ch = if y == y0 { '▀' } else { '█' };
                    self.front.set(x, FIELD_ROW + y, Cell::new(ch, platform_fg, field_bg));
                }
            }
        }

        // ── Capacitors ──
        let cap_fg = Color::Rgb { r: 255, g: 220, b: 60 };
        for cap in &w.capacitors {
            self.fill_body(&cap.body, '◆', cap_fg, field_bg, shake_dx);
        }

        // ── Boss ──
        if let Some(boss) = &w.boss {
            if boss.phase != BossPhase::Defeated {
                let fg = if boss.flash_ticks > 0 && w.tick % 2 == 0 {
                    Color::White
                } else {
                    Color::Rgb { r: 255, g: 80, b: 80 }
                };
                self.fill_body(&boss.body, '▓', fg, field_bg, shake_dx);
            }
        }

        // ── Player ──
        let player_fg = if w.player.flash_ticks > 0 && w.tick % 2 == 0 {
            Color::Rgb { r: 255, g: 60, b: 60 }
        } else {
            Color::Rgb { r: 90, g: 220, b: 255 }
        };
        self.fill_body(&w.player.body, '@', player_fg, field_bg, shake_dx);

        // ── Debug body overlay ──
        if w.debug_bodies {
            self.compose_debug_overlay(w, shake_dx);
        }

        // ── HUD row ──
        let hud_bg = Color::Rgb { r: 20, g: 20, b: 60 };
        self.front.fill_row(HUD_ROW, Color::White, hud_bg);
        let hud = match w.boss_line() {
            Some(boss) => format!(
                " {}  {}  {}  {} ",
                w.level_line(), w.score_line(), w.money_line(), boss,
            ),
            None => format!(" {}  {}  {} ", w.level_line(), w.score_line(), w.money_line()),
        };
        self.front.put_str(0, HUD_ROW, &hud, Color::White, hud_bg);

        // ── Message bar ──
        let msg_row = self.term_h.saturating_sub(2);
        if !w.message.is_empty() {
            let msg_bg = Color::Rgb { r: 200, g: 180, b: 50 };
            self.front.fill_row(msg_row, Color::Black, msg_bg);
            let msg = format!(" ◈ {} ◈ ", w.message);
            let cx = self.term_w.saturating_sub(msg.chars().count()) / 2;
            self.front.put_str(cx, msg_row, &msg, Color::Black, msg_bg);
        }

        // ── Help bar ──
        let help_row = self.term_h.saturating_sub(1);
        let help = " ←→/A D:Move  Space:Jump×2  ↑:Jump  R:Restart  B:Bodies  ESC:Title";
        self.front.put_str(0, help_row, help, Color::DarkGrey, Cell::BASE_BG);
    }

    /// Outline every collision body in magenta, with a live readout of the
    /// player body in the corner.
    fn compose_debug_overlay(&mut self, w: &WorldState, shake_dx: i32) {
        let dbg = Color::Rgb { r: 255, g: 100, b: 255 };

        let outline = |r: &mut Self, left: f32, top: f32, right: f32, bottom: f32| {
            let (x0, x1, y0, y1) = r.project_rect(left, top, right, bottom, shake_dx);
            for x in x0..=x1 {
                let top_cell = r.front.get(x, FIELD_ROW + y0);
                r.front.set(x, FIELD_ROW + y0, Cell::new('·', dbg, top_cell.bg));
                let bot_cell = r.front.get(x, FIELD_ROW + y1);
                r.front.set(x, FIELD_ROW + y1, Cell::new('·', dbg, bot_cell.bg));
            }
            for y in y0..=y1 {
                let l_cell = r.front.get(x0, FIELD_ROW + y);
                r.front.set(x0, FIELD_ROW + y, Cell::new('·', dbg, l_cell.bg));
                let r_cell = r.front.get(x1, FIELD_ROW + y);
                r.front.set(x1, FIELD_ROW + y, Cell::new('·', dbg, r_cell.bg));
            }
        };

        let p = w.player.body;
        outline(self, p.left(), p.top(), p.right(), p.bottom());
        for cap in &w.capacitors {
            let b = cap.body;
            outline(self, b.left(), b.top(), b.right(), b.bottom());
        }
        if let Some(boss) = &w.boss {
            let b = boss.body;
            outline(self, b.left(), b.top(), b.right(), b.bottom());
        }

        let readout = format!(
            " x:{:>6.1} y:{:>6.1} vx:{:>6.1} vy:{:>6.1} ground:{} jumps:{} ",
            p.x, p.y, p.vx, p.vy, p.on_ground, w.player.jumps_remaining,
        );
        let rx = self.term_w.saturating_sub(readout.chars().count());
        self.front.put_str(rx, FIELD_ROW, &readout, dbg, Cell::BASE_BG);
    }

    // ── Static screens ──

    fn compose_title(&mut self, w: &WorldState) {
        let title = [
            r" __   __    _  _     ___                          ",
            r" \ \ / /__ | || |_  | _ \ _  _  _ _   _ _   ___  _ _ ",
            r"  \ V / _ \| ||  _| |   /| || || ' \ | ' \ / -_)| '_|",
            r"   \_/\___/|_| \__| |_|_\ \_,_||_||_||_||_|\___||_|  ",
        ];

        for (i, line) in title.iter().enumerate() {
            self.front.put_str(2, 2 + i, line, Color::Rgb { r: 255, g: 220, b: 60 }, Cell::BASE_BG);
        }

        let subtitle = "⚡  The Electrician's Last Job  ⚡";
        let sx = 2 + (title[1].len().saturating_sub(subtitle.chars().count())) / 2;
        self.front.put_str(sx, 7, subtitle, Color::Rgb { r: 90, g: 220, b: 255 }, Cell::BASE_BG);

        let tagline = "━━━ Terminal Edition (Rust) ━━━";
        let tx = 2 + (title[1].len().saturating_sub(tagline.chars().count())) / 2;
        self.front.put_str(tx, 9, tagline, Color::Rgb { r: 180, g: 140, b: 50 }, Cell::BASE_BG);

        let menu_base = 12;
        let hi = Color::Rgb { r: 80, g: 255, b: 80 };
        self.front.put_str(8, menu_base, "ENTER   Start", hi, Cell::BASE_BG);
        self.front.put_str(8, menu_base + 1, "  Q     Quit", Color::White, Cell::BASE_BG);

        let help = [
            "Controls",
            "  ←→ / A D     Move",
            "  SPACE        Jump (double jump in the air)",
            "  ↑ / W        Jump (grounded)",
            "  R            Restart level",
            "  B            Show collision bodies",
            "  ESC          Back to title",
        ];
        let help_base = menu_base + 3;
        for (i, line) in help.iter().enumerate() {
            let color = if i == 0 {
                Color::Rgb { r: 255, g: 220, b: 60 }
            } else {
                Color::White
            };
            self.front.put_str(8, help_base + i, line, color, Cell::BASE_BG);
        }

        let goal = "Collect every capacitor. Five sites. One boss on the roof.";
        self.front.put_str(8, help_base + help.len() + 1, goal, Color::DarkGrey, Cell::BASE_BG);

        if !w.message.is_empty() {
            let msg_row = self.term_h.saturating_sub(1);
            let msg = format!(" ◈ {} ", w.message);
            self.front.put_str(0, msg_row, &msg, Color::Black, Color::Rgb { r: 200, g: 180, b: 50 });
        }
    }

    fn compose_victory_banner(&mut self, w: &WorldState) {
        let border = "╔═══════════════════════════════╗";
        let middle = "║    ★  BOSS  DEFEATED  ★       ║";
        let reward = format!("║    Payout: {:<18} ║", w.money_line());
        let bottom = "╚═══════════════════════════════╝";

        let cy = (self.term_h / 2).saturating_sub(2);
        let cx = self.term_w.saturating_sub(border.chars().count()) / 2;
        let fg = Color::Rgb { r: 255, g: 220, b: 50 };
        let bg = Color::Rgb { r: 20, g: 60, b: 20 };
        self.front.put_str(cx, cy, border, fg, bg);
        self.front.put_str(cx, cy + 1, middle, fg, bg);
        self.front.put_str(cx, cy + 2, &reward, Color::Rgb { r: 80, g: 255, b: 80 }, bg);
        self.front.put_str(cx, cy + 3, bottom, fg, bg);
    }
}
