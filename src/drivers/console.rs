//! Terminal frontend: crossterm input mapped into pointer/keyboard device
//! state, and a ratatui presenter that renders the framebuffer as
//! half-block cells (two pixels per terminal cell).

use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Color as TermColor;
use thiserror::Error;

use super::{InputPump, KeyboardDevice, PointerDevice};
use crate::geometry::Rect;
use crate::input::{
    KEY_BACKSPACE, KEY_DOWN, KEY_ENTER, KEY_ESCAPE, KEY_F1, KEY_LEFT, KEY_RIGHT, KEY_TAB, KEY_UP,
    MOD_ALT, MOD_CTRL, MOD_SHIFT, MOD_SUPER, MOUSE_LEFT, MOUSE_MIDDLE, MOUSE_RIGHT,
};
use crate::palette::Color;
use crate::raster::{FrameBuffer, Raster};

/// Minimum terminal size the half-block presenter is usable at.
pub const MIN_TERM_COLS: u16 = 40;
pub const MIN_TERM_ROWS: u16 = 12;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("terminal backend error: {0}")]
    Backend(#[from] io::Error),
    #[error("terminal too small ({cols}x{rows}); need at least {MIN_TERM_COLS}x{MIN_TERM_ROWS}")]
    TooSmall { cols: u16, rows: u16 },
}

/// Error when the attached terminal is too small to show the desktop.
pub fn check_terminal_size() -> Result<(), ConsoleError> {
    let (cols, rows) = terminal::size().unwrap_or((0, 0));
    if cols < MIN_TERM_COLS || rows < MIN_TERM_ROWS {
        return Err(ConsoleError::TooSmall { cols, rows });
    }
    Ok(())
}

/// Translates terminal events into the polled pointer/keyboard model the
/// compositor consumes.
pub struct ConsoleInputDriver {
    screen_width: u32,
    screen_height: u32,
    term_cols: u16,
    term_rows: u16,
    pointer: (i32, i32),
    buttons: u8,
    prev_buttons: u8,
    keys: VecDeque<(u8, u8)>,
    last_modifiers: u8,
    quit: bool,
}

impl ConsoleInputDriver {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        let (term_cols, term_rows) = terminal::size().unwrap_or((80, 24));
        Self {
            screen_width,
            screen_height,
            term_cols: term_cols.max(1),
            term_rows: term_rows.max(1),
            pointer: (screen_width as i32 / 2, screen_height as i32 / 2),
            buttons: 0,
            prev_buttons: 0,
            keys: VecDeque::new(),
            last_modifiers: 0,
            quit: false,
        }
    }

    /// Ctrl+Q was pressed.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.apply_key(key),
            Event::Mouse(mouse) => self.apply_mouse(mouse),
            Event::Resize(cols, rows) => {
                self.term_cols = cols.max(1);
                self.term_rows = rows.max(1);
            }
            _ => {}
        }
    }

    fn apply_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }
        if let Some(code) = map_key_code(key.code) {
            self.keys.push_back((code, map_modifiers(key.modifiers)));
        }
    }

    fn apply_mouse(&mut self, mouse: MouseEvent) {
        self.pointer = self.cell_to_pixel(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => self.buttons |= button_mask(button),
            MouseEventKind::Up(button) => self.buttons &= !button_mask(button),
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {}
            _ => {}
        }
    }

    fn cell_to_pixel(&self, column: u16, row: u16) -> (i32, i32) {
        let x = column as u32 * self.screen_width / self.term_cols as u32;
        let y = row as u32 * self.screen_height / self.term_rows as u32;
        (x as i32, y as i32)
    }
}

impl InputPump for ConsoleInputDriver {
    /// Shift button-edge state, then absorb every pending terminal event.
    /// Blocks up to `budget` waiting for the first event; this is the
    /// frame pacing when the desktop is idle.
    fn pump(&mut self, budget: Duration) -> io::Result<()> {
        self.prev_buttons = self.buttons;
        if !crossterm::event::poll(budget)? {
            return Ok(());
        }
        loop {
            let event = crossterm::event::read()?;
            self.apply(event);
            if !crossterm::event::poll(Duration::from_millis(0))? {
                return Ok(());
            }
        }
    }
}

impl PointerDevice for ConsoleInputDriver {
    fn position(&self) -> (i32, i32) {
        self.pointer
    }

    fn buttons(&self) -> u8 {
        self.buttons
    }

    fn prev_buttons(&self) -> u8 {
        self.prev_buttons
    }
}

impl KeyboardDevice for ConsoleInputDriver {
    fn has_key(&self) -> bool {
        !self.keys.is_empty()
    }

    fn get_char(&mut self) -> u8 {
        match self.keys.pop_front() {
            Some((code, modifiers)) => {
                self.last_modifiers = modifiers;
                code
            }
            None => 0,
        }
    }

    fn modifiers(&self) -> u8 {
        self.last_modifiers
    }
}

fn button_mask(button: MouseButton) -> u8 {
    match button {
        MouseButton::Left => MOUSE_LEFT,
        MouseButton::Right => MOUSE_RIGHT,
        MouseButton::Middle => MOUSE_MIDDLE,
    }
}

fn map_key_code(code: KeyCode) -> Option<u8> {
    match code {
        KeyCode::Char(c) if c.is_ascii() => Some(c as u8),
        KeyCode::Enter => Some(KEY_ENTER),
        KeyCode::Backspace => Some(KEY_BACKSPACE),
        KeyCode::Tab => Some(KEY_TAB),
        KeyCode::Esc => Some(KEY_ESCAPE),
        KeyCode::Up => Some(KEY_UP),
        KeyCode::Down => Some(KEY_DOWN),
        KeyCode::Left => Some(KEY_LEFT),
        KeyCode::Right => Some(KEY_RIGHT),
        KeyCode::F(n) if (1..=12).contains(&n) => Some(KEY_F1 + n - 1),
        _ => None,
    }
}

fn map_modifiers(modifiers: KeyModifiers) -> u8 {
    let mut out = 0;
    if modifiers.contains(KeyModifiers::SHIFT) {
        out |= MOD_SHIFT;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        out |= MOD_CTRL;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        out |= MOD_ALT;
    }
    if modifiers.contains(KeyModifiers::SUPER) {
        out |= MOD_SUPER;
    }
    out
}

/// Framebuffer-backed raster that presents to the terminal on `vsync`.
/// Each terminal cell shows two vertically stacked pixels via the upper
/// half block, sampled from the framebuffer at the cell's position.
pub struct ConsoleScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    frame: FrameBuffer,
    entered: bool,
    presented_generation: u64,
}

impl ConsoleScreen {
    pub fn new(width: u32, height: u32) -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            frame: FrameBuffer::new(width, height),
            entered: false,
            presented_generation: 0,
        })
    }

    pub fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture
        )?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let pixel_width = self.frame.width();
        let pixel_height = self.frame.height();
        let frame = &self.frame;
        self.terminal
            .draw(|f| {
                let area = f.area();
                let buffer = f.buffer_mut();
                let cols = area.width.max(1) as u32;
                let rows = area.height.max(1) as u32;
                for row in 0..area.height {
                    for col in 0..area.width {
                        let px = col as u32 * pixel_width / cols;
                        let py_upper = (row as u32 * 2) * pixel_height / (rows * 2);
                        let py_lower = (row as u32 * 2 + 1) * pixel_height / (rows * 2);
                        let upper = frame.get_pixel(px as i32, py_upper as i32);
                        let lower = frame.get_pixel(px as i32, py_lower as i32);
                        if let Some(cell) =
                            buffer.cell_mut((area.x + col, area.y + row))
                        {
                            cell.set_symbol("▀");
                            cell.set_fg(map_palette_color(upper));
                            cell.set_bg(map_palette_color(lower));
                        }
                    }
                }
            })
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl Raster for ConsoleScreen {
    fn width(&self) -> u32 {
        self.frame.width()
    }

    fn height(&self) -> u32 {
        self.frame.height()
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.frame.put_pixel(x, y, color);
    }

    fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.frame.get_pixel(x, y)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.frame.fill_rect(rect, color);
    }

    /// Present the frame, skipping unchanged ones.
    fn vsync(&mut self) {
        if self.frame.generation() == self.presented_generation {
            return;
        }
        self.presented_generation = self.frame.generation();
        if let Err(err) = self.present() {
            tracing::warn!(%err, "terminal present failed");
        }
    }
}

impl Drop for ConsoleScreen {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Map a palette entry to a terminal color. With truecolor support we use
/// the palette's reference RGB; otherwise the nearest named ANSI color.
pub fn map_palette_color(color: Color) -> TermColor {
    if let Ok(var) = std::env::var("COLORTERM") {
        let lv = var.to_lowercase();
        if lv.contains("truecolor") || lv.contains("24bit") {
            let (r, g, b) = color.rgb();
            return TermColor::Rgb(r, g, b);
        }
    }
    match color {
        Color::Black => TermColor::Black,
        Color::Blue => TermColor::Blue,
        Color::Green => TermColor::Green,
        Color::Cyan => TermColor::Cyan,
        Color::Red => TermColor::Red,
        Color::Magenta => TermColor::Magenta,
        Color::Brown => TermColor::Yellow,
        Color::LightGray => TermColor::Gray,
        Color::DarkGray => TermColor::DarkGray,
        Color::LightBlue => TermColor::LightBlue,
        Color::LightGreen => TermColor::LightGreen,
        Color::LightCyan => TermColor::LightCyan,
        Color::LightRed => TermColor::LightRed,
        Color::Pink => TermColor::LightMagenta,
        Color::Yellow => TermColor::LightYellow,
        Color::White => TermColor::White,
    }
}
