use std::time::Duration;

use clap::Parser;
use indoc::indoc;

use pixel_wm::apps::{AppKind, AppTable, ContentProvider};
use pixel_wm::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use pixel_wm::desktop::Desktop;
use pixel_wm::drivers::console::{
    ConsoleError, ConsoleInputDriver, ConsoleScreen, check_terminal_size,
};
use pixel_wm::drivers::{KeyboardDevice, PointerDevice};
use pixel_wm::event_loop::{ControlFlow, EventLoop};
use pixel_wm::geometry::Rect;
use pixel_wm::icons;
use pixel_wm::input::{KEY_BACKSPACE, KEY_ENTER, KEY_ESCAPE};
use pixel_wm::palette::Color;
use pixel_wm::raster::Raster;
use pixel_wm::theme::Theme;
use pixel_wm::tracing_sub;
use pixel_wm::widgets::WidgetAction;
use pixel_wm::window::{Window, chrome};

#[derive(Parser, Debug)]
#[command(
    name = "pixel-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "A retro pixel desktop compositor running in your terminal"
)]
struct Cli {
    /// Desktop theme: 0 = teal, 1 = gray, 2 = blue.
    #[arg(short, long, default_value_t = 0)]
    theme: u8,

    /// Frame poll interval in milliseconds.
    #[arg(short = 'i', long = "interval", value_name = "MS", default_value_t = 16)]
    poll_interval_ms: u64,
}

fn main() -> Result<(), ConsoleError> {
    let cli = Cli::parse();
    tracing_sub::init_default();
    check_terminal_size()?;

    let mut desk = Desktop::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    desk.theme = Theme::from_index(cli.theme);
    desk.icons = icons::default_icons();

    let mut apps = AppTable::new();
    apps.register(AppKind::Notepad, Box::new(Notepad::new()));
    apps.register(AppKind::Calculator, Box::new(Calculator::new()));
    apps.register(AppKind::About, Box::new(About));

    // The About window carries an OK button; create the window up front
    // (hidden) so the button can attach to its id.
    if let Some(about) = apps.launch(AppKind::About, &mut desk.windows) {
        desk.windows.show(about, false);
        desk.widgets.create_in_window(
            about,
            Rect::new(110, 130, 60, 22),
            "OK",
            WidgetAction::CloseOwner,
        );
    }

    let mut screen = ConsoleScreen::new(SCREEN_WIDTH, SCREEN_HEIGHT)?;
    screen.enter()?;

    let driver = ConsoleInputDriver::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut event_loop = EventLoop::new(driver, Duration::from_millis(cli.poll_interval_ms));

    let result = event_loop.run(|driver| {
        if driver.quit_requested() {
            return Ok(ControlFlow::Quit);
        }
        let sample = driver.sample();
        let key = match driver.get_char() {
            0 => None,
            code => Some((code, driver.modifiers())),
        };
        desk.update(&mut apps, sample, key);
        desk.present(&mut screen, &mut apps);
        Ok(ControlFlow::Continue)
    });

    screen.exit()?;
    result?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Demo content providers. Deliberately tiny: they exist to exercise key and
// click routing, not to be real applications.

struct Notepad {
    buffer: String,
}

impl Notepad {
    fn new() -> Self {
        Self {
            buffer: "Welcome to Notepad!\nType here...".to_string(),
        }
    }
}

impl ContentProvider for Notepad {
    fn draw(&mut self, raster: &mut dyn Raster, win: &Window) {
        let content = chrome::content_rect(win);
        raster.fill_rect(content, Color::White);
        let max_cols = (content.width.saturating_sub(16) / 8) as usize;
        let max_rows = (content.height.saturating_sub(16) / 12) as usize;
        for (row, line) in self.buffer.lines().take(max_rows).enumerate() {
            let clipped: String = line.chars().take(max_cols).collect();
            raster.put_string(
                content.x + 8,
                content.y + 8 + row as i32 * 12,
                &clipped,
                Color::Black,
                Color::White,
            );
        }
    }

    fn handle_key(&mut self, key: u8) {
        match key {
            KEY_BACKSPACE => {
                self.buffer.pop();
            }
            KEY_ENTER => self.buffer.push('\n'),
            key if (0x20..0x7F).contains(&key) => self.buffer.push(key as char),
            _ => {}
        }
    }
}

struct Calculator {
    display: String,
    accumulator: i64,
    op: Option<u8>,
}

impl Calculator {
    fn new() -> Self {
        Self {
            display: String::new(),
            accumulator: 0,
            op: None,
        }
    }

    fn operand(&self) -> i64 {
        self.display.parse().unwrap_or(0)
    }

    fn apply(&mut self) {
        let rhs = self.operand();
        self.accumulator = match self.op {
            None => rhs,
            Some(b'+') => self.accumulator + rhs,
            Some(b'-') => self.accumulator - rhs,
            Some(b'*') => self.accumulator * rhs,
            Some(b'/') if rhs != 0 => self.accumulator / rhs,
            Some(_) => self.accumulator,
        };
        self.display.clear();
    }
}

impl ContentProvider for Calculator {
    fn draw(&mut self, raster: &mut dyn Raster, win: &Window) {
        let content = chrome::content_rect(win);
        raster.fill_rect(content, Color::LightGray);

        let display = Rect::new(
            content.x + 8,
            content.y + 8,
            content.width.saturating_sub(16),
            20,
        );
        raster.fill_rect(display, Color::White);
        raster.rect(display, Color::Black);
        let shown = if self.display.is_empty() {
            self.accumulator.to_string()
        } else {
            self.display.clone()
        };
        raster.put_string(display.x + 4, display.y + 6, &shown, Color::Black, Color::White);

        raster.put_string(
            content.x + 8,
            display.bottom() + 8,
            "keys: 0-9 + - * / =",
            Color::DarkGray,
            Color::LightGray,
        );
    }

    fn handle_key(&mut self, key: u8) {
        match key {
            b'0'..=b'9' if self.display.len() < 12 => self.display.push(key as char),
            b'+' | b'-' | b'*' | b'/' => {
                self.apply();
                self.op = Some(key);
            }
            b'=' | KEY_ENTER => {
                self.apply();
                self.op = None;
            }
            b'c' | KEY_ESCAPE => {
                self.display.clear();
                self.accumulator = 0;
                self.op = None;
            }
            _ => {}
        }
    }
}

struct About;

const ABOUT_TEXT: &str = indoc! {"
    pixel-wm

    Drag windows by their title bars.
    Click the desktop icons to launch
    apps, or use the Start menu.

    Alt+F4 closes the active window.
    Ctrl+Q quits.
"};

impl ContentProvider for About {
    fn draw(&mut self, raster: &mut dyn Raster, win: &Window) {
        let content = chrome::content_rect(win);
        for (row, line) in ABOUT_TEXT.lines().enumerate() {
            raster.put_string(
                content.x + 12,
                content.y + 10 + row as i32 * 12,
                line,
                Color::Black,
                Color::LightGray,
            );
        }
    }
}
