//! The desktop panel: menu bar strip, taskbar, start button, clock, and
//! the start menu.
//!
//! The panel owns the start-menu open flag and the row layout; the router
//! asks it for hit tests, the redraw scheduler asks it to paint.

use crate::apps::AppKind;
use crate::constants::{
    MENU_BAR_HEIGHT, MENU_ITEM_HEIGHT, START_BUTTON_HEIGHT, START_BUTTON_WIDTH, START_MENU_HEIGHT,
    START_MENU_WIDTH, TASKBAR_HEIGHT,
};
use crate::geometry::Rect;
use crate::palette::Color;
use crate::raster::Raster;
use crate::theme::{self, Theme};

/// One start-menu row.
#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub app: AppKind,
}

#[derive(Debug)]
pub struct Panel {
    menu_open: bool,
    entries: Vec<MenuEntry>,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    /// Stock menu: six launchable apps, filling the panel's rows exactly.
    pub fn new() -> Self {
        let entries = [
            AppKind::Browser,
            AppKind::Files,
            AppKind::Notepad,
            AppKind::Terminal,
            AppKind::Calculator,
            AppKind::Settings,
        ]
        .into_iter()
        .map(|app| MenuEntry { app })
        .collect();
        Self {
            menu_open: false,
            entries,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        tracing::debug!(open = self.menu_open, "start menu toggled");
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Menu entry under the pointer, when the menu is open.
    pub fn menu_hit(&self, screen_height: u32, x: i32, y: i32) -> Option<AppKind> {
        if !self.menu_open {
            return None;
        }
        let rect = menu_rect(screen_height);
        if !rect.contains(x, y) {
            return None;
        }
        let row = ((y - rect.y) as u32 / MENU_ITEM_HEIGHT) as usize;
        self.entries.get(row).map(|entry| entry.app)
    }

    /// Paint the top menu bar strip.
    pub fn draw_menu_bar(&self, raster: &mut dyn Raster) {
        let width = raster.width();
        raster.fill_rect(Rect::new(0, 0, width, MENU_BAR_HEIGHT), theme::taskbar_bg());
        raster.hline(0, MENU_BAR_HEIGHT as i32 - 1, width, Color::Black);
        raster.put_string(4, 2, "Desktop", Color::Black, theme::taskbar_bg());
    }

    /// Paint the taskbar: raised top border, start button, sunken clock.
    pub fn draw_taskbar(&self, raster: &mut dyn Raster) {
        let width = raster.width();
        let bar = taskbar_rect(width, raster.height());
        raster.fill_rect(bar, theme::taskbar_bg());
        raster.hline(0, bar.y, width, Color::White);
        raster.hline(0, bar.y + 1, width, Color::White);

        self.draw_start_button(raster);
        self.draw_clock(raster);
    }

    fn draw_start_button(&self, raster: &mut dyn Raster) {
        let rect = start_button_rect(raster.height());
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = rect;

        raster.fill_rect(rect, theme::button_bg());
        raster.hline(x, y, w, Color::White);
        raster.vline(x, y, h, Color::White);
        raster.hline(x, rect.bottom() - 1, w, Color::Black);
        raster.vline(rect.right() - 1, y, h, Color::Black);
        raster.hline(x + 1, rect.bottom() - 2, w - 2, Color::DarkGray);
        raster.vline(rect.right() - 2, y + 1, h - 2, Color::DarkGray);

        // Four-square logo
        raster.fill_rect(Rect::new(x + 5, y + 5, 5, 5), Color::Red);
        raster.fill_rect(Rect::new(x + 5, y + 11, 5, 5), Color::Blue);
        raster.fill_rect(Rect::new(x + 11, y + 5, 5, 5), Color::Green);
        raster.fill_rect(Rect::new(x + 11, y + 11, 5, 5), Color::Yellow);

        raster.put_string(x + 20, y + 7, "Start", Color::Black, theme::button_bg());
    }

    fn draw_clock(&self, raster: &mut dyn Raster) {
        let width = raster.width() as i32;
        let bar = taskbar_rect(raster.width(), raster.height());
        let x = width - 60;
        let y = bar.y + 3;
        let h = START_BUTTON_HEIGHT;

        raster.fill_rect(Rect::new(x, y, 56, h), theme::taskbar_bg());
        raster.hline(x, y, 56, Color::DarkGray);
        raster.vline(x, y, h, Color::DarkGray);
        raster.hline(x + 1, y + 1, 54, Color::Black);
        raster.vline(x + 1, y + 1, h - 2, Color::Black);
        raster.hline(x, y + h as i32 - 1, 56, Color::White);
        raster.vline(x + 55, y, h, Color::White);
        raster.put_string(x + 8, y + 7, "12:00", Color::Black, theme::taskbar_bg());
    }

    /// Paint the open start menu panel.
    pub fn draw_menu(&self, raster: &mut dyn Raster) {
        if !self.menu_open {
            return;
        }
        let rect = menu_rect(raster.height());
        raster.fill_rect(rect, theme::menu_bg());
        raster.rect(rect, Color::Black);
        for (row, entry) in self.entries.iter().enumerate() {
            let item_y = rect.y + row as i32 * MENU_ITEM_HEIGHT as i32;
            raster.put_string(
                rect.x + 8,
                item_y + 6,
                entry.app.label(),
                theme::menu_fg(),
                theme::menu_bg(),
            );
        }
    }

    /// Paint `theme`'s desktop background across the work area (between
    /// menu bar and taskbar).
    pub fn draw_desktop(&self, raster: &mut dyn Raster, theme: Theme) {
        let width = raster.width();
        let height = raster.height();
        let work_height = height - MENU_BAR_HEIGHT - TASKBAR_HEIGHT;
        raster.fill_rect(
            Rect::new(0, MENU_BAR_HEIGHT as i32, width, work_height),
            theme.desktop(),
        );
    }
}

pub fn taskbar_rect(screen_width: u32, screen_height: u32) -> Rect {
    Rect::new(
        0,
        (screen_height - TASKBAR_HEIGHT) as i32,
        screen_width,
        TASKBAR_HEIGHT,
    )
}

pub fn start_button_rect(screen_height: u32) -> Rect {
    let bar_y = (screen_height - TASKBAR_HEIGHT) as i32;
    Rect::new(2, bar_y + 3, START_BUTTON_WIDTH, START_BUTTON_HEIGHT)
}

/// The start menu opens directly above the taskbar.
pub fn menu_rect(screen_height: u32) -> Rect {
    let bar_y = (screen_height - TASKBAR_HEIGHT) as i32;
    Rect::new(
        2,
        bar_y - START_MENU_HEIGHT as i32,
        START_MENU_WIDTH,
        START_MENU_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_rows_map_to_entries() {
        let mut panel = Panel::new();
        panel.toggle_menu();
        let rect = menu_rect(480);
        assert_eq!(
            panel.menu_hit(480, rect.x + 4, rect.y + 4),
            Some(AppKind::Browser)
        );
        assert_eq!(
            panel.menu_hit(480, rect.x + 4, rect.y + MENU_ITEM_HEIGHT as i32 + 4),
            Some(AppKind::Files)
        );
        assert_eq!(
            panel.menu_hit(480, rect.x + 4, rect.bottom() - 1),
            Some(AppKind::Settings)
        );
        assert_eq!(panel.menu_hit(480, 400, 400), None);
    }

    #[test]
    fn closed_menu_never_hits() {
        let panel = Panel::new();
        let rect = menu_rect(480);
        assert_eq!(panel.menu_hit(480, rect.x + 2, rect.y + 2), None);
    }

    #[test]
    fn menu_sits_flush_above_the_taskbar() {
        let rect = menu_rect(480);
        assert_eq!(rect.bottom(), 480 - TASKBAR_HEIGHT as i32);
        assert_eq!(rect.height, 6 * MENU_ITEM_HEIGHT);
    }
}
