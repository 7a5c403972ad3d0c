//! Window chrome: geometry and drawing for the frame, title bar, and close
//! button. The hit-test paths in `input` use the same rectangles the
//! painter does, which is what keeps clicks and pixels lined up.

use super::Window;
use crate::constants::{
    CLOSE_BUTTON_HEIGHT, CLOSE_BUTTON_RIGHT_INSET, CLOSE_BUTTON_TOP_INSET, CLOSE_BUTTON_WIDTH,
    CONTENT_INSET_TOP, TITLEBAR_HEIGHT,
};
use crate::geometry::Rect;
use crate::palette::Color;
use crate::raster::Raster;
use crate::theme;

/// Band along the window's top edge that begins a drag when clicked.
pub fn titlebar_rect(win: &Window) -> Rect {
    Rect::new(win.rect.x, win.rect.y, win.rect.width, TITLEBAR_HEIGHT)
}

pub fn close_button_rect(win: &Window) -> Rect {
    Rect::new(
        win.rect.right() - CLOSE_BUTTON_RIGHT_INSET,
        win.rect.y + CLOSE_BUTTON_TOP_INSET,
        CLOSE_BUTTON_WIDTH,
        CLOSE_BUTTON_HEIGHT,
    )
}

/// Interior below the chrome; app content and window widgets live here.
pub fn content_rect(win: &Window) -> Rect {
    let height = win.rect.height.saturating_sub(CONTENT_INSET_TOP as u32);
    Rect::new(
        win.rect.x,
        win.rect.y + CONTENT_INSET_TOP,
        win.rect.width,
        height,
    )
}

/// Paint the full window frame: beveled edges, title bar (blue when
/// active, gray otherwise), title text, and the close button.
pub fn draw_window(raster: &mut dyn Raster, win: &Window) {
    if !win.visible {
        return;
    }
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = win.rect;
    let wi = w as i32;
    let hi = h as i32;

    raster.fill_rect(win.rect, theme::window_bg());

    // Light edges (top-left)
    raster.hline(x, y, w, Color::White);
    raster.vline(x, y, h, Color::White);
    raster.hline(x + 1, y + 1, w.saturating_sub(2), Color::White);
    raster.vline(x + 1, y + 1, h.saturating_sub(2), Color::White);

    // Dark edges (bottom-right)
    raster.hline(x, y + hi - 1, w, Color::Black);
    raster.vline(x + wi - 1, y, h, Color::Black);
    raster.hline(x + 1, y + hi - 2, w.saturating_sub(2), Color::DarkGray);
    raster.vline(x + wi - 2, y + 1, h.saturating_sub(2), Color::DarkGray);

    // Title bar
    let bar_color = if win.active {
        theme::titlebar_active()
    } else {
        theme::titlebar_inactive()
    };
    raster.fill_rect(
        Rect::new(x + 3, y + 3, w.saturating_sub(6), 18),
        bar_color,
    );
    if win.active {
        raster.hline(x + 3, y + 3, w.saturating_sub(6), theme::titlebar_highlight());
        raster.hline(x + 3, y + 4, w.saturating_sub(6), theme::titlebar_highlight());
    }
    raster.put_string(x + 8, y + 7, &win.title, theme::title_text(), bar_color);

    // Close button
    let close = close_button_rect(win);
    raster.fill_rect(close, Color::Red);
    raster.hline(close.x, close.y, close.width, Color::LightRed);
    raster.vline(close.x, close.y, close.height, Color::LightRed);
    raster.hline(close.x, close.bottom() - 1, close.width, Color::Brown);
    raster.vline(close.right() - 1, close.y, close.height, Color::Brown);

    // The X glyph, two pixels thick
    let cx = close.x + close.width as i32 / 2;
    let cy = close.y + close.height as i32 / 2;
    for d in -3..=3 {
        raster.put_pixel(cx + d, cy + d, Color::White);
        raster.put_pixel(cx + d, cy - d, Color::White);
        raster.put_pixel(cx + d + 1, cy + d, Color::White);
        raster.put_pixel(cx + d + 1, cy - d, Color::White);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(x: i32, y: i32, w: u32, h: u32) -> Window {
        Window {
            rect: Rect::new(x, y, w, h),
            title: "t".to_string(),
            visible: true,
            active: false,
            dragging: false,
            drag_offset: (0, 0),
            dirty: false,
        }
    }

    #[test]
    fn close_button_sits_inside_the_titlebar() {
        let win = window(50, 40, 200, 150);
        let close = close_button_rect(&win);
        let bar = titlebar_rect(&win);
        assert!(bar.contains(close.x, close.y));
        assert!(bar.contains(close.right() - 1, close.bottom() - 1));
        assert_eq!(close, Rect::new(50 + 200 - 22, 45, 16, 14));
    }

    #[test]
    fn content_rect_excludes_chrome() {
        let win = window(0, 0, 100, 100);
        let content = content_rect(&win);
        assert_eq!(content, Rect::new(0, 16, 100, 84));
    }

    #[test]
    fn hidden_windows_are_not_painted() {
        use crate::raster::FrameBuffer;
        let mut fb = FrameBuffer::new(64, 64);
        let mut win = window(0, 0, 32, 32);
        win.visible = false;
        draw_window(&mut fb, &win);
        assert!(fb.pixels().iter().all(|&p| p == 0));
    }
}
