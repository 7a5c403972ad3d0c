use std::sync::{Arc, Mutex};

use pixel_wm::apps::{AppKind, AppTable, ContentProvider};
use pixel_wm::desktop::Desktop;
use pixel_wm::geometry::Rect;
use pixel_wm::icons;
use pixel_wm::input::PointerSample;
use pixel_wm::palette::Color;
use pixel_wm::raster::{FrameBuffer, Raster};
use pixel_wm::redraw::RedrawRequest;
use pixel_wm::window::{Window, chrome};

/// Draws a color derived from the number of keys received, so content
/// repaints are observable in the framebuffer.
#[derive(Clone, Default)]
struct Typewriter {
    keys: Arc<Mutex<Vec<u8>>>,
}

impl ContentProvider for Typewriter {
    fn draw(&mut self, raster: &mut dyn Raster, win: &Window) {
        let content = chrome::content_rect(win);
        let color = if self.keys.lock().unwrap().is_empty() {
            Color::White
        } else {
            Color::Yellow
        };
        raster.fill_rect(content, color);
    }

    fn handle_key(&mut self, key: u8) {
        self.keys.lock().unwrap().push(key);
    }
}

// A sample that neither moves nor clicks (the pointer starts centered):
// keeps the iteration free of pointer-driven redraw scopes.
fn idle() -> PointerSample {
    PointerSample::new(320, 240, 0, 0)
}

#[test]
fn keystroke_repaints_only_the_active_window() {
    let mut desk = Desktop::new(640, 480);
    desk.icons = icons::default_icons();
    let mut apps = AppTable::new();
    let provider = Typewriter::default();
    apps.register(AppKind::Notepad, Box::new(provider));

    let id = apps.launch(AppKind::Notepad, &mut desk.windows).unwrap();
    let win_rect = desk.windows.get(id).unwrap().rect;

    let mut fb = FrameBuffer::new(640, 480);
    desk.present(&mut fb, &mut apps);
    let before = fb.snapshot(Rect::new(0, 0, 640, 480));

    desk.update(&mut apps, idle(), Some((b'a', 0)));
    assert_eq!(desk.pending(), RedrawRequest::Window(id));
    desk.present(&mut fb, &mut apps);

    let after = fb.snapshot(Rect::new(0, 0, 640, 480));
    let mut interior_changed = false;
    for y in 0..480 {
        for x in 0..640 {
            let idx = (y * 640 + x) as usize;
            if win_rect.contains(x, y) {
                interior_changed |= before[idx] != after[idx];
            } else {
                assert_eq!(
                    before[idx], after[idx],
                    "keystroke leaked outside the window at ({x},{y})"
                );
            }
        }
    }
    assert!(interior_changed, "provider content never repainted");
}

#[test]
fn keystroke_with_no_active_window_is_ignored() {
    let mut desk = Desktop::new(640, 480);
    let mut apps = AppTable::new();
    let provider = Typewriter::default();
    let keys = provider.keys.clone();
    apps.register(AppKind::Notepad, Box::new(provider));

    let mut fb = FrameBuffer::new(640, 480);
    desk.present(&mut fb, &mut apps);

    desk.update(&mut apps, idle(), Some((b'a', 0)));
    assert_eq!(desk.pending(), RedrawRequest::None);
    assert!(keys.lock().unwrap().is_empty());
}

#[test]
fn alt_f4_closes_the_active_window_with_a_full_repaint() {
    use pixel_wm::input::{KEY_F4, MOD_ALT};

    let mut desk = Desktop::new(640, 480);
    let mut apps = AppTable::new();
    apps.register(AppKind::Notepad, Box::new(Typewriter::default()));
    let id = apps.launch(AppKind::Notepad, &mut desk.windows).unwrap();

    let mut fb = FrameBuffer::new(640, 480);
    desk.present(&mut fb, &mut apps);

    desk.update(&mut apps, idle(), Some((KEY_F4, MOD_ALT)));
    assert_eq!(desk.pending(), RedrawRequest::Full);
    assert!(!desk.windows.get(id).unwrap().visible);
    assert_eq!(desk.windows.active(), None);

    // After the repaint the window's pixels are desktop-colored again.
    desk.present(&mut fb, &mut apps);
    assert_eq!(fb.get_pixel(320, 200), desk.theme.desktop());
}

#[test]
fn start_menu_toggle_uses_the_menu_scope() {
    use pixel_wm::input::MOUSE_LEFT;
    use pixel_wm::panel::start_button_rect;

    let mut desk = Desktop::new(640, 480);
    desk.icons = icons::default_icons();
    let mut apps = AppTable::new();
    let mut fb = FrameBuffer::new(640, 480);
    desk.present(&mut fb, &mut apps);
    let before = fb.snapshot(Rect::new(0, 0, 640, 480));

    let start = start_button_rect(480);
    let (sx, sy) = (start.x + 5, start.y + 5);
    desk.update(
        &mut apps,
        PointerSample::new(sx, sy, MOUSE_LEFT, 0),
        None,
    );
    assert!(desk.panel.menu_open());
    assert_eq!(desk.pending(), RedrawRequest::Menu);
    desk.present(&mut fb, &mut apps);

    // Click away: the menu closes and the covered desktop comes back.
    desk.update(
        &mut apps,
        PointerSample::new(sx, sy, 0, MOUSE_LEFT),
        None,
    );
    desk.update(
        &mut apps,
        PointerSample::new(400, 200, MOUSE_LEFT, 0),
        None,
    );
    assert!(!desk.panel.menu_open());
    desk.present(&mut fb, &mut apps);

    let after = fb.snapshot(Rect::new(0, 0, 640, 480));
    // The cursor settled elsewhere, so compare only the strip the menu
    // panel occupied.
    let menu = pixel_wm::panel::menu_rect(480);
    for y in menu.y..menu.bottom() {
        for x in menu.x..menu.right() {
            let idx = (y * 640 + x) as usize;
            assert_eq!(before[idx], after[idx], "menu residue at ({x},{y})");
        }
    }
}
