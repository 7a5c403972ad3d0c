use pixel_wm::apps::AppTable;
use pixel_wm::cursor::{CURSOR_HEIGHT, CURSOR_WIDTH, CursorOverlay};
use pixel_wm::desktop::Desktop;
use pixel_wm::geometry::Rect;
use pixel_wm::icons;
use pixel_wm::raster::FrameBuffer;

/// Paint a realistic desktop (icons, bars, theme) to hover the cursor
/// over, then hand the framebuffer to the overlay directly.
fn painted_desktop() -> FrameBuffer {
    let mut desk = Desktop::new(640, 480);
    desk.icons = icons::default_icons();
    let mut apps = AppTable::new();
    let mut fb = FrameBuffer::new(640, 480);
    desk.present(&mut fb, &mut apps);
    fb
}

#[test]
fn drawing_twice_at_the_same_spot_changes_nothing() {
    let mut fb = painted_desktop();
    let mut cursor = CursorOverlay::new();

    cursor.draw(&mut fb, 10, 10);
    let with_glyph = fb.snapshot(Rect::new(0, 0, 640, 480));
    cursor.draw(&mut fb, 10, 10);
    assert_eq!(with_glyph, fb.snapshot(Rect::new(0, 0, 640, 480)));
}

#[test]
fn round_trip_is_screen_plus_glyph() {
    let mut fb = painted_desktop();
    let before = fb.snapshot(Rect::new(0, 0, 640, 480));
    let mut cursor = CursorOverlay::new();

    // Wander across an icon, the desktop, and the taskbar, then settle.
    cursor.draw(&mut fb, 12, 30);
    cursor.draw(&mut fb, 300, 200);
    cursor.draw(&mut fb, 30, 460);
    cursor.draw(&mut fb, 10, 10);

    let after = fb.snapshot(Rect::new(0, 0, 640, 480));
    let glyph = Rect::new(10, 10, CURSOR_WIDTH, CURSOR_HEIGHT);
    for y in 0..480 {
        for x in 0..640 {
            if glyph.contains(x, y) {
                continue;
            }
            let idx = (y * 640 + x) as usize;
            assert_eq!(before[idx], after[idx], "trail artifact at ({x},{y})");
        }
    }
}

#[test]
fn overlay_survives_a_repaint_when_invalidated() {
    let mut fb = painted_desktop();
    let mut cursor = CursorOverlay::new();
    cursor.draw(&mut fb, 100, 100);

    // A full repaint bypasses the overlay and overwrites its backup.
    let mut desk = Desktop::new(640, 480);
    desk.icons = icons::default_icons();
    let mut apps = AppTable::new();
    desk.present(&mut fb, &mut apps);
    cursor.invalidate();

    let clean = fb.snapshot(Rect::new(0, 0, 640, 480));
    cursor.draw(&mut fb, 100, 100);
    cursor.draw(&mut fb, 200, 200);

    // The old position shows repainted content, not a stale restore.
    let glyph = Rect::new(200, 200, CURSOR_WIDTH, CURSOR_HEIGHT);
    let after = fb.snapshot(Rect::new(0, 0, 640, 480));
    for y in 0..480 {
        for x in 0..640 {
            if glyph.contains(x, y) {
                continue;
            }
            let idx = (y * 640 + x) as usize;
            assert_eq!(clean[idx], after[idx], "stale restore at ({x},{y})");
        }
    }
}
