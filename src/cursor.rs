//! Pointer cursor overlay.
//!
//! The cursor is composited on top of everything else once per iteration
//! using background save/restore: before painting the glyph we copy the
//! pixels underneath, and the next draw rewrites that block first. Any
//! repaint that bypasses the overlay must call [`CursorOverlay::invalidate`]
//! or the stale backup would be restored over freshly painted content.

use crate::palette::Color;
use crate::raster::Raster;

pub const CURSOR_WIDTH: u32 = 12;
pub const CURSOR_HEIGHT: u32 = 16;

/// Arrow glyph. 0 = transparent, 1 = outline (black), 2 = fill (white).
#[rustfmt::skip]
const CURSOR_GLYPH: [[u8; CURSOR_WIDTH as usize]; CURSOR_HEIGHT as usize] = [
    [1,0,0,0,0,0,0,0,0,0,0,0],
    [1,1,0,0,0,0,0,0,0,0,0,0],
    [1,2,1,0,0,0,0,0,0,0,0,0],
    [1,2,2,1,0,0,0,0,0,0,0,0],
    [1,2,2,2,1,0,0,0,0,0,0,0],
    [1,2,2,2,2,1,0,0,0,0,0,0],
    [1,2,2,2,2,2,1,0,0,0,0,0],
    [1,2,2,2,2,2,2,1,0,0,0,0],
    [1,2,2,2,2,2,2,2,1,0,0,0],
    [1,2,2,2,2,2,2,2,2,1,0,0],
    [1,2,2,2,2,2,1,1,1,1,1,0],
    [1,2,2,1,2,2,1,0,0,0,0,0],
    [1,2,1,0,1,2,2,1,0,0,0,0],
    [1,1,0,0,1,2,2,1,0,0,0,0],
    [1,0,0,0,0,1,2,2,1,0,0,0],
    [0,0,0,0,0,1,1,1,1,0,0,0],
];

const BACKUP_LEN: usize = (CURSOR_WIDTH * CURSOR_HEIGHT) as usize;

#[derive(Debug)]
pub struct CursorOverlay {
    /// Top-left corner of the most recent glyph draw.
    last: Option<(i32, i32)>,
    backup: [Color; BACKUP_LEN],
    backup_valid: bool,
}

impl Default for CursorOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorOverlay {
    pub fn new() -> Self {
        Self {
            last: None,
            backup: [Color::Black; BACKUP_LEN],
            backup_valid: false,
        }
    }

    /// Mark the backup stale without drawing. Must be called after any
    /// repaint that may have touched the backed-up rectangle; the next
    /// `draw` then saves fresh pixels instead of restoring stale ones.
    pub fn invalidate(&mut self) {
        self.backup_valid = false;
    }

    /// Take the glyph off screen: restore the backup and invalidate it.
    /// Call this before a partial repaint that may not cover the cursor;
    /// otherwise the glyph left outside the repainted region would be
    /// saved into the next backup and smeared across the screen.
    pub fn erase(&mut self, raster: &mut dyn Raster) {
        if self.backup_valid
            && let Some((lx, ly)) = self.last
        {
            self.restore(raster, lx, ly);
        }
        self.backup_valid = false;
    }

    /// Position of the last glyph draw, after clamping.
    pub fn position(&self) -> Option<(i32, i32)> {
        self.last
    }

    /// Composite the glyph at `(x, y)` (clamped fully on screen).
    ///
    /// Restores the previous backup first when one is valid, then saves
    /// the block under the new position and paints. When the clamped
    /// position matches the last draw and the backup is still valid,
    /// nothing needs to change and the call is a no-op.
    pub fn draw(&mut self, raster: &mut dyn Raster, x: i32, y: i32) {
        let (x, y) = clamp_to_screen(raster, x, y);

        if self.backup_valid && self.last == Some((x, y)) {
            return;
        }

        if self.backup_valid
            && let Some((lx, ly)) = self.last
        {
            self.restore(raster, lx, ly);
        }

        self.save(raster, x, y);
        paint_glyph(raster, x, y);
        self.last = Some((x, y));
        self.backup_valid = true;
    }

    fn save(&mut self, raster: &mut dyn Raster, x: i32, y: i32) {
        for row in 0..CURSOR_HEIGHT as i32 {
            for col in 0..CURSOR_WIDTH as i32 {
                let idx = (row * CURSOR_WIDTH as i32 + col) as usize;
                self.backup[idx] = raster.get_pixel(x + col, y + row);
            }
        }
    }

    fn restore(&self, raster: &mut dyn Raster, x: i32, y: i32) {
        for row in 0..CURSOR_HEIGHT as i32 {
            for col in 0..CURSOR_WIDTH as i32 {
                let idx = (row * CURSOR_WIDTH as i32 + col) as usize;
                raster.put_pixel(x + col, y + row, self.backup[idx]);
            }
        }
    }
}

fn clamp_to_screen(raster: &dyn Raster, x: i32, y: i32) -> (i32, i32) {
    let max_x = raster.width().saturating_sub(CURSOR_WIDTH) as i32;
    let max_y = raster.height().saturating_sub(CURSOR_HEIGHT) as i32;
    (x.clamp(0, max_x), y.clamp(0, max_y))
}

fn paint_glyph(raster: &mut dyn Raster, x: i32, y: i32) {
    for (row, cells) in CURSOR_GLYPH.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            match cell {
                1 => raster.put_pixel(x + col as i32, y + row as i32, Color::Black),
                2 => raster.put_pixel(x + col as i32, y + row as i32, Color::White),
                _ => {}
            }
        }
    }
}
