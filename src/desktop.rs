//! The compositor context.
//!
//! `Desktop` consolidates every piece of mutable compositor state —
//! registries, panel, icons, pending redraw scope, cursor overlay — into
//! one explicitly passed object. One `update` + `present` pair per loop
//! iteration: input is fully routed before any drawing, and all drawing
//! settles before the cursor overlay runs.

use std::mem;

use crate::apps::AppTable;
use crate::cursor::CursorOverlay;
use crate::icons::DesktopIcon;
use crate::input::{self, PointerSample};
use crate::panel::{self, Panel};
use crate::raster::Raster;
use crate::redraw::{self, RedrawRequest};
use crate::theme::Theme;
use crate::widgets::WidgetRegistry;
use crate::window::{WindowId, WindowRegistry};

pub struct Desktop {
    pub windows: WindowRegistry,
    pub widgets: WidgetRegistry,
    pub panel: Panel,
    pub icons: Vec<DesktopIcon>,
    pub theme: Theme,
    cursor: CursorOverlay,
    pending: RedrawRequest,
    pointer: (i32, i32),
    screen_width: u32,
    screen_height: u32,
}

impl Desktop {
    /// Fresh desktop for a `width` x `height` screen. The first `present`
    /// paints everything; the pointer starts centered.
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            windows: WindowRegistry::new(),
            widgets: WidgetRegistry::new(),
            panel: Panel::new(),
            icons: Vec::new(),
            theme: Theme::default(),
            cursor: CursorOverlay::new(),
            pending: RedrawRequest::Full,
            pointer: (screen_width as i32 / 2, screen_height as i32 / 2),
            screen_width,
            screen_height,
        }
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    pub(crate) fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    pub(crate) fn set_pointer(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
    }

    /// Widen this iteration's redraw scope.
    pub fn request(&mut self, request: RedrawRequest) {
        self.pending = self.pending.merge(request);
    }

    /// Scope accumulated so far this iteration.
    pub fn pending(&self) -> RedrawRequest {
        self.pending
    }

    /// Flag a window's interior as changed outside the router (an app
    /// whose state advanced on its own). The next `present` repaints it.
    pub fn mark_dirty(&mut self, id: WindowId) {
        if let Some(win) = self.windows.get_mut(id) {
            win.dirty = true;
        }
    }

    /// Route one iteration's input: the pointer sample, then at most one
    /// buffered `(key, modifiers)` pair.
    pub fn update(&mut self, apps: &mut AppTable, sample: PointerSample, key: Option<(u8, u8)>) {
        input::route_pointer(self, apps, sample);
        if let Some((key, modifiers)) = key {
            input::route_key(self, apps, key, modifiers);
        }
    }

    /// Execute the accumulated redraw scope, then composite the cursor on
    /// top and present the frame.
    pub fn present(&mut self, raster: &mut dyn Raster, apps: &mut AppTable) {
        let mut request = mem::take(&mut self.pending);

        // Dirty hints raised outside the router widen the scope; merge
        // turns two distinct dirty windows into a full repaint.
        for id in self.windows.ids_back_to_front() {
            if self.windows.get(id).is_some_and(|w| w.visible && w.dirty) {
                request = request.merge(RedrawRequest::Window(id));
            }
        }

        match request {
            RedrawRequest::Full => {
                tracing::trace!("full redraw");
                redraw::full_redraw(
                    raster,
                    &self.windows,
                    &self.widgets,
                    &self.icons,
                    &self.panel,
                    self.theme,
                    apps,
                );
                self.clear_dirty();
                self.cursor.invalidate();
            }
            RedrawRequest::Window(id) => {
                tracing::trace!(id = id.index(), "window repaint");
                // Partial scopes may not cover the glyph; lift it off
                // screen first so no ghost survives outside the repaint.
                self.cursor.erase(raster);
                redraw::repaint_window(raster, &self.windows, &self.widgets, apps, id);
                if let Some(win) = self.windows.get_mut(id) {
                    win.dirty = false;
                }
            }
            RedrawRequest::Menu => {
                self.cursor.erase(raster);
                if self.panel.menu_open() {
                    self.panel.draw_menu(raster);
                } else {
                    // The closed panel reveals whatever it was covering.
                    redraw::repaint_region(
                        raster,
                        panel::menu_rect(self.screen_height),
                        &self.windows,
                        &self.widgets,
                        &self.icons,
                        &self.panel,
                        self.theme,
                        apps,
                    );
                }
            }
            RedrawRequest::CursorArea(_) | RedrawRequest::None => {}
        }

        let (px, py) = self.pointer;
        self.cursor.draw(raster, px, py);
        raster.vsync();
    }

    fn clear_dirty(&mut self) {
        let ids: Vec<WindowId> = self.windows.ids_back_to_front().collect();
        for id in ids {
            if let Some(win) = self.windows.get_mut(id) {
                win.dirty = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::raster::FrameBuffer;

    #[test]
    fn first_present_paints_the_desktop() {
        let mut desk = Desktop::new(640, 480);
        let mut apps = AppTable::new();
        let mut fb = FrameBuffer::new(640, 480);
        assert_eq!(desk.pending(), RedrawRequest::Full);
        desk.present(&mut fb, &mut apps);
        assert_eq!(desk.pending(), RedrawRequest::None);
        // Desktop background is themed teal between the bars (sampled away
        // from the centered cursor glyph).
        assert_eq!(fb.get_pixel(400, 300), crate::palette::Color::Cyan);
    }

    #[test]
    fn dirty_hint_widens_an_idle_iteration() {
        let mut desk = Desktop::new(640, 480);
        let mut apps = AppTable::new();
        let mut fb = FrameBuffer::new(640, 480);
        desk.present(&mut fb, &mut apps);

        let id = desk.windows.create(Rect::new(50, 50, 120, 90), "w").unwrap();
        // Window exists but nothing requested a repaint; marking it dirty
        // gets it painted on the next present.
        desk.mark_dirty(id);
        desk.present(&mut fb, &mut apps);
        // Interior below the title bar carries the window background now.
        assert_eq!(fb.get_pixel(60, 100), crate::theme::window_bg());
        assert!(!desk.windows.get(id).unwrap().dirty);
    }
}
