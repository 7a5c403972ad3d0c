//! Redraw classification and execution.
//!
//! Routing produces [`RedrawRequest`]s; requests raised within one
//! iteration merge into a single scope, and the scheduler executes that
//! scope once per iteration. There is no multi-region partial path: two
//! different window scopes widen to a full repaint.

use crate::apps::AppTable;
use crate::constants::MENU_BAR_HEIGHT;
use crate::geometry::Rect;
use crate::icons::{self, DesktopIcon};
use crate::panel::{self, Panel};
use crate::raster::Raster;
use crate::theme::Theme;
use crate::widgets::{self, WidgetRegistry};
use crate::window::{WindowId, WindowRegistry, chrome};

/// Scope of screen damage for one iteration. Transient: produced by the
/// router, consumed once, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedrawRequest {
    #[default]
    None,
    Full,
    /// One window's chrome and content only.
    Window(WindowId),
    /// Only the pointer moved; the overlay pass handles it.
    CursorArea(Rect),
    /// Only the start-menu panel opened or closed.
    Menu,
}

impl RedrawRequest {
    /// Widen `self` to also cover `other`. `Full` dominates, distinct
    /// window scopes widen to `Full`, and a cursor-area scope is absorbed
    /// by any real repaint.
    #[must_use]
    pub fn merge(self, other: RedrawRequest) -> RedrawRequest {
        use RedrawRequest::*;
        match (self, other) {
            (None, req) | (req, None) => req,
            (Full, _) | (_, Full) => Full,
            (CursorArea(a), CursorArea(b)) => CursorArea(a.union(b)),
            (CursorArea(_), req) | (req, CursorArea(_)) => req,
            (Window(a), Window(b)) if a == b => Window(a),
            (Window(_), Window(_)) => Full,
            (Window(_), Menu) | (Menu, Window(_)) => Full,
            (Menu, Menu) => Menu,
        }
    }
}

/// Repaint everything: desktop, icons, bars, menu, windows back-to-front
/// with the active window last, widgets, then app content.
pub fn full_redraw(
    raster: &mut dyn Raster,
    windows: &WindowRegistry,
    widgets: &WidgetRegistry,
    desktop_icons: &[DesktopIcon],
    panel: &Panel,
    theme: Theme,
    apps: &mut AppTable,
) {
    panel.draw_desktop(raster, theme);
    for icon in desktop_icons {
        icons::draw_icon(raster, icon);
    }
    panel.draw_menu_bar(raster);
    panel.draw_taskbar(raster);
    panel.draw_menu(raster);

    let active = windows.active();
    for id in windows.ids_back_to_front() {
        if Some(id) == active {
            continue;
        }
        if let Some(win) = windows.get(id) {
            chrome::draw_window(raster, win);
        }
    }
    // Active window paints last so it tops the rest; true stacking order
    // is not tracked.
    if let Some(id) = active
        && let Some(win) = windows.get(id)
    {
        chrome::draw_window(raster, win);
    }

    for id in widgets.ids() {
        if let (Some(btn), Some(rect)) = (widgets.get(id), widgets.resolve_rect(id, windows)) {
            widgets::draw_button(raster, btn, rect);
        }
    }

    for id in windows.ids_back_to_front() {
        if let Some(win) = windows.get(id)
            && win.visible
        {
            apps.draw_content(raster, id, win);
        }
    }
}

/// Repaint a single window: its chrome, its widgets, its content. Nothing
/// else on screen is touched.
pub fn repaint_window(
    raster: &mut dyn Raster,
    windows: &WindowRegistry,
    widgets: &WidgetRegistry,
    apps: &mut AppTable,
    id: WindowId,
) {
    let Some(win) = windows.get(id).filter(|w| w.visible) else {
        return;
    };
    chrome::draw_window(raster, win);
    for btn_id in widgets.ids() {
        let Some(btn) = widgets.get(btn_id) else {
            continue;
        };
        if btn.owner != Some(id) {
            continue;
        }
        if let Some(rect) = widgets.resolve_rect(btn_id, windows) {
            widgets::draw_button(raster, btn, rect);
        }
    }
    apps.draw_content(raster, id, win);
}

/// Repaint only what intersects `region`: desktop fill, icons, bars, the
/// open menu, and windows (with widgets and content). Used when the start
/// menu closes and the content it covered has to come back.
pub fn repaint_region(
    raster: &mut dyn Raster,
    region: Rect,
    windows: &WindowRegistry,
    widgets: &WidgetRegistry,
    desktop_icons: &[DesktopIcon],
    panel: &Panel,
    theme: Theme,
    apps: &mut AppTable,
) {
    raster.fill_rect(region, theme.desktop());

    for icon in desktop_icons {
        if icon.rect().intersects(region) {
            icons::draw_icon(raster, icon);
        }
    }

    let width = raster.width();
    let height = raster.height();
    if region.y < MENU_BAR_HEIGHT as i32 {
        panel.draw_menu_bar(raster);
    }
    if panel::taskbar_rect(width, height).intersects(region) {
        panel.draw_taskbar(raster);
    }
    if panel.menu_open() && panel::menu_rect(height).intersects(region) {
        panel.draw_menu(raster);
    }

    let active = windows.active();
    let mut intersecting: Vec<WindowId> = Vec::new();
    for id in windows.ids_back_to_front() {
        if Some(id) == active {
            continue;
        }
        if let Some(win) = windows.get(id)
            && win.visible
            && win.rect.intersects(region)
        {
            chrome::draw_window(raster, win);
            intersecting.push(id);
        }
    }
    if let Some(id) = active
        && let Some(win) = windows.get(id)
        && win.visible
        && win.rect.intersects(region)
    {
        chrome::draw_window(raster, win);
        intersecting.push(id);
    }

    for btn_id in widgets.ids() {
        if let Some(rect) = widgets.resolve_rect(btn_id, windows)
            && rect.intersects(region)
            && let Some(btn) = widgets.get(btn_id)
        {
            widgets::draw_button(raster, btn, rect);
        }
    }

    for id in intersecting {
        if let Some(win) = windows.get(id) {
            apps.draw_content(raster, id, win);
        }
    }
}
