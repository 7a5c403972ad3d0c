//! Input routing.
//!
//! One pointer sample and at most one buffered key are consumed per
//! iteration. Click dispatch order: in-progress drag, open start menu,
//! window chrome (close button, title bar, body) newest-window-first,
//! desktop icons, widgets, and finally the active window's content area.
//! Each consuming step stops the walk; widget hover is refreshed every
//! iteration regardless.

use crate::apps::AppTable;
use crate::constants::{MENU_BAR_HEIGHT, TASKBAR_HEIGHT};
use crate::cursor::{CURSOR_HEIGHT, CURSOR_WIDTH};
use crate::desktop::Desktop;
use crate::geometry::Rect;
use crate::icons;
use crate::panel;
use crate::redraw::RedrawRequest;
use crate::widgets::WidgetAction;
use crate::window::{WindowId, chrome};

// Pointer button mask bits.
pub const MOUSE_LEFT: u8 = 1 << 0;
pub const MOUSE_RIGHT: u8 = 1 << 1;
pub const MOUSE_MIDDLE: u8 = 1 << 2;

// Key codes delivered by keyboard devices. Zero means "no key"; values at
// 128 and above are non-printable.
pub const KEY_ESCAPE: u8 = 27;
pub const KEY_BACKSPACE: u8 = 8;
pub const KEY_TAB: u8 = 9;
pub const KEY_ENTER: u8 = b'\n';
pub const KEY_UP: u8 = 128;
pub const KEY_DOWN: u8 = 129;
pub const KEY_LEFT: u8 = 130;
pub const KEY_RIGHT: u8 = 131;
pub const KEY_F1: u8 = 132;
pub const KEY_F4: u8 = 135;
pub const KEY_F12: u8 = 143;

// Modifier mask bits.
pub const MOD_SHIFT: u8 = 1 << 0;
pub const MOD_CTRL: u8 = 1 << 1;
pub const MOD_ALT: u8 = 1 << 2;
pub const MOD_CAPSLOCK: u8 = 1 << 3;
pub const MOD_SUPER: u8 = 1 << 4;

/// One pointer poll: absolute position, current button mask, and the
/// previous mask so edge signals can be derived.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub x: i32,
    pub y: i32,
    pub buttons: u8,
    pub prev_buttons: u8,
}

impl PointerSample {
    pub fn new(x: i32, y: i32, buttons: u8, prev_buttons: u8) -> Self {
        Self {
            x,
            y,
            buttons,
            prev_buttons,
        }
    }

    pub fn down(&self, button: u8) -> bool {
        self.buttons & button != 0
    }

    /// Pressed this sample and not the last.
    pub fn clicked(&self, button: u8) -> bool {
        self.buttons & button != 0 && self.prev_buttons & button == 0
    }

    /// Up this sample and down the last.
    pub fn released(&self, button: u8) -> bool {
        self.buttons & button == 0 && self.prev_buttons & button != 0
    }
}

enum ClickOutcome {
    /// Chrome consumed the click; dispatch is done for this sample.
    Consumed,
    /// The click landed in a window body (window was activated).
    Body(WindowId),
    /// No window contains the pointer.
    Missed,
}

pub(crate) fn route_pointer(desk: &mut Desktop, apps: &mut AppTable, sample: PointerSample) {
    let clicked = sample.clicked(MOUSE_LEFT);
    let released = sample.released(MOUSE_LEFT);
    let moved = desk.pointer() != (sample.x, sample.y);
    desk.set_pointer(sample.x, sample.y);

    // An in-progress drag captures the pointer until release.
    if let Some(id) = desk.windows.dragging() {
        drag_update(desk, id, sample);
        return;
    }

    // The open start menu swallows the next click wherever it lands.
    if desk.panel.menu_open() && clicked {
        if let Some(kind) = desk.panel.menu_hit(desk.screen_height(), sample.x, sample.y) {
            desk.panel.close_menu();
            apps.launch(kind, &mut desk.windows);
            desk.request(RedrawRequest::Full);
        } else {
            desk.panel.close_menu();
            desk.request(RedrawRequest::Menu);
        }
        return;
    }

    let mut body_hit = None;
    if clicked {
        match dispatch_window_click(desk, sample) {
            ClickOutcome::Consumed => return,
            ClickOutcome::Body(id) => body_hit = Some(id),
            ClickOutcome::Missed => {
                let start = panel::start_button_rect(desk.screen_height());
                if start.contains(sample.x, sample.y) {
                    desk.panel.toggle_menu();
                    desk.request(RedrawRequest::Menu);
                    return;
                }
                if sample.y >= MENU_BAR_HEIGHT as i32
                    && let Some(icon) = icons::icon_at(&desk.icons, sample.x, sample.y)
                {
                    apps.launch(icon.app, &mut desk.windows);
                    desk.request(RedrawRequest::Full);
                    return;
                }
            }
        }
    }

    let widget_consumed = update_widgets(desk, apps, sample, clicked, released);

    // Content-area clicks reach the active window's provider; interior
    // changes only ever need that window repainted.
    if clicked
        && !widget_consumed
        && let Some(active) = desk.windows.active()
        && body_hit.is_none_or(|id| id == active)
        && let Some(win) = desk.windows.get(active).filter(|w| w.visible)
        && chrome::content_rect(win).contains(sample.x, sample.y)
        && let Some(kind) = apps.kind_of(active)
    {
        let win = win.clone();
        if let Some(provider) = apps.provider_mut(kind) {
            let consumed = provider.handle_click(&win, sample.x, sample.y);
            tracing::trace!(?kind, consumed, "content click");
            desk.mark_dirty(active);
            desk.request(RedrawRequest::Window(active));
        }
    }

    if moved {
        desk.request(RedrawRequest::CursorArea(Rect::new(
            sample.x,
            sample.y,
            CURSOR_WIDTH,
            CURSOR_HEIGHT,
        )));
    }
}

fn dispatch_window_click(desk: &mut Desktop, sample: PointerSample) -> ClickOutcome {
    let ids: Vec<WindowId> = desk.windows.ids_front_to_back().collect();
    for id in ids {
        let Some(win) = desk.windows.get(id) else {
            continue;
        };
        if !win.visible {
            continue;
        }

        if chrome::close_button_rect(win).contains(sample.x, sample.y) {
            tracing::debug!(id = id.index(), "close button clicked");
            desk.windows.close(id);
            desk.request(RedrawRequest::Full);
            return ClickOutcome::Consumed;
        }

        if chrome::titlebar_rect(win).contains(sample.x, sample.y) {
            let offset = (sample.x - win.rect.x, sample.y - win.rect.y);
            let prev = desk.windows.active();
            if let Some(win) = desk.windows.get_mut(id) {
                win.dragging = true;
                win.drag_offset = offset;
            }
            desk.windows.set_active(Some(id));
            if desk.windows.active() != prev {
                desk.request(RedrawRequest::Full);
            }
            return ClickOutcome::Consumed;
        }

        if win.rect.contains(sample.x, sample.y) {
            let prev = desk.windows.active();
            desk.windows.set_active(Some(id));
            if desk.windows.active() != prev {
                desk.request(RedrawRequest::Full);
            }
            return ClickOutcome::Body(id);
        }
    }
    ClickOutcome::Missed
}

fn drag_update(desk: &mut Desktop, id: WindowId, sample: PointerSample) {
    if sample.down(MOUSE_LEFT) {
        let Some(win) = desk.windows.get(id) else {
            return;
        };
        let (w, h) = (win.rect.width, win.rect.height);
        let (off_x, off_y) = win.drag_offset;

        let max_x = (desk.screen_width() as i32 - w as i32).max(0);
        let min_y = MENU_BAR_HEIGHT as i32;
        let max_y =
            (desk.screen_height() as i32 - TASKBAR_HEIGHT as i32 - h as i32).max(min_y);

        let nx = (sample.x - off_x).clamp(0, max_x);
        let ny = (sample.y - off_y).clamp(min_y, max_y);

        if let Some(win) = desk.windows.get_mut(id) {
            win.rect.x = nx;
            win.rect.y = ny;
        }
        desk.request(RedrawRequest::Full);
    } else {
        if let Some(win) = desk.windows.get_mut(id) {
            win.dragging = false;
        }
        // One final repaint settles the window at its released position.
        desk.request(RedrawRequest::Full);
    }
}

/// Refresh hover/pressed for every resolvable button and fire actions for
/// releases that land inside. Returns whether a click edge was consumed by
/// some widget.
fn update_widgets(
    desk: &mut Desktop,
    apps: &mut AppTable,
    sample: PointerSample,
    clicked: bool,
    released: bool,
) -> bool {
    let mut consumed = false;
    let mut fired = Vec::new();

    let ids: Vec<_> = desk.widgets.ids().collect();
    for id in ids {
        let resolved = desk.widgets.resolve_rect(id, &desk.windows);
        let Some(btn) = desk.widgets.get_mut(id) else {
            continue;
        };
        let Some(rect) = resolved else {
            btn.hovered = false;
            btn.pressed = false;
            continue;
        };

        let hover = rect.contains(sample.x, sample.y);
        btn.hovered = hover;
        if hover {
            if clicked {
                btn.pressed = true;
                consumed = true;
            }
            if released && btn.pressed {
                btn.pressed = false;
                fired.push((btn.action, btn.owner));
            }
        } else {
            // Leaving the rectangle cancels a pending press; a release
            // outside never fires.
            btn.pressed = false;
        }
    }

    for (action, owner) in fired {
        fire_widget_action(desk, apps, action, owner);
    }
    consumed
}

fn fire_widget_action(
    desk: &mut Desktop,
    apps: &mut AppTable,
    action: WidgetAction,
    owner: Option<WindowId>,
) {
    tracing::debug!(?action, "widget fired");
    match action {
        WidgetAction::Launch(kind) => {
            apps.launch(kind, &mut desk.windows);
            desk.request(RedrawRequest::Full);
        }
        WidgetAction::ToggleStartMenu => {
            desk.panel.toggle_menu();
            desk.request(RedrawRequest::Menu);
        }
        WidgetAction::CloseOwner => {
            if let Some(id) = owner {
                desk.windows.close(id);
                desk.request(RedrawRequest::Full);
            }
        }
        WidgetAction::SendKey(kind, key) => {
            if let Some(provider) = apps.provider_mut(kind) {
                provider.handle_key(key);
            }
            if let Some(id) = apps.window_of(kind) {
                desk.mark_dirty(id);
                desk.request(RedrawRequest::Window(id));
            }
        }
    }
}

pub(crate) fn route_key(desk: &mut Desktop, apps: &mut AppTable, key: u8, modifiers: u8) {
    if key == 0 {
        return;
    }

    // Alt+F4 closes the active window directly, bypassing its provider.
    if modifiers & MOD_ALT != 0 && key == KEY_F4 {
        if let Some(id) = desk.windows.active() {
            tracing::debug!(id = id.index(), "active window closed via keyboard");
            desk.windows.close(id);
            desk.request(RedrawRequest::Full);
        }
        return;
    }

    if let Some(id) = desk.windows.active()
        && let Some(kind) = apps.kind_of(id)
        && let Some(provider) = apps.provider_mut(kind)
    {
        provider.handle_key(key);
        desk.mark_dirty(id);
        desk.request(RedrawRequest::Window(id));
    }
}
