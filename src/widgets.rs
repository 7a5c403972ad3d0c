//! Clickable button widgets.
//!
//! Buttons live in a fixed arena like windows do. A button is either
//! screen-level (rect is absolute) or owned by a window (rect is relative
//! to the window origin, pushed below the chrome). Activation is a closed
//! enum rather than a callback so the router can fire actions without
//! holding app state.

use crate::apps::AppKind;
use crate::constants::{CONTENT_INSET_TOP, MAX_BUTTONS};
use crate::font;
use crate::geometry::Rect;
use crate::palette::Color;
use crate::raster::Raster;
use crate::theme;
use crate::window::{WindowId, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ButtonId(pub(crate) usize);

impl ButtonId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What firing a button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    /// Bring an app's window up.
    Launch(AppKind),
    /// Open or close the start menu.
    ToggleStartMenu,
    /// Close the window owning this button.
    CloseOwner,
    /// Feed a key code to an app, as if typed into its window.
    SendKey(AppKind, u8),
}

#[derive(Debug, Clone)]
pub struct Button {
    /// Absolute when `owner` is `None`, else relative to the owner's
    /// content area.
    pub rect: Rect,
    pub label: String,
    pub action: WidgetAction,
    pub pressed: bool,
    pub hovered: bool,
    pub visible: bool,
    pub owner: Option<WindowId>,
}

/// Fixed-capacity button arena.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    buttons: Vec<Button>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            buttons: Vec::with_capacity(MAX_BUTTONS),
        }
    }

    /// Screen-level button. Returns `None` once the pool is exhausted.
    pub fn create(&mut self, rect: Rect, label: &str, action: WidgetAction) -> Option<ButtonId> {
        self.push(rect, label, action, None)
    }

    /// Button positioned relative to a window's content area.
    pub fn create_in_window(
        &mut self,
        window_id: WindowId,
        rect: Rect,
        label: &str,
        action: WidgetAction,
    ) -> Option<ButtonId> {
        self.push(rect, label, action, Some(window_id))
    }

    fn push(
        &mut self,
        rect: Rect,
        label: &str,
        action: WidgetAction,
        owner: Option<WindowId>,
    ) -> Option<ButtonId> {
        if self.buttons.len() >= MAX_BUTTONS {
            tracing::warn!(label, "button pool exhausted");
            return None;
        }
        let id = ButtonId(self.buttons.len());
        self.buttons.push(Button {
            rect,
            label: label.to_string(),
            action,
            pressed: false,
            hovered: false,
            visible: true,
            owner,
        });
        Some(id)
    }

    pub fn get(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ButtonId) -> Option<&mut Button> {
        self.buttons.get_mut(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = ButtonId> + '_ {
        (0..self.buttons.len()).map(ButtonId)
    }

    /// Screen-absolute rectangle for a button, or `None` when the button
    /// (or its owning window) is not visible. Window-owned buttons sit
    /// below the title bar so they never cover chrome.
    pub fn resolve_rect(&self, id: ButtonId, windows: &WindowRegistry) -> Option<Rect> {
        let btn = self.buttons.get(id.0)?;
        if !btn.visible {
            return None;
        }
        match btn.owner {
            None => Some(btn.rect),
            Some(win_id) => {
                let win = windows.get(win_id).filter(|w| w.visible)?;
                Some(Rect::new(
                    win.rect.x + btn.rect.x,
                    win.rect.y + CONTENT_INSET_TOP + btn.rect.y,
                    btn.rect.width,
                    btn.rect.height,
                ))
            }
        }
    }
}

/// Paint one button with its bevel, hover tint, and pressed state.
pub fn draw_button(raster: &mut dyn Raster, btn: &Button, rect: Rect) {
    let bg = if btn.pressed {
        theme::button_press()
    } else if btn.hovered {
        theme::button_hover()
    } else {
        theme::button_bg()
    };

    raster.fill_rect(rect, bg);
    raster.rect(rect, theme::border());

    if btn.pressed {
        raster.hline(rect.x + 1, rect.y + 1, rect.width.saturating_sub(2), Color::DarkGray);
        raster.vline(rect.x + 1, rect.y + 1, rect.height.saturating_sub(2), Color::DarkGray);
    } else {
        raster.hline(rect.x + 1, rect.y + 1, rect.width.saturating_sub(2), Color::White);
        raster.vline(rect.x + 1, rect.y + 1, rect.height.saturating_sub(2), Color::White);
        raster.hline(
            rect.x + 1,
            rect.bottom() - 2,
            rect.width.saturating_sub(2),
            Color::DarkGray,
        );
        raster.vline(
            rect.right() - 2,
            rect.y + 1,
            rect.height.saturating_sub(2),
            Color::DarkGray,
        );
    }

    let mut text_x = rect.x + (rect.width as i32 - font::text_width(&btn.label) as i32) / 2;
    let mut text_y = rect.y + (rect.height as i32 - font::FONT_HEIGHT as i32) / 2;
    if btn.pressed {
        text_x += 1;
        text_y += 1;
    }
    raster.put_string(text_x, text_y, &btn.label, theme::button_fg(), bg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_level_buttons_resolve_verbatim() {
        let windows = WindowRegistry::new();
        let mut widgets = WidgetRegistry::new();
        let id = widgets
            .create(Rect::new(5, 6, 40, 20), "ok", WidgetAction::ToggleStartMenu)
            .unwrap();
        assert_eq!(
            widgets.resolve_rect(id, &windows),
            Some(Rect::new(5, 6, 40, 20))
        );
    }

    #[test]
    fn window_buttons_offset_below_the_chrome() {
        let mut windows = WindowRegistry::new();
        let win = windows.create(Rect::new(100, 50, 200, 150), "w").unwrap();
        let mut widgets = WidgetRegistry::new();
        let id = widgets
            .create_in_window(win, Rect::new(10, 4, 60, 20), "go", WidgetAction::CloseOwner)
            .unwrap();
        assert_eq!(
            widgets.resolve_rect(id, &windows),
            Some(Rect::new(110, 50 + 16 + 4, 60, 20))
        );
    }

    #[test]
    fn hidden_owner_makes_button_unresolvable() {
        let mut windows = WindowRegistry::new();
        let win = windows.create(Rect::new(0, 0, 100, 100), "w").unwrap();
        let mut widgets = WidgetRegistry::new();
        let id = widgets
            .create_in_window(win, Rect::new(0, 0, 10, 10), "x", WidgetAction::CloseOwner)
            .unwrap();
        windows.show(win, false);
        assert_eq!(widgets.resolve_rect(id, &windows), None);
    }

    #[test]
    fn pool_exhaustion_returns_none() {
        let mut widgets = WidgetRegistry::new();
        for i in 0..MAX_BUTTONS {
            assert!(
                widgets
                    .create(Rect::new(0, 0, 1, 1), &format!("b{i}"), WidgetAction::ToggleStartMenu)
                    .is_some()
            );
        }
        assert!(
            widgets
                .create(Rect::new(0, 0, 1, 1), "overflow", WidgetAction::ToggleStartMenu)
                .is_none()
        );
    }
}
