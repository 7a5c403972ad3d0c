//! Shared crate-wide constants.
//!
//! Chrome metrics are in screen pixels and are shared between the hit-test
//! paths in `input` and the drawing paths in `window::chrome` and `panel`;
//! keeping them in one place keeps those two sides agreeing.

/// Default screen width in pixels.
pub const SCREEN_WIDTH: u32 = 640;

/// Default screen height in pixels.
pub const SCREEN_HEIGHT: u32 = 480;

/// Window pool capacity. Slots are allocated monotonically and never
/// recycled; closing a window only hides it.
pub const MAX_WINDOWS: usize = 8;

/// Button pool capacity.
pub const MAX_BUTTONS: usize = 32;

/// Height of the menu bar strip along the top edge. Windows are clamped
/// below this line while dragging so their title bars stay grabbable.
pub const MENU_BAR_HEIGHT: u32 = 13;

/// Height of the taskbar along the bottom edge.
pub const TASKBAR_HEIGHT: u32 = 28;

/// Height of the title-bar hit region measured from a window's top edge.
/// Clicks in this band begin a drag.
pub const TITLEBAR_HEIGHT: u32 = 20;

/// Vertical inset from a window's top edge to its content area. Window
/// buttons and app content both start below this line so neither overlaps
/// the chrome.
pub const CONTENT_INSET_TOP: i32 = 16;

/// Close button size and placement inside the title bar.
pub const CLOSE_BUTTON_WIDTH: u32 = 16;
pub const CLOSE_BUTTON_HEIGHT: u32 = 14;
/// Horizontal distance from the window's right edge to the close button's
/// left edge.
pub const CLOSE_BUTTON_RIGHT_INSET: i32 = 22;
/// Vertical offset from the window's top edge to the close button.
pub const CLOSE_BUTTON_TOP_INSET: i32 = 5;

/// Desktop icon box size.
pub const ICON_WIDTH: u32 = 48;
pub const ICON_HEIGHT: u32 = 32;

/// Start button geometry inside the taskbar.
pub const START_BUTTON_WIDTH: u32 = 60;
pub const START_BUTTON_HEIGHT: u32 = 22;

/// Start menu panel size; rows are `MENU_ITEM_HEIGHT` tall.
pub const START_MENU_WIDTH: u32 = 140;
pub const START_MENU_HEIGHT: u32 = 120;
pub const MENU_ITEM_HEIGHT: u32 = 20;
