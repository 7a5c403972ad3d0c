//! Desktop icons: fixed launcher boxes on the desktop background.

use crate::apps::AppKind;
use crate::constants::{ICON_HEIGHT, ICON_WIDTH};
use crate::font;
use crate::geometry::Rect;
use crate::palette::Color;
use crate::raster::Raster;

/// A launcher box. Static at runtime; clicking one launches its app.
#[derive(Debug, Clone, Copy)]
pub struct DesktopIcon {
    pub x: i32,
    pub y: i32,
    pub app: AppKind,
}

impl DesktopIcon {
    pub const fn new(x: i32, y: i32, app: AppKind) -> Self {
        Self { x, y, app }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ICON_WIDTH, ICON_HEIGHT)
    }
}

/// The stock icon layout: two columns flanking the desktop.
pub fn default_icons() -> Vec<DesktopIcon> {
    vec![
        DesktopIcon::new(10, 25, AppKind::Browser),
        DesktopIcon::new(10, 70, AppKind::Files),
        DesktopIcon::new(10, 115, AppKind::Notepad),
        DesktopIcon::new(10, 160, AppKind::Terminal),
        DesktopIcon::new(260, 25, AppKind::Calculator),
        DesktopIcon::new(260, 70, AppKind::Settings),
        DesktopIcon::new(260, 115, AppKind::About),
    ]
}

pub fn draw_icon(raster: &mut dyn Raster, icon: &DesktopIcon) {
    let rect = icon.rect();
    raster.fill_rect(rect, Color::White);
    raster.rect(rect, Color::Black);
    // Pictogram block
    raster.fill_rect(Rect::new(icon.x + 14, icon.y + 4, 20, 16), Color::Blue);

    let label = icon.app.label();
    let lx = icon.x + (ICON_WIDTH as i32 - font::text_width(label) as i32) / 2;
    raster.put_string(lx, icon.y + 23, label, Color::Black, Color::White);
}

/// First icon whose box contains the pointer.
pub fn icon_at(icons: &[DesktopIcon], x: i32, y: i32) -> Option<&DesktopIcon> {
    icons.iter().find(|icon| icon.rect().contains(x, y))
}
