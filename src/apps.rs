//! Application surface: the provider trait windows render through, and the
//! table associating app kinds with their windows.
//!
//! The compositor itself only ever holds a `WindowId`; everything
//! app-specific is resolved through [`AppTable`] at dispatch time.

use std::collections::HashMap;

use crate::geometry::Rect;
use crate::raster::Raster;
use crate::window::{Window, WindowId, WindowRegistry};

/// The closed set of launchable applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKind {
    Browser,
    Files,
    Notepad,
    Terminal,
    Calculator,
    Settings,
    About,
}

impl AppKind {
    pub const ALL: [AppKind; 7] = [
        AppKind::Browser,
        AppKind::Files,
        AppKind::Notepad,
        AppKind::Terminal,
        AppKind::Calculator,
        AppKind::Settings,
        AppKind::About,
    ];

    /// Short label used by desktop icons and menu rows.
    pub fn label(self) -> &'static str {
        match self {
            AppKind::Browser => "Browser",
            AppKind::Files => "Files",
            AppKind::Notepad => "Notepad",
            AppKind::Terminal => "Terminal",
            AppKind::Calculator => "Calc",
            AppKind::Settings => "Settings",
            AppKind::About => "About",
        }
    }

    /// Window title shown in the chrome.
    pub fn title(self) -> &'static str {
        match self {
            AppKind::Browser => "Browser",
            AppKind::Files => "Files",
            AppKind::Notepad => "Notepad",
            AppKind::Terminal => "Terminal",
            AppKind::Calculator => "Calc",
            AppKind::Settings => "Settings",
            AppKind::About => "About",
        }
    }

    /// Initial window placement the first time the app launches.
    pub fn default_rect(self) -> Rect {
        match self {
            AppKind::Browser => Rect::new(120, 50, 400, 300),
            AppKind::Files => Rect::new(140, 70, 360, 280),
            AppKind::Notepad => Rect::new(160, 60, 380, 300),
            AppKind::Terminal => Rect::new(130, 90, 420, 280),
            AppKind::Calculator => Rect::new(200, 100, 160, 200),
            AppKind::Settings => Rect::new(150, 80, 320, 280),
            AppKind::About => Rect::new(180, 120, 280, 180),
        }
    }
}

/// Per-application hooks the compositor calls into. A window with no
/// registered provider simply has empty content.
pub trait ContentProvider {
    /// Paint the window interior. Called with the window whose content
    /// area belongs to this provider.
    fn draw(&mut self, raster: &mut dyn Raster, win: &Window);

    /// A key routed to this app's window. `key` is never zero.
    fn handle_key(&mut self, _key: u8) {}

    /// A click inside the window's content area, in screen coordinates.
    /// Return `true` when consumed.
    fn handle_click(&mut self, _win: &Window, _x: i32, _y: i32) -> bool {
        false
    }
}

/// Association table from app kind to window id and provider instance.
#[derive(Default)]
pub struct AppTable {
    providers: HashMap<AppKind, Box<dyn ContentProvider>>,
    windows: HashMap<AppKind, WindowId>,
}

impl AppTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: AppKind, provider: Box<dyn ContentProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn window_of(&self, kind: AppKind) -> Option<WindowId> {
        self.windows.get(&kind).copied()
    }

    pub fn kind_of(&self, id: WindowId) -> Option<AppKind> {
        self.windows
            .iter()
            .find(|&(_, win)| *win == id)
            .map(|(kind, _)| *kind)
    }

    /// Bring an app's window up: reuse and reshow the existing window, or
    /// create one at the default placement. The launched window becomes
    /// active. Returns `None` only when the window pool is exhausted.
    pub fn launch(&mut self, kind: AppKind, registry: &mut WindowRegistry) -> Option<WindowId> {
        let id = match self.windows.get(&kind) {
            Some(&id) => {
                registry.show(id, true);
                id
            }
            None => {
                let id = registry.create(kind.default_rect(), kind.title())?;
                self.windows.insert(kind, id);
                id
            }
        };
        registry.set_active(Some(id));
        tracing::info!(?kind, id = id.index(), "launched app");
        Some(id)
    }

    pub fn provider_mut(&mut self, kind: AppKind) -> Option<&mut (dyn ContentProvider + 'static)> {
        self.providers.get_mut(&kind).map(move |p| p.as_mut())
    }

    /// Paint one window's content if a provider owns it.
    pub fn draw_content(&mut self, raster: &mut dyn Raster, id: WindowId, win: &Window) {
        if let Some(kind) = self.kind_of(id)
            && let Some(provider) = self.providers.get_mut(&kind)
        {
            provider.draw(raster, win);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nop;
    impl ContentProvider for Nop {
        fn draw(&mut self, _raster: &mut dyn Raster, _win: &Window) {}
    }

    #[test]
    fn launch_creates_then_reuses_a_window() {
        let mut table = AppTable::new();
        let mut reg = WindowRegistry::new();
        let first = table.launch(AppKind::Notepad, &mut reg).unwrap();
        assert_eq!(reg.active(), Some(first));
        reg.close(first);
        let second = table.launch(AppKind::Notepad, &mut reg).unwrap();
        assert_eq!(first, second);
        assert!(reg.get(second).unwrap().visible);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn kind_of_resolves_launched_windows() {
        let mut table = AppTable::new();
        let mut reg = WindowRegistry::new();
        table.register(AppKind::About, Box::new(Nop));
        let id = table.launch(AppKind::About, &mut reg).unwrap();
        assert_eq!(table.kind_of(id), Some(AppKind::About));
        assert_eq!(table.window_of(AppKind::About), Some(id));
        assert_eq!(table.window_of(AppKind::Files), None);
    }
}
