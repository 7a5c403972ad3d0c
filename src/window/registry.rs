use super::{Window, WindowId};
use crate::constants::MAX_WINDOWS;
use crate::geometry::Rect;

/// Fixed-capacity window arena.
///
/// Slots are handed out in creation order and never reclaimed; closing a
/// window clears its `visible`/`active` flags and nothing else. At most one
/// window is active at a time, and only visible windows can hold that flag.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Vec<Window>,
    active: Option<WindowId>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: Vec::with_capacity(MAX_WINDOWS),
            active: None,
        }
    }

    /// Allocate a window. Returns `None` once the pool is exhausted;
    /// existing windows are untouched either way.
    pub fn create(&mut self, rect: Rect, title: &str) -> Option<WindowId> {
        if self.windows.len() >= MAX_WINDOWS {
            tracing::warn!(title, "window pool exhausted");
            return None;
        }
        let id = WindowId(self.windows.len());
        self.windows.push(Window::new(rect, title));
        tracing::debug!(id = id.0, title, "created window");
        Some(id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn show(&mut self, id: WindowId, visible: bool) {
        if let Some(win) = self.windows.get_mut(id.0) {
            win.visible = visible;
        }
        if !visible && self.active == Some(id) {
            self.clear_active();
        }
    }

    /// Make `id` the single active window, clearing the flag everywhere
    /// else. `None` clears the selection. Activating a hidden or unknown
    /// window is a no-op.
    pub fn set_active(&mut self, id: Option<WindowId>) {
        let Some(id) = id else {
            self.clear_active();
            return;
        };
        match self.windows.get(id.0) {
            Some(win) if win.visible => {}
            _ => return,
        }
        for (i, win) in self.windows.iter_mut().enumerate() {
            win.active = i == id.0;
        }
        self.active = Some(id);
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    /// Hide semantics: the slot survives, the window just stops being
    /// drawn, hit-tested, or active.
    pub fn close(&mut self, id: WindowId) {
        if let Some(win) = self.windows.get_mut(id.0) {
            win.visible = false;
            win.active = false;
            win.dragging = false;
        }
        if self.active == Some(id) {
            self.active = None;
        }
    }

    fn clear_active(&mut self) {
        for win in &mut self.windows {
            win.active = false;
        }
        self.active = None;
    }

    /// Ids in creation order (painting order: oldest first).
    pub fn ids_back_to_front(&self) -> impl Iterator<Item = WindowId> + '_ {
        (0..self.windows.len()).map(WindowId)
    }

    /// Ids newest-first (hit-test order: most recently created wins ties).
    pub fn ids_front_to_back(&self) -> impl Iterator<Item = WindowId> + '_ {
        (0..self.windows.len()).rev().map(WindowId)
    }

    /// The window currently being dragged, if any.
    pub fn dragging(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .position(|win| win.visible && win.dragging)
            .map(WindowId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(10, 20, 100, 80)
    }

    #[test]
    fn at_most_one_window_is_active() {
        let mut reg = WindowRegistry::new();
        let a = reg.create(rect(), "a").unwrap();
        let b = reg.create(rect(), "b").unwrap();
        reg.set_active(Some(a));
        reg.set_active(Some(b));
        let active: Vec<_> = reg
            .ids_back_to_front()
            .filter(|&id| reg.get(id).unwrap().active)
            .collect();
        assert_eq!(active, vec![b]);
        assert_eq!(reg.active(), Some(b));
    }

    #[test]
    fn activating_hidden_window_is_a_no_op() {
        let mut reg = WindowRegistry::new();
        let a = reg.create(rect(), "a").unwrap();
        let b = reg.create(rect(), "b").unwrap();
        reg.set_active(Some(a));
        reg.show(b, false);
        reg.set_active(Some(b));
        assert_eq!(reg.active(), Some(a));
    }

    #[test]
    fn pool_exhaustion_returns_none_and_preserves_existing() {
        let mut reg = WindowRegistry::new();
        let ids: Vec<_> = (0..MAX_WINDOWS)
            .map(|i| reg.create(rect(), &format!("w{i}")).unwrap())
            .collect();
        assert!(reg.create(rect(), "overflow").is_none());
        assert_eq!(reg.len(), MAX_WINDOWS);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(reg.get(*id).unwrap().title, format!("w{i}"));
        }
    }

    #[test]
    fn close_clears_active_only_for_that_window() {
        let mut reg = WindowRegistry::new();
        let a = reg.create(rect(), "a").unwrap();
        let b = reg.create(rect(), "b").unwrap();
        reg.set_active(Some(a));
        reg.close(b);
        assert_eq!(reg.active(), Some(a));
        reg.close(a);
        assert_eq!(reg.active(), None);
        assert!(!reg.get(a).unwrap().visible);
    }

    #[test]
    fn hiding_the_active_window_clears_the_selection() {
        let mut reg = WindowRegistry::new();
        let a = reg.create(rect(), "a").unwrap();
        reg.set_active(Some(a));
        reg.show(a, false);
        assert_eq!(reg.active(), None);
        assert!(!reg.get(a).unwrap().active);
    }

    #[test]
    fn set_active_none_clears_selection() {
        let mut reg = WindowRegistry::new();
        let a = reg.create(rect(), "a").unwrap();
        reg.set_active(Some(a));
        reg.set_active(None);
        assert_eq!(reg.active(), None);
        assert!(!reg.get(a).unwrap().active);
    }

    #[test]
    fn front_to_back_is_reverse_creation_order() {
        let mut reg = WindowRegistry::new();
        let a = reg.create(rect(), "a").unwrap();
        let b = reg.create(rect(), "b").unwrap();
        let order: Vec<_> = reg.ids_front_to_back().collect();
        assert_eq!(order, vec![b, a]);
    }
}
