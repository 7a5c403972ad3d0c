use pixel_wm::constants::MAX_WINDOWS;
use pixel_wm::geometry::Rect;
use pixel_wm::window::WindowRegistry;

fn rect() -> Rect {
    Rect::new(50, 50, 200, 150)
}

#[test]
fn exactly_one_window_active_after_each_activation() {
    let mut reg = WindowRegistry::new();
    let ids: Vec<_> = (0..4).map(|i| reg.create(rect(), &format!("w{i}")).unwrap()).collect();

    for &id in &ids {
        reg.set_active(Some(id));
        let active: Vec<_> = reg
            .ids_back_to_front()
            .filter(|&w| reg.get(w).unwrap().active)
            .collect();
        assert_eq!(active, vec![id]);
        assert_eq!(reg.active(), Some(id));
    }
}

#[test]
fn creating_past_capacity_returns_sentinel_and_preserves_pool() {
    let mut reg = WindowRegistry::new();
    let titles: Vec<String> = (0..MAX_WINDOWS).map(|i| format!("w{i}")).collect();
    let ids: Vec<_> = titles
        .iter()
        .map(|t| reg.create(rect(), t).unwrap())
        .collect();

    // The (MAX_WINDOWS + 1)th creation fails without touching the rest.
    assert!(reg.create(rect(), "one too many").is_none());
    assert_eq!(reg.len(), MAX_WINDOWS);
    for (id, title) in ids.iter().zip(&titles) {
        let win = reg.get(*id).unwrap();
        assert_eq!(&win.title, title);
        assert!(win.visible);
    }
}

#[test]
fn closing_active_window_clears_selection_closing_other_does_not() {
    let mut reg = WindowRegistry::new();
    let a = reg.create(rect(), "a").unwrap();
    let b = reg.create(rect(), "b").unwrap();

    reg.set_active(Some(a));
    reg.close(b);
    assert_eq!(reg.active(), Some(a));

    reg.close(a);
    assert_eq!(reg.active(), None);
    // Closed windows stay allocated, only hidden.
    assert_eq!(reg.len(), 2);
    assert!(!reg.get(a).unwrap().visible);
}

#[test]
fn closed_windows_cannot_be_reactivated_until_shown() {
    let mut reg = WindowRegistry::new();
    let a = reg.create(rect(), "a").unwrap();
    reg.close(a);
    reg.set_active(Some(a));
    assert_eq!(reg.active(), None);

    reg.show(a, true);
    reg.set_active(Some(a));
    assert_eq!(reg.active(), Some(a));
}
