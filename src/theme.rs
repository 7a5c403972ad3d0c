use crate::palette::Color;

// Centralized chrome colors. Keep these as small helpers so every drawing
// path pulls from one table instead of hard-coding palette indices.

/// Desktop background theme, selectable from settings or the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Teal,
    Gray,
    Blue,
}

impl Theme {
    pub fn from_index(index: u8) -> Theme {
        match index {
            1 => Theme::Gray,
            2 => Theme::Blue,
            _ => Theme::Teal,
        }
    }

    pub fn desktop(self) -> Color {
        match self {
            Theme::Teal => Color::Cyan,
            Theme::Gray => Color::LightGray,
            Theme::Blue => Color::Blue,
        }
    }
}

// Window chrome
pub fn window_bg() -> Color {
    Color::LightGray
}
pub fn window_fg() -> Color {
    Color::Black
}
pub fn titlebar_active() -> Color {
    Color::Blue
}
pub fn titlebar_inactive() -> Color {
    Color::DarkGray
}
pub fn titlebar_highlight() -> Color {
    Color::LightBlue
}
pub fn title_text() -> Color {
    Color::White
}
pub fn border() -> Color {
    Color::Black
}

// Buttons
pub fn button_bg() -> Color {
    Color::LightGray
}
pub fn button_fg() -> Color {
    Color::Black
}
pub fn button_hover() -> Color {
    Color::LightCyan
}
pub fn button_press() -> Color {
    Color::DarkGray
}

// Panel / taskbar
pub fn taskbar_bg() -> Color {
    Color::LightGray
}
pub fn menu_bg() -> Color {
    Color::LightGray
}
pub fn menu_fg() -> Color {
    Color::Black
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_index_selects_desktop_color() {
        assert_eq!(Theme::from_index(0).desktop(), Color::Cyan);
        assert_eq!(Theme::from_index(1).desktop(), Color::LightGray);
        assert_eq!(Theme::from_index(2).desktop(), Color::Blue);
        // unknown indices fall back to the default theme
        assert_eq!(Theme::from_index(7).desktop(), Color::Cyan);
    }
}
