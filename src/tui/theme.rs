//! TUI color theme in GitHub's light and dark palettes

use ratatui::style::Color;

use crate::chat::ThemeMode;

/// TUI color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub secondary_background: Color,
    pub text: Color,
    pub secondary_text: Color,
    pub border: Color,
    pub primary: Color,
    pub input_background: Color,
    pub message_in: Color,
    pub message_out: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Text drawn on top of the outgoing bubble
    pub const ON_ACCENT: Color = Color::Rgb(255, 255, 255);
    /// Timestamps on the outgoing bubble
    pub const ON_ACCENT_MUTED: Color = Color::Rgb(214, 228, 250);

    /// Palette for the given mode.
    pub fn resolve(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(255, 255, 255),
            secondary_background: Color::Rgb(246, 248, 250),
            text: Color::Rgb(36, 41, 46),
            secondary_text: Color::Rgb(106, 115, 125),
            border: Color::Rgb(225, 228, 232),
            primary: Color::Rgb(3, 102, 214),
            input_background: Color::Rgb(255, 255, 255),
            message_in: Color::Rgb(246, 248, 250),
            message_out: Color::Rgb(3, 102, 214),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(13, 17, 23),
            secondary_background: Color::Rgb(22, 27, 34),
            text: Color::Rgb(240, 246, 252),
            secondary_text: Color::Rgb(139, 148, 158),
            border: Color::Rgb(48, 54, 61),
            primary: Color::Rgb(88, 166, 255),
            input_background: Color::Rgb(13, 17, 23),
            message_in: Color::Rgb(33, 38, 45),
            message_out: Color::Rgb(31, 111, 235),
        }
    }
}
