//! Colors for the tuning panel in dark and light terminals.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Semantic colors used by every panel widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Borders and titles
    pub primary: Color,
    /// Selected row and focused widget
    pub accent: Color,
    /// Confirmations
    pub success: Color,
    /// Failures
    pub error: Color,
    /// Values that differ from the loaded file
    pub modified: Color,

    /// Body text
    pub text: Color,
    /// Labels and secondary text
    pub text_secondary: Color,
    /// Help text and disabled items
    pub text_muted: Color,

    /// Background of the selected row
    pub highlight_bg: Color,
    /// Filled part of a slider
    pub gauge_filled: Color,
    /// Empty part of a slider
    pub gauge_empty: Color,
}

impl Theme {
    /// Picks a theme from the OS appearance, falling back to dark.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Theme for a configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Bright chrome on a dark background.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            modified: Color::Magenta,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            highlight_bg: Color::DarkGray,
            gauge_filled: Color::Cyan,
            gauge_empty: Color::Rgb(40, 40, 40),
        }
    }

    /// Darker chrome that stays readable on a light background.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            modified: Color::Rgb(140, 0, 140),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            highlight_bg: Color::Rgb(230, 230, 230),
            gauge_filled: Color::Blue,
            gauge_empty: Color::Rgb(215, 215, 215),
        }
    }

    /// Style for block titles.
    #[must_use]
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the selected row.
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_modes() {
        assert_eq!(Theme::from_mode(ThemeMode::Dark), Theme::dark());
        assert_eq!(Theme::from_mode(ThemeMode::Light), Theme::light());
    }

    #[test]
    fn test_light_theme_avoids_bright_accent() {
        let light = Theme::light();
        assert_eq!(light.text, Color::Black);
        assert_ne!(light.accent, Color::Yellow);
    }

    #[test]
    fn test_selected_style_uses_accent() {
        let theme = Theme::dark();
        let style = theme.selected();
        assert_eq!(style.fg, Some(theme.accent));
        assert_eq!(style.bg, Some(theme.highlight_bg));
    }

    #[test]
    fn test_detect_does_not_panic() {
        let theme = Theme::detect();
        assert!(theme == Theme::dark() || theme == Theme::light());
    }
}
