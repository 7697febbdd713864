//! Theme configuration for the TUI.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub border: Color,
    pub title: Color,
    pub axis: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            bg: Color::Reset,
            fg: Color::White,
            highlight_bg: Color::Rgb(60, 60, 80),
            highlight_fg: Color::White,
            border: Color::Rgb(100, 100, 120),
            title: Color::Cyan,
            axis: Color::Gray,
        }
    }
}

impl Theme {
    /// Base surface style used to paint widget backgrounds
    pub fn surface_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Convenience helper returning (border_style, title_style) for focus state
    pub fn panel_styles(&self, focused: bool) -> (Style, Style) {
        if focused {
            (self.focused_border_style(), self.focused_border_style())
        } else {
            (self.border_style(), self.title_style())
        }
    }

    /// Get style for normal text
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for highlighted/selected items
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for focused panel borders (distinct from normal borders)
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for titles
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for de-emphasized text (hints, axis titles)
    pub fn dimmed_style(&self) -> Style {
        Style::default()
            .fg(self.axis)
            .add_modifier(Modifier::DIM)
    }

    /// Terminal color for a hex color carried by a chart spec.
    /// Unparseable values fall back to the foreground color.
    pub fn spec_color(&self, hex: &str) -> Color {
        Color::from_str(hex).unwrap_or(self.fg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_color_parses_hex() {
        let theme = Theme::default();
        assert_eq!(theme.spec_color("#28a745"), Color::Rgb(0x28, 0xa7, 0x45));
        assert_eq!(theme.spec_color("#dc3545"), Color::Rgb(0xdc, 0x35, 0x45));
    }

    #[test]
    fn test_spec_color_fallback() {
        let theme = Theme::default();
        assert_eq!(theme.spec_color("not-a-color"), theme.fg);
    }

    #[test]
    fn test_focused_border_differs() {
        let theme = Theme::default();
        let (focused, _) = theme.panel_styles(true);
        let (normal, _) = theme.panel_styles(false);
        assert_ne!(focused, normal);
    }
}
