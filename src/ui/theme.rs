//! Marquee theme for movierec
//!
//! Color palette and style helpers. Suggestion rows and poster cards each
//! get their own role so selected and recommended movies read apart.

use ratatui::style::{Color, Modifier, Style};

/// Marquee color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #101014 (theater dark)
    pub const BACKGROUND: Color = Color::Rgb(0x10, 0x10, 0x14);

    /// Primary: #f5c518 (marquee gold)
    pub const PRIMARY: Color = Color::Rgb(0xf5, 0xc5, 0x18);

    /// Secondary: #e50914 (curtain red)
    pub const SECONDARY: Color = Color::Rgb(0xe5, 0x09, 0x14);

    /// Accent: #4fc3f7 (screen blue)
    pub const ACCENT: Color = Color::Rgb(0x4f, 0xc3, 0xf7);

    /// Text: #ececec
    pub const TEXT: Color = Color::Rgb(0xec, 0xec, 0xec);

    /// Dim: #6b6b78
    pub const DIM: Color = Color::Rgb(0x6b, 0x6b, 0x78);

    /// Selected row background: #a9a9a9 (darkgray)
    pub const SELECTED_BG: Color = Color::Rgb(0xa9, 0xa9, 0xa9);

    /// Warning: #ffa726
    pub const WARNING: Color = Color::Rgb(0xff, 0xa7, 0x26);

    /// Error: #ff5252
    pub const ERROR: Color = Color::Rgb(0xff, 0x52, 0x52);

    /// Slightly lighter background for panels/cards
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x1c, 0x1c, 0x24);

    /// Border color (dim gold)
    pub const BORDER: Color = Color::Rgb(0x7a, 0x62, 0x0c);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SUGGESTIONS AND CARDS
    // ═══════════════════════════════════════════════════════════════════════

    /// Suggestion row
    pub fn suggestion_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Suggestion row whose movie is in the selection
    pub fn suggestion_selected() -> Style {
        Style::default().fg(Self::BACKGROUND).bg(Self::SELECTED_BG)
    }

    /// Keyboard highlight on top of a row or card
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Border of a card in the selection view
    pub fn selected_movie() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Border of a card in the recommendations view
    pub fn recommended_movie() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Poster line (image address or alt text)
    pub fn movie_poster() -> Style {
        Style::default()
            .fg(Self::DIM)
            .add_modifier(Modifier::ITALIC)
    }

    /// Card caption
    pub fn movie_title() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_row_stands_out() {
        assert_ne!(Theme::suggestion_item(), Theme::suggestion_selected());
        assert_ne!(Theme::suggestion_selected(), Theme::highlighted());
    }

    #[test]
    fn test_card_kinds_differ() {
        assert_ne!(Theme::selected_movie(), Theme::recommended_movie());
    }
}
