use ratatui::style::{Color, Style};

use crate::tui::input::InputMode;

/// Indigo/purple palette on a dark gray background
pub struct DeployerTheme {
    pub primary: Color,
    pub accent: Color,
    pub surface: Color,
    pub text_primary: Color,
    pub text_dim: Color,
    pub success: Color,
    pub error: Color,
    pub mode_normal: Color,
    pub mode_insert: Color,
}

impl Default for DeployerTheme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(129, 140, 248), // #818CF8 - indigo-400
            accent: Color::Rgb(192, 132, 252),  // #C084FC - purple-400
            surface: Color::Rgb(31, 41, 55),    // #1F2937 - gray-800
            text_primary: Color::Rgb(243, 244, 246), // #F3F4F6
            text_dim: Color::Rgb(156, 163, 175),     // #9CA3AF
            success: Color::Rgb(134, 239, 172), // #86EFAC - green-300
            error: Color::Rgb(252, 165, 165), // #FCA5A5 - red-300
            mode_normal: Color::Blue,
            mode_insert: Color::Green,
        }
    }
}

impl DeployerTheme {
    /// Get the primary style for titles and active elements
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Get the surface style for panels
    pub fn surface_style(&self) -> Style {
        Style::default().bg(self.surface)
    }

    /// Get the primary text style
    pub fn text_primary_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Get the dim text style
    pub fn text_dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    /// Style for a status banner
    pub fn status_style(&self, is_error: bool) -> Style {
        if is_error {
            Style::default().fg(self.error)
        } else {
            Style::default().fg(self.success)
        }
    }

    /// Get style for a specific mode indicator
    pub fn mode_style(&self, mode: InputMode) -> Style {
        let color = match mode {
            InputMode::Normal => self.mode_normal,
            InputMode::Insert => self.mode_insert,
        };
        Style::default().fg(color)
    }
}
