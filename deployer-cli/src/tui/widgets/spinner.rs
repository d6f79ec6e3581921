use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::theme::DeployerTheme;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner {
    pub message: String,
    pub frame: usize,
    pub spinning: bool,
}

impl Spinner {
    pub fn new(message: String) -> Self {
        Self {
            message,
            frame: 0,
            spinning: false,
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn start(&mut self) {
        self.spinning = true;
    }

    pub fn stop(&mut self) {
        self.spinning = false;
        self.frame = 0;
    }

    pub fn tick(&mut self) {
        if self.spinning {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
    }

    /// Render as an overlay; clears whatever is underneath.
    pub fn render(&self, frame: &mut Frame, theme: &DeployerTheme, area: Rect) {
        if !self.spinning {
            return;
        }

        let text = format!("{} {}", FRAMES[self.frame % FRAMES.len()], self.message);
        let widget = Paragraph::new(text)
            .style(theme.text_primary_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.accent_style()),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_advances_while_spinning() {
        let mut spinner = Spinner::new("Working".to_string());
        spinner.tick();
        assert_eq!(spinner.frame, 0);

        spinner.start();
        for _ in 0..FRAMES.len() + 1 {
            spinner.tick();
        }
        assert_eq!(spinner.frame, 1);

        spinner.stop();
        assert_eq!(spinner.frame, 0);
        assert!(!spinner.spinning);
    }
}
