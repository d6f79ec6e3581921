use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::theme::DeployerTheme;

const CURSOR: &str = "█";

/// Bordered text input. Shows a dimmed placeholder while empty and keeps the
/// tail of multi-line content in view.
pub struct InputField<'a> {
    pub title: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    /// Right-aligned annotation in the bottom border, e.g. a character count
    pub footer: Option<String>,
}

impl<'a> InputField<'a> {
    pub fn new(title: &'a str, value: &'a str) -> Self {
        Self {
            title,
            value,
            placeholder: "",
            focused: false,
            footer: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn render(&self, frame: &mut Frame, theme: &DeployerTheme, area: Rect) {
        let border_style = if self.focused {
            theme.accent_style()
        } else {
            theme.text_dim_style()
        };

        let mut block = Block::default()
            .title(Span::styled(format!(" {} ", self.title), theme.primary_style()))
            .borders(Borders::ALL)
            .border_style(border_style);
        if let Some(ref footer) = self.footer {
            block = block.title_bottom(Line::from(footer.as_str()).right_aligned());
        }

        let lines = self.lines(theme);
        let visible = area.height.saturating_sub(2) as usize;
        let scroll = lines.len().saturating_sub(visible.max(1));
        let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

        let widget = Paragraph::new(lines).block(block).scroll((scroll, 0));
        frame.render_widget(widget, area);
    }

    fn lines(&self, theme: &DeployerTheme) -> Vec<Line<'a>> {
        if self.value.is_empty() {
            let mut lines: Vec<Line> = self
                .placeholder
                .lines()
                .map(|l| Line::from(Span::styled(l, theme.text_dim_style())))
                .collect();
            if self.focused {
                lines.insert(0, Line::from(Span::styled(CURSOR, theme.accent_style())));
            }
            return lines;
        }

        // split('\n') keeps a trailing empty line so the cursor follows Enter
        let mut lines: Vec<Line> = self
            .value
            .split('\n')
            .map(|l| Line::from(Span::styled(l, theme.text_primary_style())))
            .collect();
        if self.focused {
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::styled(CURSOR, theme.accent_style()));
            }
        }
        lines
    }
}
