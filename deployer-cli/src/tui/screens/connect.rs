use crate::tui::app::App;
use crate::tui::theme::DeployerTheme;
use ratatui::prelude::*;
use ratatui::widgets::*;

pub fn render(frame: &mut Frame, theme: &DeployerTheme, app: &App, area: Rect) {
    let panel = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(area)[1];

    let action = if app.connecting {
        Line::from(Span::styled(
            "Waiting for your wallet...",
            theme.text_dim_style(),
        ))
    } else {
        Line::from(vec![
            Span::styled(" c ", theme.accent_style().bold().reversed()),
            Span::styled("  Connect Wallet", theme.text_primary_style()),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Connect Your Wallet",
            theme.primary_style().bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Connect your Stacks wallet to deploy Clarity smart contracts",
            theme.text_dim_style(),
        )),
        Line::from(""),
        action,
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(theme.surface_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );

    frame.render_widget(widget, panel);
}
