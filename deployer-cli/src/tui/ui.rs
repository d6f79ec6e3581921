use ratatui::prelude::*;
use ratatui::widgets::*;

use clarity_deployer::wallet::truncate_middle;

use crate::tui::app::App;
use crate::tui::input::{EditField, InputMode};
use crate::tui::screens;
use crate::tui::theme::DeployerTheme;

/// Render the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let theme = DeployerTheme::default();

    // Main layout: header, content, footer
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, &theme, app, main_layout[0]);

    if app.tracker.is_connected() {
        screens::deploy::render(frame, &theme, app, main_layout[1]);
    } else {
        screens::connect::render(frame, &theme, app, main_layout[1]);
    }

    render_footer(frame, &theme, app, main_layout[2]);

    // Spinner overlay while connecting or deploying
    if app.spinner.spinning {
        let area = centered_rect(50, 3, frame.area());
        app.spinner.render(frame, &theme, area);
    }
}

fn render_header(frame: &mut Frame, theme: &DeployerTheme, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(48)])
        .split(area);

    let mut title = vec![Span::styled(" Clarity Deployer", theme.primary_style().bold())];
    if let Some((ref msg, is_error)) = app.status_message {
        title.push(Span::styled(format!(" │ {}", msg), theme.status_style(is_error)));
    }

    let header = Paragraph::new(Line::from(title)).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM | Borders::LEFT)
            .border_style(theme.primary_style()),
    );
    frame.render_widget(header, columns[0]);

    let wallet = if app.tracker.is_connected() {
        let address = app
            .tracker
            .address()
            .map(|a| truncate_middle(a, 6, 4))
            .unwrap_or_else(|| "connected".to_string());
        let copy = if app.copied_ticks > 0 {
            Span::styled("Copied!", Style::default().fg(theme.success))
        } else {
            Span::styled("y: copy", theme.text_dim_style())
        };
        Line::from(vec![
            Span::styled(address, theme.text_primary_style()),
            Span::styled("  ", theme.text_dim_style()),
            copy,
            Span::styled("  x: disconnect ", theme.text_dim_style()),
        ])
    } else if app.connecting {
        Line::from(Span::styled("Connecting... ", theme.text_dim_style()))
    } else {
        Line::from(Span::styled("c: Connect Wallet ", theme.accent_style().bold()))
    };

    let wallet = Paragraph::new(wallet).alignment(Alignment::Right).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM | Borders::RIGHT)
            .border_style(theme.primary_style()),
    );
    frame.render_widget(wallet, columns[1]);
}

fn render_footer(frame: &mut Frame, theme: &DeployerTheme, app: &App, area: Rect) {
    let mode_text = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Insert => "INSERT",
    };

    let help_text = match (app.input_mode, app.edit_field) {
        (InputMode::Insert, EditField::Name) => "Type name | Enter/Esc: Done",
        (InputMode::Insert, EditField::Source) => "Type code | Enter: Newline | Esc: Done",
        (InputMode::Normal, _) if !app.tracker.is_connected() => "c: Connect | q: Quit",
        (InputMode::Normal, _) => {
            "Tab/1/2: Version | n: Name | e: Code | d: Deploy | t: Copy TX | x: Disconnect | q: Quit"
        }
    };

    let footer_line = Line::from(vec![
        Span::styled(format!(" {} ", mode_text), theme.mode_style(app.input_mode).bold()),
        Span::styled(" │ ", theme.text_dim_style()),
        Span::styled(help_text, theme.text_dim_style()),
    ]);

    let footer = Paragraph::new(footer_line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );

    frame.render_widget(footer, area);
}

/// Centered rect: `percent_x` of the width, `height` rows tall
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::App;
    use async_trait::async_trait;
    use clarity_deployer::wallet::{SessionStorage, WalletConnector};
    use clarity_deployer::{AppConfig, AppResult};
    use ratatui::backend::TestBackend;
    use serde_json::Value;
    use std::sync::Arc;

    struct StaticWallet(Option<SessionStorage>);

    #[async_trait]
    impl WalletConnector for StaticWallet {
        async fn connect(&self) -> AppResult<()> {
            Ok(())
        }
        async fn disconnect(&self) -> AppResult<()> {
            Ok(())
        }
        fn is_connected(&self) -> bool {
            self.0.is_some()
        }
        fn get_local_storage(&self) -> Option<SessionStorage> {
            self.0.clone()
        }
        async fn request(&self, _method: &str, _params: Value) -> AppResult<Value> {
            Ok(Value::Null)
        }
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn disconnected_shows_connect_panel() {
        let app = App::new(AppConfig::default(), Arc::new(StaticWallet(None)));
        let screen = draw(&app);
        assert!(screen.contains("Connect Your Wallet"));
        assert!(!screen.contains("Network: Testnet"));
    }

    #[test]
    fn connected_shows_form_and_truncated_address() {
        let storage = SessionStorage::with_stx("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");
        let app = App::new(AppConfig::default(), Arc::new(StaticWallet(Some(storage))));
        let screen = draw(&app);
        assert!(screen.contains("ST1PQH...GZGM"));
        assert!(screen.contains("Network: Testnet"));
        assert!(screen.contains("Clarity v2"));
        assert!(screen.contains("Latest"));
        assert!(screen.contains("0 characters"));
    }

    #[test]
    fn code_editor_title_follows_version_tab() {
        let storage = SessionStorage::with_stx("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");
        let mut app = App::new(AppConfig::default(), Arc::new(StaticWallet(Some(storage))));
        assert!(draw(&app).contains("Clarity Code (Version 2)"));

        app.draft.select_version(clarity_deployer::ClarityVersion::V3);
        let screen = draw(&app);
        assert!(screen.contains("Clarity Code (Version 3)"));
        assert!(screen.contains("Hello, Clarity v3!"));
    }
}
