use crate::tui::app::App;
use crate::tui::input::{EditField, InputMode};
use crate::tui::theme::DeployerTheme;
use crate::tui::widgets::InputField;
use clarity_deployer::wallet::truncate_middle;
use clarity_deployer::ClarityVersion;
use ratatui::prelude::*;
use ratatui::widgets::*;

pub fn render(frame: &mut Frame, theme: &DeployerTheme, app: &App, area: Rect) {
    let status = app.submitter.status_message();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Version tabs
            Constraint::Length(3), // Contract name
            Constraint::Min(6),    // Source editor
            Constraint::Length(1), // Network
            Constraint::Length(3), // Deploy control
            Constraint::Length(if status.is_some() { 3 } else { 0 }),
        ])
        .split(area);

    render_version_tabs(frame, theme, app, layout[0]);

    let editing = |field: EditField| app.input_mode == InputMode::Insert && app.edit_field == field;

    let mut name = InputField::new("Contract Name [n]", &app.draft.name)
        .placeholder("my-contract")
        .focused(editing(EditField::Name));
    if !app.draft.name.is_empty() {
        name = name.footer(" N: clear ");
    }
    name.render(frame, theme, layout[1]);

    let placeholder = app.draft.placeholder();
    let mut counter = format!(" {} characters ", app.draft.source_char_count());
    if !app.draft.source.is_empty() {
        counter = format!(" E: clear │{}", counter);
    }
    let code_title = format!("Clarity Code (Version {}) [e]", app.draft.version.as_param());
    InputField::new(&code_title, &app.draft.source)
        .placeholder(&placeholder)
        .focused(editing(EditField::Source))
        .footer(counter)
        .render(frame, theme, layout[2]);

    let network = Paragraph::new(Line::from(vec![
        Span::styled(" Network: ", theme.text_dim_style()),
        Span::styled("Testnet", theme.text_primary_style()),
    ]));
    frame.render_widget(network, layout[3]);

    render_deploy_control(frame, theme, app, layout[4]);

    if let Some(message) = status {
        render_status(frame, theme, app, message, layout[5]);
    }
}

fn render_version_tabs(frame: &mut Frame, theme: &DeployerTheme, app: &App, area: Rect) {
    let titles: Vec<Line> = ClarityVersion::ALL
        .iter()
        .map(|version| {
            Line::from(vec![
                Span::raw(format!("{} ", version.label())),
                Span::styled(format!("[{}]", version.badge()), theme.text_dim_style()),
            ])
        })
        .collect();
    let selected = ClarityVersion::ALL
        .iter()
        .position(|v| *v == app.draft.version)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme.text_dim_style())
        .highlight_style(theme.primary_style().bold().reversed())
        .divider("│")
        .block(
            Block::default()
                .title(Span::styled(" Clarity Version [Tab] ", theme.primary_style()))
                .borders(Borders::ALL)
                .border_style(theme.text_dim_style()),
        );

    frame.render_widget(tabs, area);
}

fn render_deploy_control(frame: &mut Frame, theme: &DeployerTheme, app: &App, area: Rect) {
    let (label, style) = if app.submitter.in_progress() {
        ("Deploying...", theme.text_dim_style())
    } else if app.can_deploy() {
        ("d  Deploy Contract", theme.accent_style().bold())
    } else {
        ("Deploy Contract", theme.text_dim_style())
    };

    let widget = Paragraph::new(Span::styled(label, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));

    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, theme: &DeployerTheme, app: &App, message: String, area: Rect) {
    let style = theme.status_style(app.submitter.is_error());
    let spans = match app.submitter.transaction_id() {
        // Long ids are shortened on screen; `t` copies the full value
        Some(txid) => vec![
            Span::styled("Deployment successful! TX ID: ", style),
            Span::styled(truncate_middle(txid, 10, 8), style.bold()),
            Span::styled("  t: copy", theme.text_dim_style()),
        ],
        None => vec![Span::styled(message, style)],
    };

    let widget = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(style));

    frame.render_widget(widget, area);
}
