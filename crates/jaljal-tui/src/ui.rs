use crate::app::{App, Focus, InputField};
use jaljal_core::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(8), // Form
            Constraint::Min(0),    // Results
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_form(f, app, chunks[1]);
    draw_results(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);

    if app.show_help {
        draw_help(f, f.area());
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("jaljal - Video Combination Search")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4)])
        .split(area);

    let duration_title = format!(
        " Duration (minutes, max {}) ",
        app.engine.policy().max_minutes
    );
    draw_field(
        f,
        chunks[0],
        &duration_title,
        &app.duration,
        app.focus == Focus::Duration,
    );
    draw_field(
        f,
        chunks[1],
        " Combinations (1-10) ",
        &app.attempts,
        app.focus == Focus::Attempts,
    );
}

fn draw_field(f: &mut Frame, area: Rect, title: &str, field: &InputField, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let cursor = if focused { "_" } else { "" };
    let mut lines = vec![Line::from(format!("{}{}", field.value, cursor))];
    if let Some(err) = &field.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title.to_string()),
    );
    f.render_widget(paragraph, area);
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.focus {
        Focus::Results => " Results [FOCUSED] ",
        _ => " Results ",
    };

    let view = app.view();
    let style = match &view {
        View::Error { .. } => Style::default().fg(Color::Red),
        View::Loading { .. } | View::Empty { .. } => Style::default().fg(Color::DarkGray),
        _ => Style::default(),
    };

    // Inline errors are already shown under their field
    let lines: Vec<Line> = match &view {
        View::Error { inline: true, .. } => Vec::new(),
        View::Blank => vec![Line::from(
            "Enter a duration and press Enter to search.".to_string(),
        )],
        other => other
            .to_lines()
            .into_iter()
            .map(|text| styled_line(text, style))
            .collect(),
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0));

    f.render_widget(paragraph, area);
}

fn styled_line(text: String, base: Style) -> Line<'static> {
    if text.starts_with("Combination ") {
        Line::from(Span::styled(
            text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    } else if text.trim_start().starts_with("Total:") {
        Line::from(Span::styled(text, Style::default().fg(Color::Green)))
    } else {
        Line::from(Span::styled(text, base))
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let status = if app.is_loading() {
        "Searching..."
    } else {
        "Ready"
    };

    let help_text = vec![
        Span::raw(status),
        Span::raw(" | "),
        Span::styled("enter", Style::default().fg(Color::Yellow)),
        Span::raw(":search "),
        Span::styled("tab", Style::default().fg(Color::Yellow)),
        Span::raw(":next field "),
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(":scroll "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(":help "),
        Span::styled("esc", Style::default().fg(Color::Yellow)),
        Span::raw(":quit"),
    ];

    let footer =
        Paragraph::new(Line::from(help_text)).block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 50, area);
    let text = "Keyboard shortcuts:\n\n  enter     - Search\n  tab       - Next field / results\n  backspace - Delete character\n  j/k       - Scroll results (results focused)\n  ?         - Toggle help (results focused)\n  q / esc   - Quit";

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
