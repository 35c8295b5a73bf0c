use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::interfaces::tui::app::{App, CurrentScreen, Focus};
use crate::interfaces::tui::constants::PopupSize;

/// Draw title bar with version and statistics
pub fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_text = vec![Line::from(vec![
        Span::styled("shortkeep", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(" v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Links: {} ", app.links.len()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Pending expirations: {}", app.service.scheduled_count()),
            Style::default().fg(Color::Magenta),
        ),
    ])];

    let title = Paragraph::new(title_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(title, area);
}

/// Draw status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (status_text, status_style) = if !app.error_message.is_empty() {
        (
            format!("[ERROR] {}", app.error_message),
            Style::default().fg(Color::White).bg(Color::Red).bold(),
        )
    } else if !app.status_message.is_empty() {
        (
            format!("[SUCCESS] {}", app.status_message),
            Style::default().fg(Color::Black).bg(Color::Green).bold(),
        )
    } else {
        (
            format!("Ready | storage: {}", app.service.backend_name()),
            Style::default().fg(Color::Cyan),
        )
    };

    let status = Paragraph::new(status_text)
        .style(status_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(status, area);
}

/// Draw footer with keyboard shortcuts
pub fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match (app.current_screen, app.focus) {
        (CurrentScreen::Main, Focus::Url) => vec![
            ("Enter", "Shorten", Color::Green),
            ("Tab", "Next", Color::Cyan),
            ("Esc", "List", Color::Yellow),
            ("Ctrl-C", "Quit", Color::Magenta),
        ],
        (CurrentScreen::Main, Focus::Expiration) => vec![
            ("Left/Right", "Choose", Color::Cyan),
            ("Enter", "Shorten", Color::Green),
            ("Tab", "Next", Color::Cyan),
            ("Esc", "List", Color::Yellow),
        ],
        (CurrentScreen::Main, Focus::List) => vec![
            ("Up/Down", "Navigate", Color::Cyan),
            ("a", "New", Color::Green),
            ("y", "Copy", Color::Yellow),
            ("d", "Delete", Color::Red),
            ("Tab", "Form", Color::Cyan),
            ("?", "Help", Color::Blue),
            ("q", "Quit", Color::Magenta),
        ],
        (CurrentScreen::DeleteConfirm | CurrentScreen::Exiting, _) => {
            vec![("y", "Yes", Color::Green), ("n", "No", Color::Red)]
        }
        (CurrentScreen::Help, _) => vec![("q/Esc", "Close", Color::Red)],
    };

    let mut spans = Vec::new();
    for (i, (key, desc, color)) in shortcuts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(*color).bold(),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(footer, area);
}

/// 绘制带阴影和双线边框的弹窗，返回内部区域
pub fn draw_popup(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    size: PopupSize,
    color: Color,
    margin: Margin,
) -> Rect {
    let popup_area = centered_rect(size.width, size.height, area);

    let shadow = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(shadow, popup_area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(title.to_string())
        .title_style(Style::default().fg(color).bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color));
    frame.render_widget(block, popup_area);

    popup_area.inner(margin)
}

/// 创建居中矩形
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
