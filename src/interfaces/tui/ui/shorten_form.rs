use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use strum::IntoEnumIterator;

use crate::interfaces::tui::app::{App, Focus};
use crate::services::SubmissionState;
use crate::storage::ExpirationChoice;

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    }
}

/// 光标停在已输入文本之后，超长时贴住输入框右边界
fn url_cursor_x(field: Rect, typed_chars: usize) -> u16 {
    let typed = u16::try_from(typed_chars).unwrap_or(u16::MAX);
    let cursor_x = field.x.saturating_add(1).saturating_add(typed);
    let max_x = field.x.saturating_add(field.width.saturating_sub(2));
    cursor_x.min(max_x)
}

pub fn draw_shorten_form(frame: &mut Frame, app: &App, area: Rect) {
    let form_focused = app.focus.is_form();
    let block = Block::default()
        .title("Shorten URL")
        .title_style(Style::default().fg(Color::Green).bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if form_focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    frame.render_widget(block, area);

    let inner_area = area.inner(Margin::new(1, 1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL
            Constraint::Length(3), // Expiration
            Constraint::Length(1), // Error / loading
        ])
        .split(inner_area);

    // URL input
    let url_title = if app.form.url.is_empty() {
        "Long URL *".to_string()
    } else {
        format!("Long URL ({} chars)", app.form.url.chars().count())
    };
    let url = Paragraph::new(app.form.url.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(url_title)
            .border_style(field_style(app.focus == Focus::Url)),
    );
    frame.render_widget(url, chunks[0]);

    if app.focus == Focus::Url {
        let cursor_x = url_cursor_x(chunks[0], app.form.url.chars().count());
        frame.set_cursor_position((cursor_x, chunks[0].y.saturating_add(1)));
    }

    // Expiration selector
    let mut spans = Vec::new();
    for choice in ExpirationChoice::iter() {
        let selected = app.form.expiration == Some(choice);
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", choice.label()), style));
        spans.push(Span::raw(" "));
    }
    let expire_title = if app.form.expiration.is_none() {
        "Expiration * (not selected)"
    } else {
        "Expiration"
    };
    let selector = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(expire_title)
            .border_style(field_style(app.focus == Focus::Expiration)),
    );
    frame.render_widget(selector, chunks[1]);

    // 校验错误或加载指示
    let feedback = match &app.form.state {
        SubmissionState::Rejected(msg) => Some(Span::styled(
            msg.as_str(),
            Style::default().fg(Color::Red).bold(),
        )),
        SubmissionState::Requesting => Some(Span::styled(
            "Shortening...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )),
        _ => None,
    };
    if let Some(span) = feedback {
        frame.render_widget(Paragraph::new(Line::from(span)), chunks[2]);
    }
}
