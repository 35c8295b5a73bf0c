use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table},
};

use crate::interfaces::tui::app::{App, Focus};
use crate::interfaces::tui::constants::URL_TRUNCATE_LENGTH;
use crate::utils::describe_expiry;

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

pub fn draw_link_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_color = if app.focus == Focus::List {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    if app.links.is_empty() {
        let empty_text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "No short links yet",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Enter a URL, pick an expiration and press Enter",
                Style::default().fg(Color::DarkGray),
            )]),
        ];

        let empty = Paragraph::new(empty_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color))
                    .title("Short Links")
                    .title_style(Style::default().fg(Color::Cyan)),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Span::styled("Short Link", Style::default().fg(Color::Yellow).bold()),
        Span::styled("Long URL", Style::default().fg(Color::Yellow).bold()),
        Span::styled("Expires", Style::default().fg(Color::Yellow).bold()),
        Span::styled("Remaining", Style::default().fg(Color::Yellow).bold()),
    ])
    .bottom_margin(1);

    let now = Utc::now();
    let rows: Vec<Row> = app
        .links
        .iter()
        .map(|record| {
            let long_url = record
                .long_url
                .as_deref()
                .map(|u| truncate(u, URL_TRUNCATE_LENGTH))
                .unwrap_or_else(|| "-".to_string());
            let duration = record
                .expiration_time
                .map(|m| {
                    crate::storage::ExpirationChoice::from_minutes(m)
                        .map(|c| c.label().to_string())
                        .unwrap_or_else(|| format!("{} min", m))
                })
                .unwrap_or_else(|| "never".to_string());

            Row::new(vec![
                Span::styled(
                    record.link.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(long_url, Style::default().fg(Color::Blue)),
                Span::styled(duration, Style::default().fg(Color::Gray)),
                Span::styled(
                    describe_expiry(record, now),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(24), // Short link
            Constraint::Min(20),    // Long URL
            Constraint::Length(11), // Expires
            Constraint::Length(10), // Remaining
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(format!("Short Links ({})", app.links.len()))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
    .highlight_symbol("▶ ")
    .column_spacing(1);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}
