use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::common::draw_popup;
use crate::interfaces::tui::constants::popup;

fn section(title: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )])
}

fn shortcut<'a>(keys: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", keys), Style::default().fg(Color::Cyan)),
        Span::styled(desc, Style::default().fg(Color::White)),
    ])
}

pub fn draw_help_screen(frame: &mut Frame, area: Rect) {
    let inner_area = draw_popup(
        frame,
        area,
        "Help - Keyboard Shortcuts",
        popup::HELP,
        Color::Cyan,
        Margin::new(2, 1),
    );

    let help_text = vec![
        Line::from(""),
        section("FORM"),
        shortcut("Tab / Shift-Tab", "Move between URL, expiration and list"),
        shortcut("Left/Right", "Choose expiration (1m, 5m, 30m, 1h, 5h)"),
        shortcut("Enter", "Shorten the URL"),
        shortcut("Esc", "Leave the form"),
        Line::from(""),
        section("LIST"),
        shortcut("Up/Down, j/k", "Navigate"),
        shortcut("Home/End, g/G", "Jump to top / bottom"),
        shortcut("PageUp/PageDown", "Scroll 10 items"),
        shortcut("y", "Copy short link"),
        shortcut("d", "Delete (asks first)"),
        shortcut("a", "Back to the URL field"),
        Line::from(""),
        section("GENERAL"),
        shortcut("?", "Toggle this help"),
        shortcut("q / Ctrl-C", "Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Links disappear on their own when their expiration passes.",
            Style::default().fg(Color::DarkGray),
        )]),
    ];

    frame.render_widget(Paragraph::new(help_text), inner_area);
}
