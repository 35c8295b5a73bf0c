// UI submodules
mod common;
mod delete_confirm;
mod exiting;
mod help;
mod link_list;
mod shorten_form;

pub use common::{draw_footer, draw_status_bar, draw_title_bar};
pub use delete_confirm::draw_delete_confirm_screen;
pub use exiting::draw_exiting_screen;
pub use help::draw_help_screen;
pub use link_list::draw_link_list;
pub use shorten_form::draw_shorten_form;

use super::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Main UI rendering entry point
pub fn ui(frame: &mut Frame, app: &mut App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(9), // Shorten form
            Constraint::Min(6),    // Link list
            Constraint::Length(3), // Status
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    draw_title_bar(frame, app, main_chunks[0]);
    draw_shorten_form(frame, app, main_chunks[1]);
    draw_link_list(frame, app, main_chunks[2]);

    // 弹窗覆盖在表单和列表之上
    let content_area = main_chunks[1].union(main_chunks[2]);
    match app.current_screen {
        CurrentScreen::Main => {}
        CurrentScreen::DeleteConfirm => draw_delete_confirm_screen(frame, app, content_area),
        CurrentScreen::Help => draw_help_screen(frame, content_area),
        CurrentScreen::Exiting => draw_exiting_screen(frame, content_area),
    }

    draw_status_bar(frame, app, main_chunks[3]);
    draw_footer(frame, app, main_chunks[4]);
}
