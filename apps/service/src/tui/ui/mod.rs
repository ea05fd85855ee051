pub mod footer;
pub mod header;
pub mod targets;

use netwatch::{Category, LinkStatus};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Color;

use crate::tui::state::BoardState;

pub const COLOR_BRAND: Color = Color::Cyan;
pub const COLOR_LABEL: Color = Color::Gray;
pub const COLOR_MUTED: Color = Color::DarkGray;
pub const COLOR_SUCCESS: Color = Color::Green;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_WARNING: Color = Color::Yellow;

pub fn status_color(status: LinkStatus) -> Color {
    match status {
        LinkStatus::Online => COLOR_SUCCESS,
        LinkStatus::Offline => COLOR_ERROR,
        LinkStatus::Unknown => COLOR_WARNING,
    }
}

/// Render the entire UI
pub fn render(f: &mut Frame, state: &BoardState) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    header::render(f, chunks[0], state);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    targets::render(f, panes[0], state, Category::Server);
    targets::render(f, panes[1], state, Category::Website);

    footer::render(f, chunks[2]);
}
