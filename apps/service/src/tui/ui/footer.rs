use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::COLOR_BRAND;

pub fn render(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        "Q/Esc: Quit",
        Style::default().fg(COLOR_BRAND).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
