use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use super::{COLOR_BRAND, COLOR_ERROR, COLOR_LABEL, COLOR_MUTED, COLOR_SUCCESS, status_color};
use crate::tui::state::BoardState;

pub fn render(f: &mut Frame, area: Rect, state: &BoardState) {
    let (online, offline, unknown) = state.counts();
    let uptime = state.started.elapsed().as_secs();

    let title = Line::from(vec![
        Span::styled("netwatch ", Style::default().fg(COLOR_BRAND).add_modifier(Modifier::BOLD)),
        Span::styled(format!("[up {uptime}s]"), Style::default().fg(COLOR_MUTED)),
    ]);

    let counts = Line::from(vec![
        Span::styled(format!("{online} online "), Style::default().fg(COLOR_SUCCESS)),
        Span::styled(format!("{offline} offline "), Style::default().fg(COLOR_ERROR)),
        Span::styled(format!("{unknown} pending"), Style::default().fg(COLOR_LABEL)),
    ]);

    // Last change, if any
    let last = match &state.last_change {
        Some((transition, at)) => {
            let name = state.name_of(transition).unwrap_or("?");
            Line::from(vec![
                Span::styled(
                    format!("{} {name} is ", transition.category),
                    Style::default().fg(COLOR_LABEL),
                ),
                Span::styled(
                    transition.status.to_string(),
                    Style::default().fg(status_color(transition.status)).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" ({}s ago)", at.elapsed().as_secs()),
                    Style::default().fg(COLOR_MUTED),
                ),
            ])
        }
        None => Line::from(Span::styled("Waiting for first results", Style::default().fg(COLOR_MUTED))),
    };

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(vec![title, counts, last]), area);
}
