use netwatch::Category;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table};

use super::{COLOR_BRAND, COLOR_LABEL, status_color};
use crate::tui::state::BoardState;

/// One table per category: name, identifier, status
pub fn render(f: &mut Frame, area: Rect, state: &BoardState, category: Category) {
    let identifier_header = match category {
        Category::Server => "IP",
        Category::Website => "URL",
    };

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from(identifier_header),
        Cell::from("Status"),
    ])
    .style(Style::default().fg(COLOR_LABEL).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .rows(category)
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(row.identifier.clone()),
                Cell::from(row.status.to_string())
                    .style(Style::default().fg(status_color(row.status))),
            ])
        })
        .collect();

    let widths = [Constraint::Percentage(40), Constraint::Percentage(45), Constraint::Percentage(15)];
    let title = format!(" {} ", category.plural());

    let table = Table::new(rows, widths).header(header).block(
        Block::default().borders(Borders::ALL).title(title).border_style(Style::default().fg(COLOR_BRAND)),
    );

    f.render_widget(Clear, area);
    f.render_widget(table, area);
}
