use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};
use userdeck_core::view::{TableRow, UserAction};

use super::theme::Theme;

pub fn action_label(action: UserAction) -> &'static str {
    match action {
        UserAction::View => t!("action.view"),
        UserAction::Edit => t!("action.edit"),
        UserAction::Delete => t!("action.delete"),
    }
}

/// 宽视口：一行一个用户
pub fn render(frame: &mut Frame, area: Rect, rows: &[TableRow], state: &mut TableState) {
    let header = Row::new([
        Cell::from(t!("table.name")),
        Cell::from(t!("table.email")),
        Cell::from(t!("table.city")),
        Cell::from(t!("table.registered")),
        Cell::from(t!("table.actions")),
    ])
    .style(Theme::title());

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            let email = if row.contact.is_some() {
                Span::styled(row.email.as_str(), Theme::active())
            } else {
                Span::raw(row.email.as_str())
            };
            let actions: Vec<&str> = row.actions.iter().map(|a| action_label(*a)).collect();
            Row::new([
                Cell::from(row.full_name.as_str()),
                Cell::from(Line::from(email)),
                Cell::from(row.city.as_str()),
                Cell::from(row.registered.as_str()),
                Cell::from(Span::styled(actions.join(" \u{00b7} "), Theme::secondary())),
            ])
        })
        .collect();

    let table = Table::new(
        body,
        [
            Constraint::Percentage(24),
            Constraint::Percentage(28),
            Constraint::Percentage(16),
            Constraint::Length(12),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::TOP).border_style(Theme::border()))
    .row_highlight_style(Theme::selected_row())
    .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, state);
}
