use std::ops::Range;

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use userdeck_core::view::UserCard;

use super::badge;
use super::table_view::action_label;
use super::theme::Theme;
use super::util::truncate;

const CARD_WIDTH: u16 = 32;
const CARD_HEIGHT: u16 = 7;

/// 每行能放下几张卡片，至少一张
pub fn columns(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// 让选中卡片所在行保持可见时，应绘制的卡片下标范围
fn visible_window(count: usize, cols: usize, visible_rows: usize, selected: usize) -> Range<usize> {
    let visible_rows = visible_rows.max(1);
    let first_row = (selected / cols).saturating_sub(visible_rows - 1);
    let start = (first_row * cols).min(count);
    let end = (start + visible_rows * cols).min(count);
    start..end
}

/// 窄视口：卡片网格
pub fn render(frame: &mut Frame, area: Rect, cards: &[UserCard], selected: usize) {
    let cols = columns(area.width);
    let card_w = area.width / cols as u16;
    let visible_rows = usize::from(area.height / CARD_HEIGHT);
    let window = visible_window(cards.len(), cols, visible_rows, selected);
    let first = window.start;

    for (slot, card) in cards[window].iter().enumerate() {
        let x = area.x + (slot % cols) as u16 * card_w;
        let y = area.y + (slot / cols) as u16 * CARD_HEIGHT;
        let rect = Rect::new(x, y, card_w, CARD_HEIGHT).intersection(area);
        render_card(frame, rect, card, first + slot == selected);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &UserCard, selected: bool) {
    let inner_w = usize::from(area.width.saturating_sub(2));
    let border = if selected { Theme::selected_border() } else { Theme::border() };
    let title_style = if selected { Theme::highlight() } else { Theme::title() };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(
            format!(" {} ", truncate(&card.name, inner_w.saturating_sub(2))),
            title_style,
        ));

    let username = if card.username.is_empty() {
        String::new()
    } else {
        format!("@{}", card.username)
    };
    let actions: Vec<&str> = card.actions.iter().map(|a| action_label(*a)).collect();

    let lines = vec![
        Line::from(Span::styled(truncate(&username, inner_w), Theme::secondary())),
        Line::from(badge::spans(&card.skills)),
        Line::from(badge::spans(&card.languages)),
        Line::from(Span::styled(actions.join(" \u{00b7} "), Theme::secondary())),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_one_column() {
        assert_eq!(columns(10), 1);
        assert_eq!(columns(64), 2);
        assert_eq!(columns(100), 3);
    }

    #[test]
    fn window_scrolls_to_selected_row() {
        assert_eq!(visible_window(10, 3, 2, 0), 0..6);
        assert_eq!(visible_window(10, 3, 2, 7), 3..9);
        assert_eq!(visible_window(10, 3, 2, 9), 6..10);
        assert_eq!(visible_window(0, 3, 0, 0), 0..0);
    }
}
