use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::log_view::LogLevel;
use super::theme::Theme;
use super::util::centered_rect;

/// 阻塞式错误提示，按 Enter / Esc 关闭
pub fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let panel_area = centered_rect(area, 56, 8);
    frame.render_widget(Clear, panel_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Theme::error())),
        Line::from(""),
        Line::from(Span::styled(t!("alert.hint"), Theme::secondary())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::error())
        .title(Span::styled(format!(" {} ", t!("alert.title")), Theme::title()));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, panel_area);
}

/// 删除确认：y 确认，n / Esc 取消
pub fn render_confirm_delete(frame: &mut Frame, area: Rect, name: &str) {
    let panel_area = centered_rect(area, 48, 7);
    frame.render_widget(Clear, panel_area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{} ", t!("confirm.delete"))),
            Span::styled(name.to_string(), Theme::highlight()),
            Span::raw(" ?"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Theme::highlight()),
            Span::raw(format!(" {}  ", t!("confirm.yes"))),
            Span::styled("[n]", Theme::secondary()),
            Span::raw(format!(" {}", t!("confirm.no"))),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::level(LogLevel::Warn))
        .title(Span::styled(format!(" {} ", t!("confirm.title")), Theme::title()));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, panel_area);
}
