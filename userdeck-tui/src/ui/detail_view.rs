use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use userdeck_core::view::UserDetail;

use super::badge;
use super::theme::Theme;
use super::util::centered_rect;

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<12}"), Theme::secondary()),
        Span::raw(value.to_string()),
    ])
}

/// 用户详情弹窗，内容完全来自 [`UserDetail`]
pub fn render(frame: &mut Frame, area: Rect, detail: &UserDetail) {
    let panel_area = centered_rect(area, 64, 14);
    frame.render_widget(Clear, panel_area);

    let mut skills = vec![Span::styled(format!("  {:<12}", t!("detail.skills")), Theme::secondary())];
    skills.extend(badge::spans(&detail.skills));
    let mut languages = vec![Span::styled(
        format!("  {:<12}", t!("detail.languages")),
        Theme::secondary(),
    )];
    languages.extend(badge::spans(&detail.languages));

    let lines = vec![
        Line::from(""),
        field(t!("detail.birthday"), &detail.birthday),
        field(t!("detail.phone"), &detail.phone),
        field(t!("detail.email"), &detail.email),
        field(t!("detail.address"), &detail.address),
        Line::from(""),
        Line::from(skills),
        Line::from(languages),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", t!("detail.hint")), Theme::secondary())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::selected_border())
        .title(Span::styled(format!(" {} ", detail.title), Theme::title()));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, panel_area);
}
