use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme::Theme;
use super::util::centered_rect;

/// 按键帮助面板定义：(分区 key, [(按键, 说明 key)])
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "help.section.global",
        &[
            ("q / Ctrl+C", "help.quit"),
            ("r", "help.refresh"),
            ("?", "help.help"),
            ("!", "help.logs"),
        ],
    ),
    (
        "help.section.users",
        &[
            ("j / k", "help.down_up"),
            ("g / G", "help.top_bottom"),
            ("Enter / v", "help.detail"),
            ("d", "help.delete"),
            ("m", "help.mail"),
        ],
    ),
    (
        "help.section.search",
        &[
            ("/", "help.search"),
            ("Tab", "help.next_field"),
            ("Space", "help.toggle_gender"),
            ("Enter", "help.apply"),
            ("Esc", "help.close_form"),
            ("x", "help.cancel_search"),
        ],
    ),
];

/// 渲染悬浮帮助面板（居中覆盖）
pub fn render(frame: &mut Frame, area: Rect) {
    let panel_area = centered_rect(area, 46, count_lines() as u16 + 2);
    frame.render_widget(Clear, panel_area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for (section, bindings) in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(format!("  {}", t!(*section)), Theme::title())));

        for (key, desc) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<14}"), Theme::active()),
                Span::raw(t!(*desc)),
            ]));
        }

        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!("       {}", t!("help.close")),
        Theme::secondary(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(format!(" {} ", t!("help.title")), Theme::title()));

    frame.render_widget(Paragraph::new(lines).block(block), panel_area);
}

fn count_lines() -> usize {
    let mut n = 1; // 顶部留白
    for (_, bindings) in HELP_SECTIONS {
        n += 2 + bindings.len();
    }
    n + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::i18n::tr;

    #[test]
    fn every_binding_is_translated() {
        for (section, bindings) in HELP_SECTIONS {
            assert_ne!(tr(section), "???");
            for (_, desc) in *bindings {
                assert_ne!(tr(desc), "???", "{desc}");
            }
        }
    }
}
