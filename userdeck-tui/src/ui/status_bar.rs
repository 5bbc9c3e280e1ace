use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;
use userdeck_core::LayoutMode;
use userdeck_core::view::FilterBadge;

use super::theme::Theme;
use super::util::truncate;

const SPINNER: &[&str] = &[
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}",
    "\u{2827}", "\u{2807}", "\u{280f}",
];

pub struct StatusInfo<'a> {
    pub shown: usize,
    pub selected: Option<usize>,
    pub layout: LayoutMode,
    pub width_px: u32,
    /// 正在拉取的资源名
    pub loading: Vec<&'a str>,
    /// 过滤状态下跨断点后的等待
    pub busy: bool,
    pub tick: u16,
}

pub fn layout_label(layout: LayoutMode) -> &'static str {
    match layout {
        LayoutMode::Table => t!("layout.table"),
        LayoutMode::Card => t!("layout.card"),
    }
}

/// 底部状态栏：左侧忙碌指示 + 条数，右侧布局与视口宽度
pub fn render(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let spinner = SPINNER[usize::from(info.tick) % SPINNER.len()];
    let left_icon = if info.busy || !info.loading.is_empty() {
        format!("  {spinner} ")
    } else {
        "  \u{25cf} ".to_string()
    };

    let mut left = match info.selected {
        Some(i) => format!("{}/{} {}", i + 1, info.shown, t!("status.users")),
        None => format!("{} {}", info.shown, t!("status.users")),
    };
    if !info.loading.is_empty() {
        left.push_str(&format!("  {} {}", t!("status.loading"), info.loading.join(", ")));
    } else if info.busy {
        left.push_str(&format!("  {}", t!("status.rendering")));
    }

    let right = format!(" {} \u{00b7} {}px ", layout_label(info.layout), info.width_px);

    let available = usize::from(area.width);
    let left_max = available.saturating_sub(left_icon.width() + right.width());
    let left = truncate(&left, left_max);
    let padding = available.saturating_sub(left_icon.width() + left.width() + right.width());

    let line = Line::from(vec![
        Span::styled(left_icon, Theme::active()),
        Span::raw(left),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Theme::secondary()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// 搜索条件徽章行；没有条件时显示搜索提示
pub fn render_filters(frame: &mut Frame, area: Rect, badges: &[FilterBadge]) {
    if badges.is_empty() {
        let hint = Line::from(vec![
            Span::styled("  [/]", Theme::secondary()),
            Span::styled(format!(" {}", t!("filter.hint")), Theme::secondary()),
        ]);
        frame.render_widget(Paragraph::new(hint), area);
        return;
    }

    let mut spans = vec![Span::raw("  ")];
    for badge in badges {
        spans.push(Span::styled(
            format!(" {}: {} ", badge.label, badge.value),
            Theme::filter_badge(),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(" [x]", Theme::highlight()));
    spans.push(Span::raw(format!(" {}", t!("filter.cancel"))));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
