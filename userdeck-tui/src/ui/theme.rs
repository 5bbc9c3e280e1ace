use ratatui::style::{Color, Modifier, Style};

use super::log_view::LogLevel;

pub struct Theme;

/// 徽章底色；同一个技能 / 语言 id 在所有卡片上颜色一致
const BADGE_PALETTE: [Color; 8] = [
    Color::Indexed(24),
    Color::Indexed(30),
    Color::Indexed(64),
    Color::Indexed(95),
    Color::Indexed(130),
    Color::Indexed(61),
    Color::Indexed(131),
    Color::Indexed(66),
];

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;

impl Theme {
    pub fn highlight() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(MUTED)
    }

    pub fn active() -> Style {
        Style::default().fg(ACCENT)
    }

    pub fn title() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default()
    }

    pub fn selected_row() -> Style {
        Style::default().bg(MUTED)
    }

    pub fn border() -> Style {
        Style::default().fg(MUTED)
    }

    pub fn selected_border() -> Style {
        Style::default().fg(ACCENT)
    }

    pub fn level(level: LogLevel) -> Style {
        match level {
            LogLevel::Error => Style::default().fg(Color::Red),
            LogLevel::Warn => Style::default().fg(Color::Yellow),
            LogLevel::Info => Style::default(),
        }
    }

    pub fn error() -> Style {
        Self::level(LogLevel::Error)
    }

    pub fn badge(id: &str) -> Style {
        Style::default().bg(Self::badge_color(id)).fg(Color::White)
    }

    /// FNV-1a 取模，不依赖进程内随机种子
    pub fn badge_color(id: &str) -> Color {
        let hash = id
            .bytes()
            .fold(0x811c_9dc5_u32, |h, b| (h ^ u32::from(b)).wrapping_mul(0x0100_0193));
        BADGE_PALETTE[hash as usize % BADGE_PALETTE.len()]
    }

    /// 搜索条件徽章
    pub fn filter_badge() -> Style {
        Style::default().bg(MUTED).fg(Color::White)
    }

    pub fn header_block() -> Style {
        Style::default().fg(Color::Black).bg(MUTED)
    }

    pub fn header_accent() -> Style {
        Style::default().fg(Color::Black).bg(ACCENT)
    }

    pub fn unread() -> Style {
        Style::default().fg(Color::White).bg(Color::Red)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_color_is_stable_per_id() {
        assert_eq!(Theme::badge_color("skill-rust"), Theme::badge_color("skill-rust"));
        let distinct: std::collections::HashSet<_> = ["s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9"]
            .iter()
            .map(|id| Theme::badge_color(id))
            .collect();
        assert!(distinct.len() > 1);
    }
}
