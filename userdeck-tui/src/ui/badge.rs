use ratatui::text::Span;
use userdeck_core::view::{BadgeForm, RefBadge};

use super::theme::Theme;

/// 技能 / 语言徽章：窄视口用文字，宽视口用色块代替图标
pub fn spans(badges: &[RefBadge]) -> Vec<Span<'static>> {
    let mut out = Vec::with_capacity(badges.len() * 2);
    for (i, badge) in badges.iter().enumerate() {
        if i > 0 {
            out.push(Span::raw(" "));
        }
        match &badge.form {
            BadgeForm::Text => {
                out.push(Span::styled(format!("[{}]", badge.label), Theme::secondary()));
            }
            BadgeForm::Icon { .. } => {
                out.push(Span::styled(format!(" {} ", badge.label), Theme::badge(&badge.id)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(label: &str, form: BadgeForm) -> RefBadge {
        RefBadge {
            id: label.to_string(),
            label: label.to_string(),
            form,
        }
    }

    #[test]
    fn text_badges_are_bracketed() {
        let out = spans(&[badge("rust", BadgeForm::Text), badge("sql", BadgeForm::Text)]);
        let text: String = out.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[rust] [sql]");
    }

    #[test]
    fn icon_badges_are_colored_blocks() {
        let icon = BadgeForm::Icon { src: "assets/images/skills/rust.png".into() };
        let out = spans(&[badge("rust", icon)]);
        assert_eq!(out[0].content, " rust ");
        assert_eq!(out[0].style.bg, Some(Theme::badge_color("rust")));
    }
}
