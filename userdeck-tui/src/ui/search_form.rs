use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use userdeck_core::FilterInput;
use userdeck_core::filter::{FIRSTNAME, GENDER, LASTNAME};

use super::theme::Theme;
use super::util::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Gender,
    Firstname,
    Lastname,
}

impl SearchField {
    pub fn next(self) -> Self {
        match self {
            SearchField::Gender => SearchField::Firstname,
            SearchField::Firstname => SearchField::Lastname,
            SearchField::Lastname => SearchField::Gender,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SearchField::Gender => SearchField::Lastname,
            SearchField::Firstname => SearchField::Gender,
            SearchField::Lastname => SearchField::Firstname,
        }
    }
}

/// 性别单选组；Any 表示一个都不勾选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenderChoice {
    #[default]
    Any,
    Male,
    Female,
}

impl GenderChoice {
    pub fn next(self) -> Self {
        match self {
            GenderChoice::Any => GenderChoice::Male,
            GenderChoice::Male => GenderChoice::Female,
            GenderChoice::Female => GenderChoice::Any,
        }
    }
}

const GENDER_OPTIONS: [(GenderChoice, &str, &str); 3] = [
    (GenderChoice::Any, "", "search.any"),
    (GenderChoice::Male, "male", "search.male"),
    (GenderChoice::Female, "female", "search.female"),
];

/// 高级搜索表单状态
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub gender: GenderChoice,
    pub firstname: String,
    pub lastname: String,
    pub focused: SearchField,
    firstname_cursor: usize,
    lastname_cursor: usize,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchForm {
    pub fn new() -> Self {
        Self {
            gender: GenderChoice::Any,
            firstname: String::new(),
            lastname: String::new(),
            focused: SearchField::Gender,
            firstname_cursor: 0,
            lastname_cursor: 0,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    pub fn toggle_gender(&mut self) {
        self.gender = self.gender.next();
    }

    fn current_input(&mut self) -> Option<(&mut String, &mut usize)> {
        match self.focused {
            SearchField::Gender => None,
            SearchField::Firstname => Some((&mut self.firstname, &mut self.firstname_cursor)),
            SearchField::Lastname => Some((&mut self.lastname, &mut self.lastname_cursor)),
        }
    }

    /// 单选组上空格切换选项，文本框内正常输入
    pub fn insert_char(&mut self, c: char) {
        match self.current_input() {
            Some((text, cursor)) => {
                let at = byte_index(text, *cursor);
                text.insert(at, c);
                *cursor += 1;
            }
            None if c == ' ' => self.toggle_gender(),
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some((text, cursor)) = self.current_input() {
            if *cursor > 0 {
                *cursor -= 1;
                let at = byte_index(text, *cursor);
                text.remove(at);
            }
        }
    }

    pub fn cursor_left(&mut self) {
        match self.current_input() {
            Some((_, cursor)) => *cursor = cursor.saturating_sub(1),
            None => {
                self.gender = self.gender.next().next();
            }
        }
    }

    pub fn cursor_right(&mut self) {
        match self.current_input() {
            Some((text, cursor)) => {
                if *cursor < text.chars().count() {
                    *cursor += 1;
                }
            }
            None => self.toggle_gender(),
        }
    }

    /// 转成过滤引擎的原始输入：两个性别单选 + 两个文本框
    pub fn to_inputs(&self) -> Vec<FilterInput> {
        let mut inputs: Vec<FilterInput> = GENDER_OPTIONS
            .iter()
            .filter(|(_, value, _)| !value.is_empty())
            .map(|(choice, value, _)| FilterInput::radio(GENDER, *value, self.gender == *choice))
            .collect();
        inputs.push(FilterInput::text(FIRSTNAME, self.firstname.as_str()));
        inputs.push(FilterInput::text(LASTNAME, self.lastname.as_str()));
        inputs
    }
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

pub fn render(frame: &mut Frame, area: Rect, form: &SearchForm) {
    let panel_area = centered_rect(area, 48, 12);
    frame.render_widget(Clear, panel_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(format!(" {} ", t!("search.title")), Theme::title()));
    let inner = block.inner(panel_area);
    frame.render_widget(block, panel_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 空行
            Constraint::Length(1), // 性别
            Constraint::Length(1), // 空行
            Constraint::Length(1), // 名
            Constraint::Length(1), // 空行
            Constraint::Length(1), // 姓
            Constraint::Length(1), // 空行
            Constraint::Length(1), // 提示
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(gender_line(form)), rows[1]);
    frame.render_widget(
        Paragraph::new(input_line(
            t!("search.firstname"),
            &form.firstname,
            form.firstname_cursor,
            form.focused == SearchField::Firstname,
        )),
        rows[3],
    );
    frame.render_widget(
        Paragraph::new(input_line(
            t!("search.lastname"),
            &form.lastname,
            form.lastname_cursor,
            form.focused == SearchField::Lastname,
        )),
        rows[5],
    );

    let hint = Line::from(vec![
        Span::styled(" [Enter]", Theme::highlight()),
        Span::raw(format!(" {}  ", t!("search.apply"))),
        Span::styled("[Tab]", Theme::secondary()),
        Span::raw(format!(" {}  ", t!("search.next"))),
        Span::styled("[Esc]", Theme::secondary()),
        Span::raw(format!(" {}", t!("search.close"))),
    ]);
    frame.render_widget(Paragraph::new(hint), rows[7]);
}

fn label_span(label: &str, focused: bool) -> Span<'static> {
    let style = if focused { Theme::highlight() } else { Theme::secondary() };
    Span::styled(format!(" {label:<10}"), style)
}

fn gender_line(form: &SearchForm) -> Line<'static> {
    let focused = form.focused == SearchField::Gender;
    let mut spans = vec![label_span(t!("search.gender"), focused)];
    for (choice, _, key) in GENDER_OPTIONS {
        let mark = if form.gender == choice { "(\u{2022})" } else { "( )" };
        let style = if form.gender == choice && focused {
            Theme::active()
        } else if form.gender == choice {
            Theme::input()
        } else {
            Theme::secondary()
        };
        spans.push(Span::styled(format!("{mark} {}  ", t!(key)), style));
    }
    Line::from(spans)
}

/// 构建输入行：label > content（光标用反色块表示）
fn input_line(label: &str, text: &str, cursor: usize, focused: bool) -> Line<'static> {
    let mut spans = vec![label_span(label, focused)];
    if focused {
        let before: String = text.chars().take(cursor).collect();
        let cursor_char: String = text
            .chars()
            .nth(cursor)
            .map_or(" ".to_string(), |c| c.to_string());
        let after: String = text.chars().skip(cursor + 1).collect();
        spans.push(Span::styled("> ", Theme::active()));
        spans.push(Span::raw(before));
        spans.push(Span::styled(
            cursor_char,
            Style::default().add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::raw(after));
    } else {
        spans.push(Span::styled("  ", Theme::secondary()));
        spans.push(Span::styled(text.to_string(), Theme::secondary()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use userdeck_core::FilterCriteria;

    fn type_str(form: &mut SearchForm, s: &str) {
        for c in s.chars() {
            form.insert_char(c);
        }
    }

    #[test]
    fn untouched_form_yields_empty_criteria() {
        let form = SearchForm::new();
        assert!(FilterCriteria::from_inputs(&form.to_inputs()).is_empty());
    }

    #[test]
    fn space_on_gender_cycles_radio_group() {
        let mut form = SearchForm::new();
        form.insert_char(' ');
        assert_eq!(form.gender, GenderChoice::Male);
        form.insert_char(' ');
        assert_eq!(form.gender, GenderChoice::Female);
        form.cursor_left();
        assert_eq!(form.gender, GenderChoice::Male);
    }

    #[test]
    fn filled_form_builds_ordered_criteria() {
        let mut form = SearchForm::new();
        form.toggle_gender();
        form.toggle_gender();
        form.focus_next();
        type_str(&mut form, "Anx");
        form.backspace();
        form.focus_next();
        type_str(&mut form, " lee ");

        let criteria = FilterCriteria::from_inputs(&form.to_inputs());
        let pairs: Vec<(&str, &str)> = criteria.iter().collect();
        assert_eq!(pairs, [(GENDER, "female"), (FIRSTNAME, "An"), (LASTNAME, "lee")]);
    }

    #[test]
    fn editing_in_the_middle_handles_multibyte() {
        let mut form = SearchForm::new();
        form.focus_next();
        type_str(&mut form, "张三");
        form.cursor_left();
        form.insert_char('x');
        assert_eq!(form.firstname, "张x三");
        form.cursor_right();
        form.backspace();
        assert_eq!(form.firstname, "张x");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = SearchForm::new();
        form.focus_prev();
        assert_eq!(form.focused, SearchField::Lastname);
        form.focus_next();
        assert_eq!(form.focused, SearchField::Gender);
    }
}
