//! 渲染器：用户集合 → 结构化视图模型（表格行 / 卡片 / 详情），不拼接任何标记文本。

use std::collections::{HashMap, HashSet};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate};

use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::model::{Language, Skill, User};
use crate::store::Repository;

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Table,
    Card,
}

/// 视口宽度断点：`layout` 以下用卡片，`badge` 及以下标签用文字徽章
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    pub layout: u32,
    pub badge: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            layout: 868,
            badge: 867,
        }
    }
}

impl Breakpoints {
    pub fn layout_for(&self, width: u32) -> LayoutMode {
        if width < self.layout {
            LayoutMode::Card
        } else {
            LayoutMode::Table
        }
    }

    pub fn text_badges(&self, width: u32) -> bool {
        width <= self.badge
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Skill,
    Language,
}

impl RefKind {
    fn asset_dir(self) -> &'static str {
        match self {
            Self::Skill => "skills",
            Self::Language => "languages",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeForm {
    Text,
    Icon { src: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefBadge {
    pub id: String,
    pub label: String,
    pub form: BadgeForm,
}

/// 技能 / 语言 id → 标签，渲染时做反规范化连接
#[derive(Debug, Clone, Default)]
pub struct ReferenceBook {
    skills: HashMap<String, String>,
    languages: HashMap<String, String>,
}

impl ReferenceBook {
    pub fn new(skills: &[Skill], languages: &[Language]) -> Self {
        Self {
            skills: skills.iter().map(|s| (s.id.clone(), s.label.clone())).collect(),
            languages: languages.iter().map(|l| (l.id.clone(), l.label.clone())).collect(),
        }
    }

    /// 未缓存的资源按空表处理
    pub fn from_repo(repo: &Repository) -> Result<Self> {
        Ok(Self::new(
            &repo.get_or_empty::<Skill>()?,
            &repo.get_or_empty::<Language>()?,
        ))
    }

    pub fn label(&self, kind: RefKind, id: &str) -> Option<&str> {
        let table = match kind {
            RefKind::Skill => &self.skills,
            RefKind::Language => &self.languages,
        };
        table.get(id).map(String::as_str)
    }

    /// 按用户记录中的顺序解析，去重，找不到的 id 直接略过
    pub fn resolve(&self, kind: RefKind, ids: &[String], text: bool) -> Vec<RefBadge> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| {
                let label = self.label(kind, id)?;
                let form = if text {
                    BadgeForm::Text
                } else {
                    BadgeForm::Icon {
                        src: format!("assets/images/{}/{label}.png", kind.asset_dir()),
                    }
                };
                Some(RefBadge {
                    id: id.clone(),
                    label: label.to_string(),
                    form,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    View,
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub avatar: Option<String>,
    pub full_name: String,
    pub email: String,
    /// `mailto:` 链接，无邮箱时为 None
    pub contact: Option<String>,
    pub city: String,
    pub registered: String,
    pub actions: [UserAction; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    pub id: String,
    pub avatar: Option<String>,
    pub name: String,
    pub username: String,
    pub skills: Vec<RefBadge>,
    pub languages: Vec<RefBadge>,
    pub actions: [UserAction; 2],
}

/// 详情弹窗的只读投影
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetail {
    pub id: String,
    pub title: String,
    pub avatar: Option<String>,
    pub birthday: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub skills: Vec<RefBadge>,
    pub languages: Vec<RefBadge>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBadge {
    pub label: String,
    pub value: String,
}

/// 容器当前挂载的内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Empty,
    Table(Vec<TableRow>),
    Cards(Vec<UserCard>),
}

impl View {
    pub fn mode(&self) -> Option<LayoutMode> {
        match self {
            Self::Empty => None,
            Self::Table(_) => Some(LayoutMode::Table),
            Self::Cards(_) => Some(LayoutMode::Card),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Table(rows) => rows.len(),
            Self::Cards(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::Empty => Vec::new(),
            Self::Table(rows) => rows.iter().map(|r| r.id.as_str()).collect(),
            Self::Cards(cards) => cards.iter().map(|c| c.id.as_str()).collect(),
        }
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Table(rows) => rows.get(index).map(|r| r.id.as_str()),
            Self::Cards(cards) => cards.get(index).map(|c| c.id.as_str()),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids().contains(&id)
    }

    /// 按 id 移除一行或一张卡片
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.len();
        match self {
            Self::Empty => {}
            Self::Table(rows) => rows.retain(|r| r.id != id),
            Self::Cards(cards) => cards.retain(|c| c.id != id),
        }
        self.len() != before
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    breakpoints: Breakpoints,
    date_format: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Breakpoints::default(), DEFAULT_DATE_FORMAT)
    }
}

impl Renderer {
    /// 非法的 strftime 格式回退到 `DEFAULT_DATE_FORMAT`
    pub fn new(breakpoints: Breakpoints, date_format: &str) -> Self {
        let date_format = if is_valid_date_format(date_format) {
            date_format
        } else {
            tracing::warn!(date_format, "invalid date format, using default");
            DEFAULT_DATE_FORMAT
        };
        Self {
            breakpoints,
            date_format: date_format.to_string(),
        }
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    pub fn render(
        &self,
        users: &[User],
        mode: LayoutMode,
        book: &ReferenceBook,
        width: u32,
    ) -> View {
        match mode {
            LayoutMode::Table => View::Table(users.iter().map(|u| self.table_row(u)).collect()),
            LayoutMode::Card => {
                View::Cards(users.iter().map(|u| self.card(u, book, width)).collect())
            }
        }
    }

    pub fn table_row(&self, user: &User) -> TableRow {
        let email = user.email.clone().unwrap_or_default();
        TableRow {
            id: user.id.clone(),
            avatar: user.avatar.clone(),
            full_name: user.display_name(),
            contact: (!email.is_empty()).then(|| format!("mailto:{email}")),
            email,
            city: user.city().to_string(),
            registered: self.format_date(user.registered_date.as_deref()),
            actions: [UserAction::View, UserAction::Edit, UserAction::Delete],
        }
    }

    pub fn card(&self, user: &User, book: &ReferenceBook, width: u32) -> UserCard {
        let text = self.breakpoints.text_badges(width);
        UserCard {
            id: user.id.clone(),
            avatar: user.avatar.clone(),
            name: user.display_name(),
            username: user.username.clone().unwrap_or_default(),
            skills: book.resolve(RefKind::Skill, &user.skills, text),
            languages: book.resolve(RefKind::Language, &user.languages, text),
            actions: [UserAction::Edit, UserAction::Delete],
        }
    }

    pub fn detail(&self, user: &User, book: &ReferenceBook, width: u32) -> UserDetail {
        let text = self.breakpoints.text_badges(width);
        let address = user
            .address
            .as_ref()
            .map(|a| format!("{} ~ {} / {}", a.street, a.city, a.country))
            .unwrap_or_default();
        let title = match user.username.as_deref() {
            Some(username) if !username.is_empty() => {
                format!("{} ~ {username}", user.display_name())
            }
            _ => user.display_name(),
        };
        UserDetail {
            id: user.id.clone(),
            title,
            avatar: user.avatar.clone(),
            birthday: self.format_date(user.birth_date.as_deref()),
            phone: user.phone.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            address,
            skills: book.resolve(RefKind::Skill, &user.skills, text),
            languages: book.resolve(RefKind::Language, &user.languages, text),
        }
    }

    /// 条件徽章：字段名首字母大写
    pub fn filter_badges(&self, criteria: &FilterCriteria) -> Vec<FilterBadge> {
        criteria
            .iter()
            .map(|(field, value)| FilterBadge {
                label: capitalize(field),
                value: value.to_string(),
            })
            .collect()
    }

    /// RFC 3339 时间戳或 `YYYY-MM-DD`；解析失败原样返回
    pub fn format_date(&self, raw: Option<&str>) -> String {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return String::new();
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.format(&self.date_format).to_string();
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.format(&self.date_format).to_string();
        }
        raw.to_string()
    }
}

fn is_valid_date_format(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, UserName};

    fn book() -> ReferenceBook {
        ReferenceBook::new(
            &[
                Skill { id: "s1".into(), label: "rust".into() },
                Skill { id: "s2".into(), label: "sql".into() },
            ],
            &[Language { id: "l1".into(), label: "english".into() }],
        )
    }

    fn ann() -> User {
        let mut u = User::new("u1");
        u.name = Some(UserName::Parts { first: "Ann".into(), last: "Lee".into() });
        u.username = Some("annlee".into());
        u.email = Some("ann@example.org".into());
        u.registered_date = Some("2019-03-02T10:00:00Z".into());
        u.birth_date = Some("1990-12-24".into());
        u.address = Some(Address {
            street: "1 Main St".into(),
            city: "Oslo".into(),
            country: "Norway".into(),
        });
        u.skills = vec!["s2".into(), "missing".into(), "s1".into(), "s2".into()];
        u.languages = vec!["l1".into()];
        u
    }

    #[test]
    fn breakpoints_select_layout_and_badge_form() {
        let bp = Breakpoints::default();
        assert_eq!(bp.layout_for(867), LayoutMode::Card);
        assert_eq!(bp.layout_for(868), LayoutMode::Table);
        assert!(bp.text_badges(867));
        assert!(!bp.text_badges(868));
    }

    #[test]
    fn table_row_projects_contact_city_and_date() {
        let row = Renderer::default().table_row(&ann());
        assert_eq!(row.full_name, "Ann Lee");
        assert_eq!(row.contact.as_deref(), Some("mailto:ann@example.org"));
        assert_eq!(row.city, "Oslo");
        assert_eq!(row.registered, "02/03/2019");
        assert_eq!(row.actions, [UserAction::View, UserAction::Edit, UserAction::Delete]);
    }

    #[test]
    fn card_resolves_badges_in_order_dedups_and_skips_missing() {
        let card = Renderer::default().card(&ann(), &book(), 500);
        let labels: Vec<&str> = card.skills.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["sql", "rust"]);
        assert!(card.skills.iter().all(|b| b.form == BadgeForm::Text));
        assert_eq!(card.languages[0].label, "english");
    }

    #[test]
    fn wide_viewport_uses_icon_badges() {
        let detail = Renderer::default().detail(&ann(), &book(), 1200);
        assert_eq!(
            detail.languages[0].form,
            BadgeForm::Icon { src: "assets/images/languages/english.png".into() }
        );
        assert_eq!(detail.title, "Ann Lee ~ annlee");
        assert_eq!(detail.address, "1 Main St ~ Oslo / Norway");
        assert_eq!(detail.birthday, "24/12/1990");
    }

    #[test]
    fn unparsable_dates_are_shown_raw() {
        let r = Renderer::new(Breakpoints::default(), "%Y");
        assert_eq!(r.format_date(Some("last tuesday")), "last tuesday");
        assert_eq!(r.format_date(None), "");
        assert_eq!(r.format_date(Some("2021-01-05")), "2021");
    }

    #[test]
    fn invalid_date_format_falls_back_to_default() {
        let r = Renderer::new(Breakpoints::default(), "%Q");
        assert_eq!(r.date_format(), DEFAULT_DATE_FORMAT);
        assert_eq!(r.format_date(Some("2019-03-02T10:00:00Z")), "02/03/2019");

        let mut user = ann();
        user.registered_date = Some("2021-01-05".into());
        let row = r.table_row(&user);
        assert_eq!(row.registered, "05/01/2021");
    }

    #[test]
    fn view_remove_by_id() {
        let r = Renderer::default();
        let users = vec![ann(), User::new("u2")];
        let mut view = r.render(&users, LayoutMode::Card, &book(), 500);
        assert_eq!(view.ids(), ["u1", "u2"]);
        assert!(view.remove("u1"));
        assert!(!view.remove("u1"));
        assert_eq!(view.ids(), ["u2"]);
        assert_eq!(view.mode(), Some(LayoutMode::Card));
    }

    #[test]
    fn filter_badges_capitalize_field_names() {
        let criteria = FilterCriteria::new().with("gender", "female").with("firstname", "an");
        let badges = Renderer::default().filter_badges(&criteria);
        assert_eq!(badges[0], FilterBadge { label: "Gender".into(), value: "female".into() });
        assert_eq!(badges[1].label, "Firstname");
    }
}
