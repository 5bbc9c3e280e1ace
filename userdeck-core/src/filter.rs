//! 高级搜索：表单输入 → 条件 → 过滤后的用户子集。
//!
//! 条件按固定顺序合取：先 gender（忽略大小写的全等），再按 firstname / lastname
//! 是否存在走三条互斥的姓名分支（忽略大小写的子串匹配）。空条件原样返回输入，
//! 结果保持输入中的相对顺序。

use crate::model::User;

pub const GENDER: &str = "gender";
pub const FIRSTNAME: &str = "firstname";
pub const LASTNAME: &str = "lastname";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Radio,
    Checkbox,
}

/// 搜索表单中的一个原始输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInput {
    pub name: String,
    pub kind: InputKind,
    pub value: String,
    pub checked: bool,
}

impl FilterInput {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Text,
            value: value.into(),
            checked: false,
        }
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Radio,
            value: value.into(),
            checked,
        }
    }

    pub fn checkbox(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Checkbox,
            value: value.into(),
            checked,
        }
    }

    /// 单选/复选框需勾选；文本框去空白后非空
    fn participates(&self) -> bool {
        match self.kind {
            InputKind::Radio | InputKind::Checkbox => self.checked,
            InputKind::Text => !self.value.trim().is_empty(),
        }
    }
}

/// 有序的 字段 → 值 映射；同名字段后者覆盖前者，位置不变
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    entries: Vec<(String, String)>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_inputs(inputs: &[FilterInput]) -> Self {
        let mut criteria = Self::new();
        for input in inputs.iter().filter(|i| i.participates()) {
            criteria.insert(&input.name, input.value.trim());
        }
        criteria
    }

    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: &str) {
        match self.entries.iter_mut().find(|(f, _)| f == field) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((field.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, v)| f == field && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// 按条件过滤，不修改输入，返回新集合
pub fn filter_users(criteria: &FilterCriteria, users: &[User]) -> Vec<User> {
    if criteria.is_empty() {
        return users.to_vec();
    }

    let gender = criteria.get(GENDER).map(str::to_lowercase);
    let first = criteria.get(FIRSTNAME).map(str::to_lowercase);
    let last = criteria.get(LASTNAME).map(str::to_lowercase);

    let filtered: Vec<User> = users
        .iter()
        .filter(|user| match &gender {
            Some(g) => user
                .gender
                .as_deref()
                .is_some_and(|ug| ug.to_lowercase() == *g),
            None => true,
        })
        .filter(|user| match (&first, &last) {
            (Some(f), Some(l)) => {
                contains_ci(user.first_name(), f) && contains_ci(user.last_name(), l)
            }
            (None, Some(l)) => contains_ci(user.last_name(), l),
            (Some(f), None) => contains_ci(user.first_name(), f),
            (None, None) => true,
        })
        .cloned()
        .collect();

    tracing::debug!(
        criteria = criteria.len(),
        input = users.len(),
        output = filtered.len(),
        "users filtered"
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserName;

    fn user(id: &str, gender: &str, first: &str, last: &str) -> User {
        let mut u = User::new(id);
        u.gender = Some(gender.to_string());
        u.name = Some(UserName::Parts {
            first: first.to_string(),
            last: last.to_string(),
        });
        u
    }

    fn ids(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.id.as_str()).collect()
    }

    fn sample() -> Vec<User> {
        vec![
            user("1", "male", "Ann", "Lee"),
            user("2", "female", "Ann", "Lee"),
            user("3", "male", "Anders", "Berg"),
            user("4", "female", "Zoe", "Leeds"),
        ]
    }

    #[test]
    fn empty_criteria_is_identity() {
        let users = sample();
        assert_eq!(filter_users(&FilterCriteria::new(), &users), users);
    }

    #[test]
    fn gender_is_case_insensitive_exact_match() {
        let users = sample();
        let out = filter_users(&FilterCriteria::new().with(GENDER, "Female"), &users);
        assert_eq!(ids(&out), ["2", "4"]);

        let none = filter_users(&FilterCriteria::new().with(GENDER, "fem"), &users);
        assert!(none.is_empty());
    }

    #[test]
    fn firstname_only_matches_substring() {
        let out = filter_users(&FilterCriteria::new().with(FIRSTNAME, "an"), &sample());
        assert_eq!(ids(&out), ["1", "2", "3"]);
    }

    #[test]
    fn lastname_only_matches_substring() {
        let out = filter_users(&FilterCriteria::new().with(LASTNAME, "LEE"), &sample());
        assert_eq!(ids(&out), ["1", "2", "4"]);
    }

    #[test]
    fn both_names_must_match() {
        let criteria = FilterCriteria::new().with(FIRSTNAME, "an").with(LASTNAME, "berg");
        assert_eq!(ids(&filter_users(&criteria, &sample())), ["3"]);
    }

    #[test]
    fn gender_and_name_are_conjunctive() {
        let criteria = FilterCriteria::new().with(GENDER, "female").with(LASTNAME, "lee");
        assert_eq!(ids(&filter_users(&criteria, &sample())), ["2", "4"]);
    }

    #[test]
    fn users_without_gender_never_match_gender_filter() {
        let mut users = sample();
        users.push(User::new("5"));
        let out = filter_users(&FilterCriteria::new().with(GENDER, "male"), &users);
        assert_eq!(ids(&out), ["1", "3"]);
    }

    #[test]
    fn unknown_fields_do_not_filter() {
        let users = sample();
        let out = filter_users(&FilterCriteria::new().with("city", "Oslo"), &users);
        assert_eq!(out.len(), users.len());
    }

    #[test]
    fn from_inputs_keeps_checked_and_non_blank() {
        let inputs = vec![
            FilterInput::radio(GENDER, "male", false),
            FilterInput::radio(GENDER, "female", true),
            FilterInput::text(FIRSTNAME, "   "),
            FilterInput::text(LASTNAME, "  lee "),
            FilterInput::checkbox("active", "yes", false),
        ];
        let criteria = FilterCriteria::from_inputs(&inputs);
        let pairs: Vec<(&str, &str)> = criteria.iter().collect();
        assert_eq!(pairs, [(GENDER, "female"), (LASTNAME, "lee")]);
    }
}
