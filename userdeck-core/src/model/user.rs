use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "lenient_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<UserName>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub username: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub registered_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_address",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Address>,
    #[serde(default, deserialize_with = "lenient::id_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::id_list")]
    pub languages: Vec<String>,
    /// 其余字段原样保留，删除后回写时不丢失
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 接口里的 name 可能是 `{first, last}`，也可能是拼好的全名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserName {
    Parts {
        #[serde(default, deserialize_with = "lenient::text")]
        first: String,
        #[serde(default, deserialize_with = "lenient::text")]
        last: String,
    },
    Full(String),
}

impl UserName {
    pub fn first(&self) -> &str {
        match self {
            Self::Parts { first, .. } => first,
            Self::Full(full) => full
                .trim()
                .split_once(char::is_whitespace)
                .map_or(full.trim(), |(first, _)| first),
        }
    }

    pub fn last(&self) -> &str {
        match self {
            Self::Parts { last, .. } => last,
            Self::Full(full) => full
                .trim()
                .split_once(char::is_whitespace)
                .map_or("", |(_, rest)| rest.trim()),
        }
    }

    pub fn full(&self) -> String {
        match self {
            Self::Parts { first, last } => format!("{first} {last}").trim().to_string(),
            Self::Full(full) => full.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "lenient::text")]
    pub street: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub country: String,
}

/// 对象按 `{first, last}`，标量按全名；其他形状视为缺失
fn lenient_name<'de, D>(deserializer: D) -> Result<Option<UserName>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => UserName::deserialize(Value::Object(map)).ok(),
        Value::String(full) => Some(UserName::Full(full)),
        Value::Number(n) => Some(UserName::Full(n.to_string())),
        _ => None,
    })
}

fn lenient_address<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => Address::deserialize(Value::Object(map)).ok(),
        _ => None,
    })
}

impl User {
    /// 仅带 id 的空记录，其余字段按需填充
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            username: None,
            email: None,
            phone: None,
            avatar: None,
            gender: None,
            birth_date: None,
            registered_date: None,
            address: None,
            skills: Vec::new(),
            languages: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn first_name(&self) -> &str {
        self.name.as_ref().map_or("", UserName::first)
    }

    pub fn last_name(&self) -> &str {
        self.name.as_ref().map_or("", UserName::last)
    }

    /// 展示用名字：全名 → 用户名 → id
    pub fn display_name(&self) -> String {
        self.name
            .as_ref()
            .map(UserName::full)
            .filter(|n| !n.is_empty())
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| self.id.clone())
    }

    pub fn city(&self) -> &str {
        self.address.as_ref().map_or("", |a| a.city.as_str())
    }
}
