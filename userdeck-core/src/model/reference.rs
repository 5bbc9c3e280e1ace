use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient::text")]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "super::lenient::text")]
    pub label: String,
}
