//! 展示字段的宽松反序列化：`null` 取默认值，数字/布尔转成文本，
//! 其余无法展示的值丢弃，单条脏数据不拖垮整个集合。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text(deserializer)?.unwrap_or_default())
}

/// id 列表：非数组按空处理，元素里的非标量跳过
pub fn id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "opt_text")]
        phone: Option<String>,
        #[serde(default, deserialize_with = "text")]
        city: String,
        #[serde(default, deserialize_with = "id_list")]
        skills: Vec<String>,
    }

    #[test]
    fn scalars_become_text_and_null_is_default() {
        let p: Sample =
            serde_json::from_str(r#"{"phone": 5551234, "city": null, "skills": ["a", 7, null, {}]}"#)
                .unwrap();
        assert_eq!(p.phone.as_deref(), Some("5551234"));
        assert_eq!(p.city, "");
        assert_eq!(p.skills, ["a", "7"]);
    }

    #[test]
    fn non_array_list_is_empty() {
        let p: Sample = serde_json::from_str(r#"{"skills": "s1", "phone": null}"#).unwrap();
        assert!(p.skills.is_empty());
        assert!(p.phone.is_none());
    }
}
