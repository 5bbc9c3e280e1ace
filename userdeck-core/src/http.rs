use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::fetcher::RemoteSource;
use crate::resource::Resource;

pub const DEFAULT_BASE_URL: &str = "https://cv-mobile-api.herokuapp.com/api";

/// 各资源相对 base_url 的路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePaths {
    #[serde(default = "default_users_path")]
    pub users: String,
    #[serde(default = "default_skills_path")]
    pub skills: String,
    #[serde(default = "default_languages_path")]
    pub languages: String,
}

fn default_users_path() -> String {
    "/users".to_string()
}
fn default_skills_path() -> String {
    "/skills".to_string()
}
fn default_languages_path() -> String {
    "/langs".to_string()
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            users: default_users_path(),
            skills: default_skills_path(),
            languages: default_languages_path(),
        }
    }
}

impl ResourcePaths {
    pub fn path(&self, resource: Resource) -> &str {
        match resource {
            Resource::Users => &self.users,
            Resource::Skills => &self.skills,
            Resource::Languages => &self.languages,
        }
    }
}

#[derive(Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
    paths: ResourcePaths,
}

impl HttpSource {
    pub fn new(base_url: Option<&str>, paths: ResourcePaths) -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("userdeck/0.1.0"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            paths,
        })
    }

    pub fn url(&self, resource: Resource) -> String {
        format!("{}{}", self.base_url, self.paths.path(resource))
    }

    /// 解析 JSON 响应体，出错时附带原始 body 片段
    fn parse_response(resource: Resource, text: &str) -> Result<Value> {
        serde_json::from_str(text).map_err(|e| Error::Decode {
            resource,
            message: format!("{e}: {}", snippet(text)),
        })
    }
}

fn snippet(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

impl RemoteSource for HttpSource {
    async fn fetch(&self, resource: Resource) -> Result<Value> {
        let url = self.url(resource);
        let transport = |e: reqwest::Error| Error::Transport {
            resource,
            message: e.to_string(),
        };

        let resp = self.http.get(&url).send().await.map_err(transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(Error::Transport {
                resource,
                message: format!("GET {url} returned {status}: {}", snippet(&text)),
            });
        }
        Self::parse_response(resource, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_resource_path() {
        let source = HttpSource::new(Some("https://api.test/v1/"), ResourcePaths::default()).unwrap();
        assert_eq!(source.url(Resource::Users), "https://api.test/v1/users");
        assert_eq!(source.url(Resource::Languages), "https://api.test/v1/langs");
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let err = HttpSource::parse_response(Resource::Skills, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::Decode { resource: Resource::Skills, .. }));
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(snippet(&long).chars().count(), 200);
        assert_eq!(snippet("short"), "short");
    }
}
