use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Language, Record, Skill, User};
use crate::resource::Resource;
use crate::store::Repository;

/// 远端数据源：单次 GET，不重试、无超时
pub trait RemoteSource: Send + Sync + 'static {
    fn fetch(&self, resource: Resource) -> impl Future<Output = Result<Value>> + Send;
}

/// 一次 ensure 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    /// 会话缓存已有，未发请求
    Cached,
    /// 新拉取并写入缓存的记录数
    Fetched(usize),
}

impl Population {
    pub fn hit_network(self) -> bool {
        matches!(self, Self::Fetched(_))
    }
}

/// 三个资源各自独立加载的结果
#[derive(Debug)]
pub struct LoadReport {
    pub users: Result<Population>,
    pub skills: Result<Population>,
    pub languages: Result<Population>,
}

pub struct Fetcher<R> {
    repo: Repository,
    source: Arc<R>,
}

impl<R> Clone for Fetcher<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            source: Arc::clone(&self.source),
        }
    }
}

impl<R: RemoteSource> Fetcher<R> {
    pub fn new(repo: Repository, source: R) -> Self {
        Self {
            repo,
            source: Arc::new(source),
        }
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// 缓存中没有时才请求；成功后整体写入缓存。
    ///
    /// 先查后取不是原子的：两个调用方可能同时看到"未缓存"并各自请求，
    /// 写入内容相同，最后写入者生效。
    pub async fn ensure<T: Record>(&self) -> Result<Population> {
        let resource = T::RESOURCE;
        if self.repo.has::<T>()? {
            tracing::debug!(%resource, "served from session cache");
            return Ok(Population::Cached);
        }

        tracing::info!(%resource, "fetching");
        let body = self.source.fetch(resource).await.inspect_err(|e| {
            tracing::warn!(%resource, error = %e, "fetch failed");
        })?;
        let items: Vec<T> = decode_collection(resource, body)?;
        self.repo.set(&items)?;
        tracing::info!(%resource, count = items.len(), "cached");
        Ok(Population::Fetched(items.len()))
    }

    pub async fn ensure_resource(&self, resource: Resource) -> Result<Population> {
        match resource {
            Resource::Users => self.ensure::<User>().await,
            Resource::Skills => self.ensure::<Skill>().await,
            Resource::Languages => self.ensure::<Language>().await,
        }
    }

    /// 丢弃缓存后重新拉取
    pub async fn refresh(&self, resource: Resource) -> Result<Population> {
        match resource {
            Resource::Users => self.repo.evict::<User>()?,
            Resource::Skills => self.repo.evict::<Skill>()?,
            Resource::Languages => self.repo.evict::<Language>()?,
        }
        self.ensure_resource(resource).await
    }

    pub async fn load_all(&self) -> LoadReport {
        let (users, skills, languages) = tokio::join!(
            self.ensure::<User>(),
            self.ensure::<Skill>(),
            self.ensure::<Language>(),
        );
        LoadReport {
            users,
            skills,
            languages,
        }
    }
}

/// 响应体 → 记录集合；带 `error` 字段的对象视为应用层错误
pub fn decode_collection<T: Record>(resource: Resource, body: Value) -> Result<Vec<T>> {
    if let Some(marker) = body.get("error").filter(|v| !is_falsy(v)) {
        let message = match marker {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(Error::Application { resource, message });
    }
    if !body.is_array() {
        return Err(Error::Decode {
            resource,
            message: "expected a JSON array".to_string(),
        });
    }
    serde_json::from_value(body).map_err(|e| Error::Decode {
        resource,
        message: e.to_string(),
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    struct StaticSource {
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RemoteSource for StaticSource {
        async fn fetch(&self, resource: Resource) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(match resource {
                Resource::Users => json!([{"_id": "u1", "name": {"first": "Ann", "last": "Lee"}}]),
                Resource::Skills => json!([{"_id": "s1", "label": "rust"}]),
                Resource::Languages => json!({"error": "langs unavailable"}),
            })
        }
    }

    #[tokio::test]
    async fn ensure_fetches_once_then_serves_cache() {
        let fetcher = Fetcher::new(Repository::memory(), StaticSource::new());

        assert_eq!(fetcher.ensure::<User>().await.unwrap(), Population::Fetched(1));
        assert_eq!(fetcher.ensure::<User>().await.unwrap(), Population::Cached);
        assert_eq!(fetcher.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn error_marker_is_application_error_and_not_cached() {
        let fetcher = Fetcher::new(Repository::memory(), StaticSource::new());
        let err = fetcher.ensure::<Language>().await.unwrap_err();
        assert!(matches!(err, Error::Application { resource: Resource::Languages, ref message } if message == "langs unavailable"));
        assert!(!fetcher.repo().has::<Language>().unwrap());
    }

    #[tokio::test]
    async fn load_all_reports_each_resource_independently() {
        let fetcher = Fetcher::new(Repository::memory(), StaticSource::new());
        let report = fetcher.load_all().await;
        assert!(report.users.unwrap().hit_network());
        assert!(report.skills.is_ok());
        assert!(report.languages.is_err());
    }

    #[tokio::test]
    async fn refresh_bypasses_cache() {
        let fetcher = Fetcher::new(Repository::memory(), StaticSource::new());
        fetcher.ensure::<Skill>().await.unwrap();
        assert_eq!(fetcher.refresh(Resource::Skills).await.unwrap(), Population::Fetched(1));
        assert_eq!(fetcher.source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn decode_rejects_non_array_and_tolerates_false_marker() {
        let err = decode_collection::<Skill>(Resource::Skills, json!({"items": []})).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));

        let ok = decode_collection::<Skill>(Resource::Skills, json!([{"id": "s1", "label": "go"}])).unwrap();
        assert_eq!(ok[0].label, "go");

        assert!(is_falsy(&json!(false)));
        assert!(!is_falsy(&json!("boom")));
    }

    #[test]
    fn messy_user_fields_do_not_reject_the_collection() {
        let body = json!([
            {"_id": "1", "name": {"first": "Ann", "last": null}, "skills": ["s1"]},
            {
                "_id": "2",
                "skills": null,
                "languages": [3, null],
                "phone": 5551234,
                "address": {"city": null, "country": "NO"}
            },
            {"_id": "3", "name": 42, "address": "somewhere", "email": true}
        ]);
        let users = decode_collection::<User>(Resource::Users, body).unwrap();
        assert_eq!(users.len(), 3);

        assert_eq!(users[0].first_name(), "Ann");
        assert_eq!(users[0].last_name(), "");

        assert!(users[1].skills.is_empty());
        assert_eq!(users[1].languages, ["3"]);
        assert_eq!(users[1].phone.as_deref(), Some("5551234"));
        assert_eq!(users[1].city(), "");

        assert_eq!(users[2].display_name(), "42");
        assert!(users[2].address.is_none());
        assert_eq!(users[2].email.as_deref(), Some("true"));

        let skills =
            decode_collection::<Skill>(Resource::Skills, json!([{"_id": "s1", "label": null}])).unwrap();
        assert_eq!(skills[0].label, "");
    }
}
