//! 会话级缓存：`CacheStore` 是字符串键值后端，`Repository` 在其上提供按实体类型的读写。
//!
//! 删除是 读 → 过滤 → 整体回写，无锁，最后写入者生效；调用方都在同一个 UI 循环里串行执行。

mod file;
mod memory;

use std::sync::Arc;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{Error, Result, StoreError};
use crate::model::Record;

/// 字符串键值存储后端（内存 / 文件）
pub trait CacheStore: Send + Sync {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> std::result::Result<(), StoreError>;
    fn remove(&self, key: &str) -> std::result::Result<(), StoreError>;
    fn clear(&self) -> std::result::Result<(), StoreError>;
}

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn CacheStore>,
}

impl Repository {
    pub fn new(store: impl CacheStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn get<T: Record>(&self) -> Result<Option<Vec<T>>> {
        let key = T::RESOURCE.storage_key();
        let Some(raw) = self.store.read(key)? else {
            return Ok(None);
        };
        let items = serde_json::from_str(&raw).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(items))
    }

    /// 未缓存时返回空集合
    pub fn get_or_empty<T: Record>(&self) -> Result<Vec<T>> {
        Ok(self.get()?.unwrap_or_default())
    }

    pub fn set<T: Record>(&self, items: &[T]) -> Result<()> {
        let key = T::RESOURCE.storage_key();
        let raw = serde_json::to_string(items).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })?;
        self.store.write(key, &raw)?;
        tracing::debug!(key, count = items.len(), "cache entry written");
        Ok(())
    }

    pub fn has<T: Record>(&self) -> Result<bool> {
        Ok(self.store.read(T::RESOURCE.storage_key())?.is_some())
    }

    pub fn find<T: Record>(&self, id: &str) -> Result<Option<T>> {
        Ok(self
            .get::<T>()?
            .and_then(|items| items.into_iter().find(|item| item.id() == id)))
    }

    pub fn require<T: Record>(&self, id: &str) -> Result<T> {
        self.find(id)?.ok_or_else(|| Error::NotFound {
            resource: T::RESOURCE,
            id: id.to_string(),
        })
    }

    /// 删除单条记录并回写整个集合，返回是否确有删除
    pub fn delete<T: Record>(&self, id: &str) -> Result<bool> {
        let Some(mut items) = self.get::<T>()? else {
            return Ok(false);
        };
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        self.set(&items)?;
        Ok(true)
    }

    pub fn evict<T: Record>(&self) -> Result<()> {
        self.store.remove(T::RESOURCE.storage_key())?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("session cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Skill, User};

    fn users(ids: &[&str]) -> Vec<User> {
        ids.iter().map(|id| User::new(*id)).collect()
    }

    #[test]
    fn get_returns_none_until_set() {
        let repo = Repository::memory();
        assert!(repo.get::<User>().unwrap().is_none());
        assert!(!repo.has::<User>().unwrap());

        repo.set(&users(&["a", "b"])).unwrap();
        assert!(repo.has::<User>().unwrap());
        let cached = repo.get::<User>().unwrap().unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[1].id, "b");
    }

    #[test]
    fn resources_are_namespaced_by_type() {
        let repo = Repository::memory();
        repo.set(&users(&["a"])).unwrap();
        assert!(!repo.has::<Skill>().unwrap());
    }

    #[test]
    fn delete_rewrites_collection_without_record() {
        let repo = Repository::memory();
        repo.set(&users(&["a", "b", "c"])).unwrap();

        assert!(repo.delete::<User>("b").unwrap());
        let ids: Vec<String> = repo
            .get_or_empty::<User>()
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, ["a", "c"]);

        assert!(!repo.delete::<User>("missing").unwrap());
    }

    #[test]
    fn require_reports_not_found() {
        let repo = Repository::memory();
        repo.set(&users(&["a"])).unwrap();
        assert_eq!(repo.require::<User>("a").unwrap().id, "a");
        let err = repo.require::<User>("zz").unwrap_err();
        assert!(matches!(err, Error::NotFound { ref id, .. } if id == "zz"));
    }

    #[test]
    fn malformed_entry_is_a_store_error() {
        let store = MemoryStore::new();
        store.write("users-list", "{not json").unwrap();
        let repo = Repository::new(store);
        assert!(matches!(repo.get::<User>(), Err(Error::Store(StoreError::Serde { .. }))));
    }
}
