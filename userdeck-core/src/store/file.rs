use std::path::{Path, PathBuf};

use super::CacheStore;
use crate::error::StoreError;

/// 每个键一个 JSON 文件：`<dir>/<key>.json`，重启后会话数据仍在
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl CacheStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(Self::io_err(&path))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(Self::io_err(&self.dir))?;
        let path = self.entry_path(key);
        std::fs::write(&path, value).map_err(Self::io_err(&path))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(Self::io_err(&path))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if !self.dir.exists() {
            return Ok(());
        }
        let entries = std::fs::read_dir(&self.dir).map_err(Self::io_err(&self.dir))?;
        for entry in entries {
            let path = entry.map_err(Self::io_err(&self.dir))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path).map_err(Self::io_err(&path))?;
            }
        }
        Ok(())
    }
}
