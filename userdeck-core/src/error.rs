use std::path::PathBuf;

use thiserror::Error;

use crate::resource::Resource;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// 网络层或 HTTP 状态失败
    #[error("[{resource}] transport failure: {message}")]
    Transport { resource: Resource, message: String },

    /// 响应格式正确，但带有显式 `error` 字段
    #[error("[{resource}] {message}")]
    Application { resource: Resource, message: String },

    #[error("[{resource}] unexpected payload: {message}")]
    Decode { resource: Resource, message: String },

    #[error("no {resource} record with id {id}")]
    NotFound { resource: Resource, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache i/o failed on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed cache entry {key}: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cache store lock poisoned")]
    Poisoned,
}
