pub mod board;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod http;
pub mod model;
pub mod resource;
pub mod store;
pub mod view;

pub use board::{Board, ResizeOutcome};
pub use error::{Error, Result, StoreError};
pub use fetcher::{Fetcher, LoadReport, Population, RemoteSource};
pub use filter::{FilterCriteria, FilterInput, InputKind, filter_users};
pub use http::{HttpSource, ResourcePaths};
pub use model::{Language, Record, Skill, User};
pub use resource::Resource;
pub use store::{CacheStore, FileStore, MemoryStore, Repository};
pub use view::{Breakpoints, LayoutMode, Renderer, View};
