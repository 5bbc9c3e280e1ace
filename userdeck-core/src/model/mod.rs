mod lenient;
pub mod reference;
pub mod user;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::resource::Resource;

pub use reference::{Language, Skill};
pub use user::{Address, User, UserName};

/// 可缓存、可按 id 查找的实体
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const RESOURCE: Resource;

    fn id(&self) -> &str;
}

impl Record for User {
    const RESOURCE: Resource = Resource::Users;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Skill {
    const RESOURCE: Resource = Resource::Skills;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Language {
    const RESOURCE: Resource = Resource::Languages;

    fn id(&self) -> &str {
        &self.id
    }
}
