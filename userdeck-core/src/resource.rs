use std::fmt;

use serde::{Deserialize, Serialize};

/// 远端资源名，同时决定缓存键与请求路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Users,
    Skills,
    Languages,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Users, Resource::Skills, Resource::Languages];

    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Users => "users-list",
            Self::Skills => "skills-list",
            Self::Languages => "languages-list",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Skills => "skills",
            Self::Languages => "languages",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
