use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use userdeck_core::ResourcePaths;
use userdeck_core::http::DEFAULT_BASE_URL;
use userdeck_core::view::{Breakpoints, DEFAULT_DATE_FORMAT};

use super::paths;
use crate::ui::i18n::Lang;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_users_path")]
    pub users_path: String,
    #[serde(default = "default_skills_path")]
    pub skills_path: String,
    #[serde(default = "default_languages_path")]
    pub languages_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSettings {
    /// false：会话数据只在内存；true：写入缓存目录，重启后保留
    #[serde(default)]
    pub persist: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub language: Lang,
    #[serde(default = "default_breakpoint")]
    pub breakpoint: u32,
    #[serde(default = "default_badge_breakpoint")]
    pub badge_breakpoint: u32,
    /// 终端不报告像素尺寸时，按每列多少像素估算视口宽度
    #[serde(default = "default_cell_width")]
    pub cell_width_px: u32,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,
    #[serde(default = "default_filtered_pause")]
    pub filtered_resize_pause_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_users_path() -> String {
    ResourcePaths::default().users
}
fn default_skills_path() -> String {
    ResourcePaths::default().skills
}
fn default_languages_path() -> String {
    ResourcePaths::default().languages
}
fn default_breakpoint() -> u32 {
    Breakpoints::default().layout
}
fn default_badge_breakpoint() -> u32 {
    Breakpoints::default().badge
}
fn default_cell_width() -> u32 {
    8
}
fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}
fn default_resize_debounce() -> u64 {
    150
}
fn default_filtered_pause() -> u64 {
    1000
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            users_path: default_users_path(),
            skills_path: default_skills_path(),
            languages_path: default_languages_path(),
        }
    }
}

impl ApiSettings {
    pub fn resource_paths(&self) -> ResourcePaths {
        ResourcePaths {
            users: self.users_path.clone(),
            skills: self.skills_path.clone(),
            languages: self.languages_path.clone(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            language: Lang::default(),
            breakpoint: default_breakpoint(),
            badge_breakpoint: default_badge_breakpoint(),
            cell_width_px: default_cell_width(),
            date_format: default_date_format(),
            resize_debounce_ms: default_resize_debounce(),
            filtered_resize_pause_ms: default_filtered_pause(),
        }
    }
}

impl DisplaySettings {
    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            layout: self.breakpoint,
            badge: self.badge_breakpoint,
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn filtered_resize_pause(&self) -> Duration {
        Duration::from_millis(self.filtered_resize_pause_ms)
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = paths::config_file()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            let settings = Self::default();
            settings.save()?;
            Ok(settings)
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = paths::config_file()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
