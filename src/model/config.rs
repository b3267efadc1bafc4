use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::list::DEFAULT_LIST_NAME;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub lists: ListsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListsConfig {
    /// Name given to newly created lists
    #[serde(default = "default_list_name")]
    pub default_name: String,
}

impl Default for ListsConfig {
    fn default() -> Self {
        ListsConfig {
            default_name: default_list_name(),
        }
    }
}

fn default_list_name() -> String {
    DEFAULT_LIST_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Terminal cells per indentation level
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides per palette
    #[serde(default)]
    pub colors: ColorOverrides,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            indent_width: default_indent_width(),
            sidebar_width: default_sidebar_width(),
            show_key_hints: true,
            colors: ColorOverrides::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOverrides {
    #[serde(default)]
    pub dark: HashMap<String, String>,
    #[serde(default)]
    pub light: HashMap<String, String>,
}

fn default_indent_width() -> usize {
    2
}

fn default_sidebar_width() -> u16 {
    24
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// off | error | warn | info | debug | trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
