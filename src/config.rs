use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Escape markup-significant characters in the input before rendering.
    pub escape_html: bool,
    pub classes: ClassConfig,
    pub links: LinksConfig,
}

/// Class attribute values for block elements. Empty strings omit the attribute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    pub paragraph: String,
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub unordered_list: String,
    pub ordered_list: String,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            paragraph: "mb-3".to_string(),
            h1: "text-2xl font-bold mt-3 mb-2".to_string(),
            h2: "text-xl font-bold mt-3 mb-2".to_string(),
            h3: "text-lg font-bold mt-3 mb-2".to_string(),
            unordered_list: "list-disc ml-5 my-3".to_string(),
            ordered_list: "list-decimal ml-5 my-3".to_string(),
        }
    }
}

impl ClassConfig {
    /// Classes with every attribute left empty.
    pub fn empty() -> Self {
        Self {
            paragraph: String::new(),
            h1: String::new(),
            h2: String::new(),
            h3: String::new(),
            unordered_list: String::new(),
            ordered_list: String::new(),
        }
    }

    /// Get the class for a heading level.
    /// Returns None for levels the renderer never emits.
    pub fn for_heading(&self, level: u8) -> Option<&str> {
        match level {
            1 => Some(self.h1.as_str()),
            2 => Some(self.h2.as_str()),
            3 => Some(self.h3.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub class: String,
    /// Open links in a new browsing context (`target="_blank"` plus `rel`).
    pub new_tab: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            class: "underline text-blue-500 hover:text-blue-700".to_string(),
            new_tab: true,
        }
    }
}

impl Config {
    /// The configuration embedded from `default_config.toml`.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Defaults without any class attributes.
    pub fn bare() -> Self {
        Self {
            escape_html: false,
            classes: ClassConfig::empty(),
            links: LinksConfig {
                class: String::new(),
                new_tab: true,
            },
        }
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Load config from a TOML file, reporting read and parse failures.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
