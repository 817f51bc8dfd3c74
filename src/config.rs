use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix substituted into root-relative `href="/..."` and `src="/..."`
    /// references, for sites served from a subdirectory.
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub content: PathBuf,
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    pub output: PathBuf,
    pub template: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            output: PathBuf::from("public"),
            template: PathBuf::from("template.html"),
        }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}
