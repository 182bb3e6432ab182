//! Site configuration (`site.toml`).
//!
//! Loaded once at the start of a build and passed by reference to everything
//! that needs it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::theme::Palette;

/// Typed site configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteMeta,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

/// Site-wide metadata.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteMeta {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Scheme and host the site is served from, used for sitemap URLs
    #[serde(default)]
    pub hostname: Option<String>,
    /// GitHub repository as `owner/name`
    #[serde(default)]
    pub repo: Option<String>,
    /// Extra `<meta>` tags injected into every page head
    #[serde(default = "default_head")]
    pub head: Vec<MetaTag>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, serde::Serialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// Where content lives and where the site is written.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ContentConfig {
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
    /// Blog root, relative to `dir`
    #[serde(default = "default_blog_dir")]
    pub blog_dir: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Hand-maintained article list, checked against the scan for drift
    #[serde(default)]
    pub articles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NavigationConfig {
    #[serde(default = "default_links")]
    pub links: Vec<NavLink>,
    /// Deepest section nesting in the sidebar, also the TOC depth
    #[serde(default = "default_sidebar_depth")]
    pub sidebar_depth: usize,
    #[serde(default = "default_true")]
    pub prev_next_links: bool,
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,
}

/// A top navigation bar link.
#[derive(Debug, Clone, Deserialize, PartialEq, serde::Serialize)]
pub struct NavLink {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ThemeConfig {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_surface")]
    pub surface: String,
    #[serde(default = "default_dark_mode_selector")]
    pub dark_mode_selector: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BuildSettings {
    #[serde(default = "default_true")]
    pub minify: bool,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: String::new(),
            base_url: default_base_url(),
            hostname: None,
            repo: None,
            head: default_head(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            blog_dir: default_blog_dir(),
            output: default_output(),
            articles: None,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            links: default_links(),
            sidebar_depth: default_sidebar_depth(),
            prev_next_links: true,
            search_placeholder: default_search_placeholder(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            surface: default_surface(),
            dark_mode_selector: default_dark_mode_selector(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self { minify: true }
    }
}

fn default_title() -> String {
    "My Site".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_head() -> Vec<MetaTag> {
    [
        ("theme-color", "#3eaf7c"),
        ("apple-mobile-web-app-capable", "yes"),
        ("apple-mobile-web-app-status-bar-style", "black"),
    ]
    .into_iter()
    .map(|(name, content)| MetaTag {
        name: name.to_string(),
        content: content.to_string(),
    })
    .collect()
}
fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}
fn default_blog_dir() -> PathBuf {
    PathBuf::from("articles")
}
fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_links() -> Vec<NavLink> {
    vec![
        NavLink {
            text: "Projects".to_string(),
            link: "/about/".to_string(),
        },
        NavLink {
            text: "Blog".to_string(),
            link: "/blog/".to_string(),
        },
    ]
}
fn default_sidebar_depth() -> usize {
    4
}
fn default_search_placeholder() -> String {
    "Search...".to_string()
}
fn default_primary() -> String {
    "teal".to_string()
}
fn default_surface() -> String {
    "zinc".to_string()
}
fn default_dark_mode_selector() -> String {
    ".app-dark".to_string()
}
fn default_true() -> bool {
    true
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Unknown {role} palette '{name}'")]
    UnknownPalette { role: &'static str, name: String },
}

impl SiteConfig {
    /// Load configuration from `path` if it exists, defaults otherwise.
    ///
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.primary_palette()?;
        self.surface_palette()?;
        Ok(())
    }

    pub fn primary_palette(&self) -> Result<&'static Palette, ConfigError> {
        Palette::named(&self.theme.primary).ok_or_else(|| ConfigError::UnknownPalette {
            role: "primary",
            name: self.theme.primary.clone(),
        })
    }

    pub fn surface_palette(&self) -> Result<&'static Palette, ConfigError> {
        Palette::named(&self.theme.surface).ok_or_else(|| ConfigError::UnknownPalette {
            role: "surface",
            name: self.theme.surface.clone(),
        })
    }

    /// Base URL with exactly one trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}/", self.site.base_url.trim_end_matches('/'))
    }

    /// Absolute URL for a site path, when a hostname is configured.
    pub fn absolute_url(&self, path: &str) -> String {
        match &self.site.hostname {
            Some(host) => format!("{}{}", host.trim_end_matches('/'), path),
            None => path.to_string(),
        }
    }

    /// Blog root on disk, resolved against the site root.
    pub fn blog_root(&self, root: &Path) -> PathBuf {
        root.join(&self.content.dir).join(&self.content.blog_dir)
    }

    /// GitHub URL for the configured repository.
    pub fn repo_url(&self) -> Option<String> {
        self.site.repo.as_ref().map(|repo| {
            if repo.starts_with("http://") || repo.starts_with("https://") {
                repo.clone()
            } else {
                format!("https://github.com/{}", repo)
            }
        })
    }
}
