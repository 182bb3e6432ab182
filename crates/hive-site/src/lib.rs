//! Static site generator for the hive personal site and blog.
//!
//! Turns a content directory of markdown files into a static site: home and
//! about pages, a blog listing and one page per article, with a sidebar and
//! route table derived from the files on disk.

pub mod assets;
pub mod builder;
pub mod config;
pub mod navigation;
pub mod routes;
pub mod templates;
pub mod theme;

pub use builder::{BuildError, BuildResult, SiteBuilder};
pub use config::{ConfigError, SiteConfig};
pub use routes::{Route, RouteTable, View};
pub use theme::{Palette, Theme};
