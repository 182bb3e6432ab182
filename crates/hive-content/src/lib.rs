//! Article content for the hive site generator.
//!
//! This crate derives article slugs from the files on disk, builds the
//! content index that drives navigation and routing, and parses markdown
//! articles with their frontmatter.

pub mod article;
pub mod frontmatter;
pub mod index;
pub mod slug;

pub use article::{heading_anchor, parse_article, Article, ArticleError, TocEntry};
pub use frontmatter::Frontmatter;
pub use index::{ArticleRef, ContentIndex, Drift, IndexError};
pub use slug::{
    derive_entries, derive_slugs, is_index, slug_from_file_name, Slug, SlugEntry, SlugError,
    SlugList,
};
