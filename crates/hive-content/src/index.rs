//! Content index built from a filesystem scan of the blog root.
//!
//! Every directory below the blog root is a section; every markdown file in
//! it whose slug survives [`derive_entries`] is an article.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::slug::{derive_entries, Slug, SlugError};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdx"];

/// An article discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    /// Directory segments between the blog root and the file
    pub section: Vec<String>,

    pub slug: Slug,

    /// Absolute or caller-relative path to the source file
    pub source: PathBuf,

    /// Path relative to the content directory, `/`-separated
    pub content_path: String,
}

impl ArticleRef {
    /// Section segments and slug joined with `/`, e.g. `prometheus/1-architecture`.
    pub fn key(&self) -> String {
        let mut parts: Vec<&str> = self.section.iter().map(String::as_str).collect();
        parts.push(self.slug.as_str());
        parts.join("/")
    }
}

/// Disagreement between a hand-maintained article list and the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drift {
    /// Listed paths with no article on disk
    pub missing_on_disk: Vec<String>,
    /// Articles on disk absent from the list
    pub unlisted: Vec<String>,
}

impl Drift {
    pub fn is_clean(&self) -> bool {
        self.missing_on_disk.is_empty() && self.unlisted.is_empty()
    }
}

/// Errors that can occur while indexing content.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error(transparent)]
    Slug(#[from] SlugError),

    #[error("Failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("Article '{key}' has more than one source: {}", display_paths(sources))]
    DuplicateArticle { key: String, sources: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ordered list of every article under the blog root.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    blog_root: PathBuf,
    articles: Vec<ArticleRef>,
}

impl ContentIndex {
    /// Scan `content_dir/blog_dir` for articles.
    ///
    /// Articles are ordered by section path, then slug. Hidden directories
    /// are skipped. Two files resolving to the same `section/slug` key (such
    /// as `post.md` and `post.markdown`) are an error.
    pub fn scan(content_dir: &Path, blog_dir: &Path) -> Result<Self, IndexError> {
        let blog_root = content_dir.join(blog_dir);

        if !blog_root.is_dir() {
            return Err(SlugError::DirectoryNotFound { path: blog_root }.into());
        }

        let prefix = path_segments(blog_dir);
        let mut articles = Vec::new();
        let mut keys: HashMap<String, PathBuf> = HashMap::new();

        let walker = WalkDir::new(&blog_root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()));

        for entry in walker {
            let entry = entry.map_err(|e| IndexError::Walk {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| blog_root.clone()),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = entry.path();
            let section = path_segments(dir.strip_prefix(&blog_root).unwrap_or(Path::new("")));

            for slug_entry in derive_entries(dir)? {
                if slug_entry.is_dir {
                    continue;
                }

                if !is_markdown(&slug_entry.file_name) {
                    tracing::debug!(
                        "Skipping non-markdown file {}",
                        dir.join(&slug_entry.file_name).display()
                    );
                    continue;
                }

                let content_path = prefix
                    .iter()
                    .chain(section.iter())
                    .map(String::as_str)
                    .chain(std::iter::once(slug_entry.file_name.as_str()))
                    .collect::<Vec<_>>()
                    .join("/");

                let article = ArticleRef {
                    section: section.clone(),
                    slug: slug_entry.slug,
                    source: dir.join(&slug_entry.file_name),
                    content_path,
                };

                if let Some(first) = keys.insert(article.key(), article.source.clone()) {
                    return Err(IndexError::DuplicateArticle {
                        key: article.key(),
                        sources: vec![first, article.source],
                    });
                }

                articles.push(article);
            }
        }

        tracing::debug!(
            "Indexed {} articles under {}",
            articles.len(),
            blog_root.display()
        );

        Ok(Self {
            blog_root,
            articles,
        })
    }

    pub fn blog_root(&self) -> &Path {
        &self.blog_root
    }

    pub fn articles(&self) -> &[ArticleRef] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Look up an article by its `section/.../slug` key.
    pub fn find(&self, key: &str) -> Option<&ArticleRef> {
        let key = key.trim_matches('/');
        self.articles.iter().find(|a| a.key() == key)
    }

    /// Compare a hand-maintained list of content paths against the scan.
    ///
    /// Entries are compared after normalizing separators and stripping a
    /// leading `./` or `/`.
    pub fn reconcile(&self, manual: &[String]) -> Drift {
        let listed: Vec<String> = manual.iter().map(|p| normalize_listed(p)).collect();
        let listed_set: HashSet<&str> = listed.iter().map(String::as_str).collect();
        let on_disk: HashSet<&str> = self
            .articles
            .iter()
            .map(|a| a.content_path.as_str())
            .collect();

        let mut seen = HashSet::new();
        let missing_on_disk = listed
            .iter()
            .filter(|p| !on_disk.contains(p.as_str()) && seen.insert(p.as_str()))
            .cloned()
            .collect();

        let unlisted = self
            .articles
            .iter()
            .filter(|a| !listed_set.contains(a.content_path.as_str()))
            .map(|a| a.content_path.clone())
            .collect();

        Drift {
            missing_on_disk,
            unlisted,
        }
    }
}

fn is_markdown(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|m| m.eq_ignore_ascii_case(ext))
        })
}

fn is_hidden(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.starts_with('.'))
}

fn path_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

fn normalize_listed(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    path.trim_start_matches("./").trim_start_matches('/').to_string()
}
