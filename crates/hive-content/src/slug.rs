//! Slug derivation from a directory of article files.
//!
//! A slug is a file name with its final `.ext` segment removed. Files whose
//! slug is `index` (any case) and names that leave nothing behind once the
//! extension is dropped are not articles and never show up in the result.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Display identifier for an article, derived from its file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Borrow the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the slug, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Slug {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered slugs for one directory, in listing order.
pub type SlugList = Vec<Slug>;

/// A directory entry that survived slug filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugEntry {
    /// Derived slug
    pub slug: Slug,
    /// Original file name, extension included
    pub file_name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

/// Errors that can occur when listing an article directory.
#[derive(Debug, thiserror::Error)]
pub enum SlugError {
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied reading directory: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Failed to list directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SlugError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
                Self::DirectoryNotFound { path }
            }
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source: err },
        }
    }
}

/// Strip the final `.`-delimited segment from a file name.
///
/// Internal dots survive (`2.client-api.md` -> `2.client-api`). A name
/// without any dot has nothing left and yields `""`.
pub fn slug_from_file_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => "",
    }
}

/// Case-insensitive check for the reserved `index` slug.
pub fn is_index(slug: &str) -> bool {
    slug.eq_ignore_ascii_case("index")
}

/// List a directory and keep every entry that yields a usable slug.
///
/// Entries are returned in file-name order. Subdirectories are treated as
/// plain names, exactly like files.
pub fn derive_entries(dir: &Path) -> Result<Vec<SlugEntry>, SlugError> {
    // read_dir on a regular file reports an OS-specific error kind
    if dir.exists() && !dir.is_dir() {
        return Err(SlugError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut listing = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| SlugError::from_io(dir, e))? {
        let entry = entry.map_err(|e| SlugError::from_io(dir, e))?;
        let is_dir = entry
            .file_type()
            .map_err(|e| SlugError::from_io(dir, e))?
            .is_dir();

        match entry.file_name().into_string() {
            Ok(name) => listing.push((name, is_dir)),
            Err(raw) => {
                tracing::warn!(
                    "Skipping non UTF-8 entry {:?} in {}",
                    raw,
                    dir.display()
                );
            }
        }
    }
    listing.sort();

    tracing::debug!(
        "{} entries: {:?}",
        dir.display(),
        listing.iter().map(|(name, _)| name).collect::<Vec<_>>()
    );

    let entries: Vec<SlugEntry> = listing
        .into_iter()
        .filter_map(|(file_name, is_dir)| {
            let slug = slug_from_file_name(&file_name);
            if slug.is_empty() || is_index(slug) {
                return None;
            }
            Some(SlugEntry {
                slug: Slug(slug.to_string()),
                file_name,
                is_dir,
            })
        })
        .collect();

    tracing::debug!(
        "{}: {:?}",
        dir.display(),
        entries.iter().map(|e| e.slug.as_str()).collect::<Vec<_>>()
    );

    Ok(entries)
}

/// Derive the slug list for an article directory.
pub fn derive_slugs(dir: &Path) -> Result<SlugList, SlugError> {
    Ok(derive_entries(dir)?.into_iter().map(|e| e.slug).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), "").unwrap();
        }
    }

    fn as_strings(slugs: &[Slug]) -> Vec<&str> {
        slugs.iter().map(Slug::as_str).collect()
    }

    #[test]
    fn strips_final_extension_only() {
        assert_eq!(slug_from_file_name("1-architecture.md"), "1-architecture");
        assert_eq!(slug_from_file_name("2.client-api.md"), "2.client-api");
        assert_eq!(slug_from_file_name("archive.tar.gz"), "archive.tar");
        assert_eq!(slug_from_file_name("README"), "");
        assert_eq!(slug_from_file_name(".gitignore"), "");
    }

    #[test]
    fn index_check_ignores_case() {
        assert!(is_index("index"));
        assert!(is_index("Index"));
        assert!(is_index("INDEX"));
        assert!(!is_index("indexes"));
        assert!(!is_index("my-index"));
    }

    #[test]
    fn derives_prometheus_series() {
        let temp = tempdir().unwrap();
        touch(temp.path(), &["index.md", "1-architecture.md", "2-client-api.md"]);

        let slugs = derive_slugs(temp.path()).unwrap();

        assert_eq!(as_strings(&slugs), vec!["1-architecture", "2-client-api"]);
    }

    #[test]
    fn keeps_one_slug_per_file() {
        let temp = tempdir().unwrap();
        let names = ["alpha.md", "beta.mdx", "gamma.html", "delta.v2.md"];
        touch(temp.path(), &names);

        let slugs = derive_slugs(temp.path()).unwrap();

        assert_eq!(slugs.len(), names.len());
        assert_eq!(
            as_strings(&slugs),
            vec!["alpha", "beta", "delta.v2", "gamma"]
        );
    }

    #[test]
    fn excludes_index_in_any_case() {
        let temp = tempdir().unwrap();
        touch(temp.path(), &["Index.md", "INDEX.HTML", "post.md"]);

        let slugs = derive_slugs(temp.path()).unwrap();

        assert_eq!(as_strings(&slugs), vec!["post"]);
    }

    #[test]
    fn preserves_output_case() {
        let temp = tempdir().unwrap();
        touch(temp.path(), &["Kubernetes-Limits.md"]);

        let slugs = derive_slugs(temp.path()).unwrap();

        assert_eq!(as_strings(&slugs), vec!["Kubernetes-Limits"]);
    }

    #[test]
    fn preserves_internal_dots() {
        let temp = tempdir().unwrap();
        touch(temp.path(), &["2.client-api.md"]);

        let slugs = derive_slugs(temp.path()).unwrap();

        assert_eq!(as_strings(&slugs), vec!["2.client-api"]);
    }

    #[test]
    fn excludes_names_without_extension() {
        let temp = tempdir().unwrap();
        touch(temp.path(), &["LICENSE", ".gitignore", "post.md"]);

        let slugs = derive_slugs(temp.path()).unwrap();

        assert_eq!(as_strings(&slugs), vec!["post"]);
    }

    #[test]
    fn treats_subdirectories_as_names() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("kubernetes")).unwrap();
        fs::create_dir(temp.path().join("v1.2")).unwrap();

        let entries = derive_entries(temp.path()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug, "v1");
        assert_eq!(entries[0].file_name, "v1.2");
        assert!(entries[0].is_dir);
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let temp = tempdir().unwrap();

        let slugs = derive_slugs(temp.path()).unwrap();

        assert!(slugs.is_empty());
    }

    #[test]
    fn missing_directory_is_not_found() {
        let temp = tempdir().unwrap();

        let result = derive_slugs(&temp.path().join("missing"));

        assert!(matches!(result, Err(SlugError::DirectoryNotFound { .. })));
    }

    #[test]
    fn regular_file_is_not_found() {
        let temp = tempdir().unwrap();
        touch(temp.path(), &["post.md"]);

        let result = derive_slugs(&temp.path().join("post.md"));

        assert!(matches!(result, Err(SlugError::DirectoryNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        touch(&locked, &["post.md"]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root bypasses permission checks
        let readable = fs::read_dir(&locked).is_ok();
        let result = derive_slugs(&locked);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        match result {
            Err(SlugError::PermissionDenied { path }) => assert_eq!(path, locked),
            other => panic!("expected permission denied, got {:?}", other),
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let temp = tempdir().unwrap();
        touch(temp.path(), &["c.md", "a.md", "b.md", "index.md"]);

        let first = derive_slugs(temp.path()).unwrap();
        let second = derive_slugs(temp.path()).unwrap();

        assert_eq!(first, second);
    }
}
