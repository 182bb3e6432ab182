//! Print the slugs derived from an article directory.

use std::path::Path;

use anyhow::{Context, Result};
use hive_content::{derive_slugs, Slug};

/// Run the slugs command.
pub fn run(dir: &Path, json: bool) -> Result<()> {
    let slugs = derive_slugs(dir)?;

    println!("{}", render(&slugs, json)?);

    tracing::debug!("{} slugs in {}", slugs.len(), dir.display());

    Ok(())
}

/// One slug per line, or a JSON array of strings.
fn render(slugs: &[Slug], json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(slugs).context("Failed to serialize slugs")
    } else {
        Ok(slugs
            .iter()
            .map(Slug::as_str)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_content::SlugError;
    use std::fs;

    fn slugs_in(names: &[&str]) -> Vec<Slug> {
        let temp = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(temp.path().join(name), "").unwrap();
        }
        derive_slugs(temp.path()).unwrap()
    }

    #[test]
    fn prints_one_slug_per_line() {
        let slugs = slugs_in(&["2-client-api.md", "1-architecture.md", "index.md"]);

        assert_eq!(render(&slugs, false).unwrap(), "1-architecture\n2-client-api");
    }

    #[test]
    fn prints_json_array() {
        let slugs = slugs_in(&["2-client-api.md", "1-architecture.md", "index.md"]);

        let out = render(&slugs, true).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed, vec!["1-architecture", "2-client-api"]);
    }

    #[test]
    fn missing_directory_fails() {
        let temp = tempfile::tempdir().unwrap();

        let err = run(&temp.path().join("missing"), false).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SlugError>(),
            Some(SlugError::DirectoryNotFound { .. })
        ));
    }
}
