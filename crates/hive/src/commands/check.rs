//! Compare the hand-maintained article list against the content on disk.

use std::path::Path;

use anyhow::Result;
use hive_site::{SiteBuilder, SiteConfig};

/// Run the check command.
///
/// Fails when the configured `articles` list disagrees with the scan.
pub fn run(root: &Path, config_path: &Path) -> Result<()> {
    let config = SiteConfig::load(config_path)?;
    let builder = SiteBuilder::new(config, root)?;

    let (index, drift) = builder.scan()?;
    tracing::info!(
        "Found {} articles under {}",
        index.len(),
        index.blog_root().display()
    );

    let Some(drift) = drift else {
        tracing::info!("No article list configured; the files on disk are the only source");
        return Ok(());
    };

    for path in &drift.missing_on_disk {
        tracing::error!("Listed but missing on disk: {}", path);
    }
    for path in &drift.unlisted {
        tracing::error!("On disk but not listed: {}", path);
    }

    if !drift.is_clean() {
        anyhow::bail!(
            "{} listed articles missing, {} articles unlisted",
            drift.missing_on_disk.len(),
            drift.unlisted.len()
        );
    }

    tracing::info!("Article list matches the files on disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site(articles: &str) -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        let post = temp.path().join("content/articles/meta/hello-world.md");
        fs::create_dir_all(post.parent().unwrap()).unwrap();
        fs::write(&post, "# Hello\n").unwrap();
        fs::write(
            temp.path().join("site.toml"),
            format!("[content]\narticles = {}\n", articles),
        )
        .unwrap();
        temp
    }

    #[test]
    fn matching_list_passes() {
        let temp = site(r#"["articles/meta/hello-world.md"]"#);

        run(temp.path(), &temp.path().join("site.toml")).unwrap();
    }

    #[test]
    fn missing_listed_article_fails() {
        let temp = site(r#"["articles/meta/hello-world.md", "articles/meta/gone.md"]"#);

        let err = run(temp.path(), &temp.path().join("site.toml")).unwrap_err();

        assert!(err.to_string().contains("1 listed articles missing"));
    }

    #[test]
    fn unlisted_article_fails() {
        let temp = site("[]");

        let err = run(temp.path(), &temp.path().join("site.toml")).unwrap_err();

        assert!(err.to_string().contains("1 articles unlisted"));
    }

    #[test]
    fn no_list_passes() {
        let temp = site("[]");
        fs::write(temp.path().join("site.toml"), "").unwrap();

        run(temp.path(), &temp.path().join("site.toml")).unwrap();
    }
}
