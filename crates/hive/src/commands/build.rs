//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use hive_site::{SiteBuilder, SiteConfig};

/// Run the build command.
pub fn run(
    root: &Path,
    config_path: &Path,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let mut config = SiteConfig::load(config_path)?;
    if let Some(output) = output {
        config.content.output = output;
    }
    if let Some(minify) = minify {
        config.build.minify = minify;
    }

    let result = SiteBuilder::new(config, root)?.build()?;

    tracing::info!(
        "Built {} pages from {} articles in {}ms",
        result.pages,
        result.articles,
        result.duration_ms
    );

    if let Some(drift) = &result.drift {
        if !drift.is_clean() {
            tracing::warn!(
                "Article list is out of sync with the files on disk; run 'hive check' for details"
            );
        }
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
