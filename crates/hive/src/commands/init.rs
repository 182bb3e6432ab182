//! Scaffold a new site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Files written by `init`, relative to the site root.
const SCAFFOLD: &[(&str, &str)] = &[
    ("content/index.md", DEFAULT_HOME),
    ("content/about.md", DEFAULT_ABOUT),
    ("content/articles/index.md", DEFAULT_BLOG_INDEX),
    ("content/articles/meta/hello-world.md", DEFAULT_ARTICLE),
];

/// Run the init command.
pub fn run(root: &Path, config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing site in {}...", root.display());

    let content_dir = root.join("content");
    if content_dir.exists() && !yes {
        tracing::warn!("content/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    for (relative, content) in SCAFFOLD {
        let path = root.join(relative);
        if path.exists() && !yes {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", relative))?;
        tracing::info!("Created {}", relative);
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'hive build' to generate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r##"# hive configuration

[site]
title = "My Site"
description = "Notes, projects and articles"
base_url = "/"
# hostname = "https://example.github.io"
# repo = "owner/name"

[content]
# Source directory for pages
dir = "content"
# Blog root, relative to the content directory
blog_dir = "articles"
# Output directory for the built site
output = "dist"

[navigation]
links = [
  { text = "Projects", link = "/about/" },
  { text = "Blog", link = "/blog/" },
]
sidebar_depth = 4
prev_next_links = true
search_placeholder = "Search..."

[theme]
primary = "teal"
surface = "zinc"
dark_mode_selector = ".app-dark"

[build]
minify = true
"##;

const DEFAULT_HOME: &str = r#"---
title: Home
---

# Welcome

This site is built with **hive**. Articles live under `content/articles/`;
each subdirectory becomes a section in the sidebar.
"#;

const DEFAULT_ABOUT: &str = r#"# Projects

A place to describe your projects and experience.
"#;

const DEFAULT_BLOG_INDEX: &str = r#"# Blog

Everything written so far.
"#;

const DEFAULT_ARTICLE: &str = r#"---
title: Hello, World
description: The first article
date: 2024-01-01
tags: [meta]
---

# Hello, World

Add markdown files next to this one and they show up in the sidebar and the
blog listing on the next build. The file name, minus its extension, becomes
the article's URL.

## Ordering

Set `order` in the frontmatter to move an article up or down within its
section. Set `nav: false` to keep it out of the sidebar.
"#;
