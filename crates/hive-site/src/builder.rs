//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;

use hive_content::{
    parse_article, Article, ArticleRef, ContentIndex, Drift, IndexError, TocEntry,
};

use crate::assets::AssetPipeline;
use crate::config::{ConfigError, SiteConfig};
use crate::navigation::{
    build_sidebar, mark_active, neighbours, section_anchor, section_title, top_links,
    ArticleEntry, NavItem,
};
use crate::routes::{article_path, Route, RouteTable, View};
use crate::templates::{BlogListing, BlogSection, Context, TemplateEngine};
use crate::theme::Theme;

const PAGE_EXTENSIONS: &[&str] = &["md", "markdown", "mdx"];
const EXCERPT_CHARS: usize = 300;

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of HTML pages written
    pub pages: usize,

    /// Number of articles found under the blog root
    pub articles: usize,

    /// Drift against the hand-maintained article list, if one is configured
    pub drift: Option<Drift>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to index content: {0}")]
    Index(#[from] IndexError),

    #[error("Failed to read content: {0}")]
    ReadError(String),

    #[error("Failed to parse article: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// An article ready to render.
#[derive(Debug)]
struct PageInfo {
    reference: ArticleRef,
    article: Article,
    title: String,
    url: String,
}

/// Static site builder.
pub struct SiteBuilder {
    config: SiteConfig,
    root: PathBuf,
    theme: Theme,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a builder for the site rooted at `root`.
    ///
    /// Relative content and output paths in `config` resolve against `root`.
    pub fn new(config: SiteConfig, root: impl Into<PathBuf>) -> Result<Self, BuildError> {
        let theme = Theme::from_config(&config)?;

        Ok(Self {
            config,
            root: root.into(),
            theme,
            templates: TemplateEngine::new(),
        })
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.config.content.dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.content.output)
    }

    /// Scan the blog root and compare against the configured article list.
    pub fn scan(&self) -> Result<(ContentIndex, Option<Drift>), BuildError> {
        let index = ContentIndex::scan(&self.content_dir(), &self.config.content.blog_dir)?;
        let drift = self
            .config
            .content
            .articles
            .as_ref()
            .map(|manual| index.reconcile(manual));
        Ok((index, drift))
    }

    /// Build the static site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let output_dir = self.output_dir();

        fs::create_dir_all(&output_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let (index, drift) = self.scan()?;
        if let Some(drift) = &drift {
            for path in &drift.missing_on_disk {
                tracing::warn!("Listed article not found on disk: {}", path);
            }
            for path in &drift.unlisted {
                tracing::warn!("Article missing from the configured list: {}", path);
            }
        }

        let routes = RouteTable::new(&self.config.site.base_url, &index);
        let pages = self.load_articles(&index, &routes)?;

        let entries: Vec<ArticleEntry> = pages
            .iter()
            .map(|page| ArticleEntry {
                key: page.reference.key(),
                section: page.reference.section.clone(),
                title: page.title.clone(),
                url: page.url.clone(),
                order: page.article.order(),
                in_nav: page.article.in_nav(),
            })
            .collect();

        let sidebar = build_sidebar(
            &entries,
            self.config.navigation.sidebar_depth,
            &routes.url_for_path("/blog/"),
        );

        let mut search = Vec::new();
        let mut written = 0;

        for route in routes.routes() {
            let rendered = match route.view {
                View::Home => self.render_home(&routes, route, &sidebar, &mut search)?,
                View::About => self.render_about(&routes, route, &sidebar, &mut search)?,
                View::BlogList => self.render_blog(&routes, route, &sidebar, &pages)?,
                View::Article => {
                    let Some(page) = route
                        .article
                        .as_deref()
                        .and_then(|key| pages.iter().find(|p| p.reference.key() == key))
                    else {
                        tracing::debug!("No page to render for route {}", route.path);
                        continue;
                    };
                    search.push(search_entry(
                        &page.title,
                        page.article.description(),
                        &page.url,
                        &page.article.content,
                    ));
                    self.render_article(page, &sidebar)?
                }
            };

            let output_path = route.output_file(&output_dir);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }
            fs::write(&output_path, rendered).map_err(|e| BuildError::WriteError(e.to_string()))?;
            tracing::debug!("Wrote {}", output_path.display());
            written += 1;
        }

        self.generate_assets(&output_dir)?;
        self.generate_search_index(&output_dir, &search)?;
        self.generate_sitemap(&output_dir, &routes)?;

        Ok(BuildResult {
            pages: written,
            articles: index.len(),
            drift,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir,
        })
    }

    /// Read and parse every indexed article.
    fn load_articles(
        &self,
        index: &ContentIndex,
        routes: &RouteTable,
    ) -> Result<Vec<PageInfo>, BuildError> {
        index
            .articles()
            .iter()
            .map(|reference| {
                let article = read_article(&reference.source)?;
                let title = article
                    .title()
                    .map(str::to_string)
                    .unwrap_or_else(|| reference.slug.to_string());
                let url = routes.url_for_path(&article_path(&reference.key()));

                Ok(PageInfo {
                    reference: reference.clone(),
                    article,
                    title,
                    url,
                })
            })
            .collect()
    }

    /// Base context shared by every page.
    fn context(&self, title: String, url: &str, sidebar: &[NavItem]) -> Context {
        let base_url = self.config.base_url();

        let mut sidebar = sidebar.to_vec();
        mark_active(&mut sidebar, url);

        Context {
            title,
            site_title: self.config.site.title.clone(),
            site_description: self.config.site.description.clone(),
            links: top_links(&self.config.navigation.links, &base_url, url),
            base_url,
            head: self.config.site.head.clone(),
            sidebar,
            repo_url: self.config.repo_url(),
            search_placeholder: self.config.navigation.search_placeholder.clone(),
            dark_mode_class: self
                .theme
                .dark_mode_selector
                .strip_prefix('.')
                .filter(|class| !class.contains([' ', '.', '#', ':', '[']))
                .unwrap_or_default()
                .to_string(),
            ..Default::default()
        }
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, BuildError> {
        self.templates
            .render_page(template, context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))
    }

    /// Render a standalone page (`index.md`, `about.md`) from the content dir.
    fn render_standalone(
        &self,
        stem: &str,
        fallback_title: &str,
        routes: &RouteTable,
        route: &Route,
        sidebar: &[NavItem],
        search: &mut Vec<serde_json::Value>,
    ) -> Result<String, BuildError> {
        let url = routes.url(route);
        let article = read_optional(&self.content_dir(), stem)?;

        let title = article
            .as_ref()
            .and_then(|a| a.title())
            .unwrap_or(fallback_title)
            .to_string();

        let mut context = self.context(title.clone(), &url, sidebar);
        if let Some(article) = &article {
            context.content = article.render_html();
            search.push(search_entry(&title, article.description(), &url, &article.content));
        }

        self.render("page.html", &context)
    }

    fn render_home(
        &self,
        routes: &RouteTable,
        route: &Route,
        sidebar: &[NavItem],
        search: &mut Vec<serde_json::Value>,
    ) -> Result<String, BuildError> {
        let title = self.config.site.title.clone();
        self.render_standalone("index", &title, routes, route, sidebar, search)
    }

    fn render_about(
        &self,
        routes: &RouteTable,
        route: &Route,
        sidebar: &[NavItem],
        search: &mut Vec<serde_json::Value>,
    ) -> Result<String, BuildError> {
        self.render_standalone("about", "About", routes, route, sidebar, search)
    }

    fn render_blog(
        &self,
        routes: &RouteTable,
        route: &Route,
        sidebar: &[NavItem],
        pages: &[PageInfo],
    ) -> Result<String, BuildError> {
        let url = routes.url(route);
        let intro = read_optional(&self.config.blog_root(&self.root), "index")?;

        let title = intro
            .as_ref()
            .and_then(|a| a.title())
            .unwrap_or("Blog")
            .to_string();

        let mut context = self.context(title, &url, sidebar);
        context.content = intro.map(|a| a.render_html()).unwrap_or_default();
        context.sections = blog_sections(pages);

        self.render("blog.html", &context)
    }

    fn render_article(&self, page: &PageInfo, sidebar: &[NavItem]) -> Result<String, BuildError> {
        let mut context = self.context(page.title.clone(), &page.url, sidebar);

        context.content = page.article.render_html();
        context.toc = toc_within_depth(&page.article.toc, self.config.navigation.sidebar_depth);

        if let Some(fm) = &page.article.frontmatter {
            context.date = fm.date.clone();
            context.tags = fm.tags.clone();
        }

        if self.config.navigation.prev_next_links {
            let (prev, next) = neighbours(sidebar, &page.url);
            context.prev = prev;
            context.next = next;
        }

        self.render("article.html", &context)
    }

    /// Generate static assets.
    fn generate_assets(&self, output_dir: &Path) -> Result<(), BuildError> {
        let assets_dir = output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css(&self.theme);
        let css = if self.config.build.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Keeping unminified CSS: {}", e);
                css
            })
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(
        &self,
        output_dir: &Path,
        entries: &[serde_json::Value],
    ) -> Result<(), BuildError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, output_dir: &Path, routes: &RouteTable) -> Result<(), BuildError> {
        // The bare `/article/` route has no page of its own
        let urls: Vec<String> = routes
            .routes()
            .iter()
            .filter(|r| r.view != View::Article || r.article.is_some())
            .map(|r| {
                format!(
                    "  <url>\n    <loc>{}</loc>\n  </url>",
                    self.config.absolute_url(&routes.url(r))
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}",
            self.config
                .absolute_url(&format!("{}sitemap.xml", self.config.base_url()))
        );
        fs::write(output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

fn read_article(path: &Path) -> Result<Article, BuildError> {
    let source = fs::read_to_string(path)
        .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

    parse_article(&source).map_err(|e| BuildError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Read `dir/<stem>.<ext>` for the first markdown extension that exists.
fn read_optional(dir: &Path, stem: &str) -> Result<Option<Article>, BuildError> {
    for ext in PAGE_EXTENSIONS {
        let path = dir.join(format!("{}.{}", stem, ext));
        if path.is_file() {
            return read_article(&path).map(Some);
        }
    }
    tracing::debug!("No {} page in {}", stem, dir.display());
    Ok(None)
}

/// TOC entries shown next to an article: level 2 down to `depth + 1`.
fn toc_within_depth(toc: &[TocEntry], depth: usize) -> Vec<TocEntry> {
    toc.iter()
        .filter(|e| e.level >= 2 && usize::from(e.level) <= depth + 1)
        .cloned()
        .collect()
}

/// Group listed articles by section, emitting every ancestor section once.
fn blog_sections(pages: &[PageInfo]) -> Vec<BlogSection> {
    let mut sections: Vec<(Vec<String>, BlogSection)> = Vec::new();

    for page in pages.iter().filter(|p| p.article.in_nav()) {
        let segments = &page.reference.section;

        for len in 0..=segments.len() {
            let prefix = &segments[..len];
            if sections.iter().any(|(s, _)| s == prefix) {
                continue;
            }
            let title = prefix
                .iter()
                .map(|s| section_title(s))
                .collect::<Vec<_>>()
                .join(" / ");
            sections.push((
                prefix.to_vec(),
                BlogSection {
                    title,
                    anchor: section_anchor(prefix),
                    articles: Vec::new(),
                },
            ));
        }

        if let Some((_, section)) = sections.iter_mut().find(|(s, _)| s == segments) {
            section.articles.push(BlogListing {
                title: page.title.clone(),
                url: page.url.clone(),
                description: page.article.description().map(str::to_string),
                date: page.article.frontmatter.as_ref().and_then(|f| f.date.clone()),
            });
        }
    }

    // The root section only shows up when articles sit directly in the blog root
    sections
        .into_iter()
        .map(|(_, section)| section)
        .filter(|s| !s.title.is_empty() || !s.articles.is_empty())
        .collect()
}

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid regex"));
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s*|[*_`~>|]").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip markdown syntax down to searchable plain text.
fn plain_text(markdown: &str) -> String {
    let text = CODE_FENCE.replace_all(markdown, " ");
    let text = IMAGE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = MARKUP.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

fn search_entry(
    title: &str,
    description: Option<&str>,
    url: &str,
    markdown: &str,
) -> serde_json::Value {
    let content: String = plain_text(markdown).chars().take(EXCERPT_CHARS).collect();

    serde_json::json!({
        "title": title,
        "description": description.unwrap_or_default(),
        "url": url,
        "content": content,
    })
}
