//! Template engine for rendering site pages.

use minijinja::Environment;
use serde::Serialize;

use hive_content::TocEntry;

use crate::config::MetaTag;
use crate::navigation::{NavItem, PageLink, TopLink};

/// One article in the blog listing.
#[derive(Debug, Clone, Serialize)]
pub struct BlogListing {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// A section of the blog listing.
#[derive(Debug, Clone, Serialize)]
pub struct BlogSection {
    /// Section title, empty for articles directly under the blog root
    pub title: String,
    pub anchor: String,
    pub articles: Vec<BlogListing>,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    pub site_description: String,
    /// Base URL
    pub base_url: String,
    pub head: Vec<MetaTag>,
    /// Rendered content HTML
    pub content: String,
    /// Top navigation links
    pub links: Vec<TopLink>,
    /// Sidebar tree
    pub sidebar: Vec<NavItem>,
    /// Table of contents
    pub toc: Vec<TocEntry>,
    pub prev: Option<PageLink>,
    pub next: Option<PageLink>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    /// Blog listing sections (blog page only)
    pub sections: Vec<BlogSection>,
    pub repo_url: Option<String>,
    pub search_placeholder: String,
    /// Class toggled on `<html>` for dark mode, empty when not a class selector
    pub dark_mode_class: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("nav.html", NAV_TEMPLATE),
            ("page.html", PAGE_TEMPLATE),
            ("blog.html", BLOG_TEMPLATE),
            ("article.html", ARTICLE_TEMPLATE),
        ] {
            env.add_template(name, source)
                .unwrap_or_else(|e| panic!("Failed to add {} template: {}", name, e));
        }

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(&self, template: &str, context: &Context) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  {% if site_description %}<meta name="description" content="{{ site_description }}">
  {% endif %}{% for tag in head %}<meta name="{{ tag.name }}" content="{{ tag.content }}">
  {% endfor %}<title>{% if title and title != site_title %}{{ title }} | {% endif %}{{ site_title }}</title>
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body data-base-url="{{ base_url }}" data-dark-class="{{ dark_mode_class }}">
  <header class="navbar">
    <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
    <input class="search-box" type="search" placeholder="{{ search_placeholder }}" aria-label="{{ search_placeholder }}">
    <ul class="search-results"></ul>
    <nav class="nav-links">
      {% for link in links %}<a href="{{ link.link }}"{% if link.active %} class="active"{% endif %}>{{ link.text }}</a>
      {% endfor %}{% if repo_url %}<a href="{{ repo_url }}" class="repo-link">GitHub</a>{% endif %}
      {% if dark_mode_class %}<button type="button" class="theme-toggle" aria-label="Toggle dark mode">&#9680;</button>{% endif %}
    </nav>
  </header>
  <div class="layout">
    <aside class="sidebar">
      {% include "nav.html" %}
    </aside>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <button type="button" class="menu-btn" aria-label="Toggle sidebar">&#9776;</button>
  <a href="#" class="back-to-top" aria-label="Back to top">&#8593;</a>
  <script src="{{ base_url }}assets/main.js"></script>
</body>
</html>"##;

const NAV_TEMPLATE: &str = r##"<ul class="nav-list">
{% for item in sidebar recursive %}
  <li class="nav-item{% if item.children %} nav-section{% endif %}{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
    {% if item.children %}
    <ul class="nav-children">{{ loop(item.children) }}</ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="page">
  <div class="content">
    {{ content | safe }}
  </div>
</article>
{% endblock %}"##;

const BLOG_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="blog">
  <div class="content">
    {{ content | safe }}
  </div>
  {% for section in sections %}
  <section class="blog-section" id="{{ section.anchor }}">
    {% if section.title %}<h2>{{ section.title }}</h2>{% endif %}
    <ul class="blog-list">
    {% for article in section.articles %}
      <li>
        <a href="{{ article.url }}">{{ article.title }}</a>
        {% if article.date %}<time>{{ article.date }}</time>{% endif %}
        {% if article.description %}<p>{{ article.description }}</p>{% endif %}
      </li>
    {% endfor %}
    </ul>
  </section>
  {% else %}
  <p class="empty">No articles yet.</p>
  {% endfor %}
</article>
{% endblock %}"##;

const ARTICLE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  {% if date or tags %}
  <div class="meta">
    {% if date %}<time>{{ date }}</time>{% endif %}
    {% for tag in tags %}<span class="tag">{{ tag }}</span>{% endfor %}
  </div>
  {% endif %}
  <div class="content">
    {{ content | safe }}
  </div>
  {% if prev or next %}
  <nav class="page-nav">
    {% if prev %}<a class="prev" href="{{ prev.url }}">&larr; {{ prev.title }}</a>{% endif %}
    {% if next %}<a class="next" href="{{ next.url }}">{{ next.title }} &rarr;</a>{% endif %}
  </nav>
  {% endif %}
</article>

{% if toc %}
<aside class="toc">
  <h2>On this page</h2>
  <ul>
  {% for entry in toc %}
    <li class="toc-level-{{ entry.level }}">
      <a href="#{{ entry.id }}">{{ entry.title }}</a>
    </li>
  {% endfor %}
  </ul>
</aside>
{% endif %}
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn context(title: &str) -> Context {
        Context {
            title: title.to_string(),
            site_title: "Queue Bee Co.".to_string(),
            base_url: "/".to_string(),
            search_placeholder: "Search...".to_string(),
            dark_mode_class: "app-dark".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();

        let mut ctx = context("About");
        ctx.content = "<p>Hello world</p>".to_string();
        ctx.head = vec![MetaTag {
            name: "theme-color".to_string(),
            content: "#3eaf7c".to_string(),
        }];

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(html.contains("<title>About | Queue Bee Co.</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains(r##"<meta name="theme-color" content="#3eaf7c">"##));
        assert!(html.contains(r#"placeholder="Search...""#));
        assert!(html.contains("theme-toggle"));
    }

    #[test]
    fn renders_nested_sidebar() {
        let engine = TemplateEngine::new();

        let mut ctx = context("Home");
        ctx.sidebar = vec![NavItem {
            title: "Game Dev".to_string(),
            path: "/blog/#section-game-dev".to_string(),
            children: vec![NavItem {
                title: "Subterfuge".to_string(),
                path: "/blog/#section-game-dev/subterfuge".to_string(),
                children: vec![NavItem {
                    title: "Choosing a Game Engine".to_string(),
                    path: "/article/game-dev/subterfuge/choosing-a-game-engine/".to_string(),
                    children: vec![],
                    active: true,
                }],
                active: true,
            }],
            active: true,
        }];

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(html.contains("Game Dev"));
        assert!(html.contains("Subterfuge"));
        assert!(html.contains("Choosing a Game Engine"));
        assert_eq!(html.matches("nav-children").count(), 2);
    }

    #[test]
    fn renders_article_with_neighbours() {
        let engine = TemplateEngine::new();

        let mut ctx = context("Client API");
        ctx.toc = vec![TocEntry {
            title: "Counters".to_string(),
            id: "counters".to_string(),
            level: 2,
        }];
        ctx.prev = Some(PageLink {
            title: "Architecture".to_string(),
            url: "/article/prometheus/1-architecture/".to_string(),
        });
        ctx.tags = vec!["prometheus".to_string()];

        let html = engine.render_page("article.html", &ctx).unwrap();

        assert!(html.contains(r##"<a href="#counters">Counters</a>"##));
        assert!(html.contains("&larr; Architecture"));
        assert!(!html.contains(r#"class="next""#));
        assert!(html.contains(r#"<span class="tag">prometheus</span>"#));
    }

    #[test]
    fn renders_empty_blog() {
        let engine = TemplateEngine::new();

        let html = engine.render_page("blog.html", &context("Blog")).unwrap();

        assert!(html.contains("No articles yet."));
    }

    #[test]
    fn escapes_titles() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page("page.html", &context("<script>alert(1)</script>"))
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
