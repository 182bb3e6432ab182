//! Asset pipeline for CSS and JavaScript processing.

use crate::theme::Theme;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file: theme variables followed by the layout.
    pub fn generate_css(theme: &Theme) -> String {
        let mut css = theme.to_css();
        css.push('\n');
        css.push_str(LAYOUT_CSS);
        css
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const LAYOUT_CSS: &str = r#":root {
  --navbar-height: 3.5rem;
  --sidebar-width: 280px;
  --toc-width: 200px;
  --content-max-width: 760px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

/* Navbar */
.navbar {
  position: sticky;
  top: 0;
  z-index: 20;
  display: flex;
  align-items: center;
  gap: 1.5rem;
  height: var(--navbar-height);
  padding: 0 1.5rem;
  background: var(--background);
  border-bottom: 1px solid var(--border);
}

.nav-logo {
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--foreground);
  text-decoration: none;
}

.nav-links {
  margin-left: auto;
  display: flex;
  align-items: center;
  gap: 1.25rem;
}

.nav-links a {
  color: var(--foreground);
  text-decoration: none;
}

.nav-links a.active,
.nav-links a:hover {
  color: var(--primary);
}

.search-box {
  padding: 0.35rem 0.75rem;
  border: 1px solid var(--border);
  border-radius: 999px;
  background: var(--card);
  color: var(--foreground);
}

.search-results {
  position: absolute;
  top: var(--navbar-height);
  list-style: none;
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 0.375rem;
  min-width: 16rem;
}

.search-results:empty {
  display: none;
}

.search-results a {
  display: block;
  padding: 0.5rem 0.75rem;
  color: var(--foreground);
  text-decoration: none;
}

.theme-toggle {
  background: none;
  border: none;
  color: var(--foreground);
  cursor: pointer;
  font-size: 1.1rem;
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: calc(100vh - var(--navbar-height));
}

/* Sidebar */
.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: var(--navbar-height);
  height: calc(100vh - var(--navbar-height));
  overflow-y: auto;
}

.nav-list,
.nav-children {
  list-style: none;
}

.nav-children {
  margin-left: 1rem;
  margin-top: 0.25rem;
}

.nav-item {
  margin-bottom: 0.25rem;
}

.nav-item a {
  display: block;
  padding: 0.4rem 0.75rem;
  color: var(--muted-foreground);
  text-decoration: none;
  border-radius: 0.375rem;
  transition: background 0.15s, color 0.15s;
}

.nav-section > a {
  font-weight: 600;
  color: var(--foreground);
}

.nav-item a:hover {
  background: var(--accent);
  color: var(--accent-foreground);
}

.nav-item.active:not(.nav-section) > a {
  background: var(--primary);
  color: var(--primary-foreground);
}

/* Main content */
.main {
  display: grid;
  grid-template-columns: 1fr var(--toc-width);
  gap: 2rem;
  padding: 2rem;
  max-width: calc(var(--content-max-width) + var(--toc-width) + 4rem);
}

.doc,
.page,
.blog {
  max-width: var(--content-max-width);
}

.content h1 {
  font-size: 2.25rem;
  font-weight: 700;
  margin-bottom: 1.5rem;
}

.content h2 {
  font-size: 1.5rem;
  font-weight: 600;
  margin: 2rem 0 1rem;
  padding-bottom: 0.5rem;
  border-bottom: 1px solid var(--border);
}

.content h3 {
  font-size: 1.25rem;
  font-weight: 600;
  margin: 1.5rem 0 0.75rem;
}

.content p,
.content ul,
.content ol,
.content table {
  margin-bottom: 1rem;
}

.content li {
  margin-left: 1.5rem;
}

.content a {
  color: var(--primary);
  text-underline-offset: 4px;
}

.content a:hover {
  color: var(--primary-hover);
}

.content img {
  max-width: 100%;
}

.content pre {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 0.5rem;
  padding: 1rem;
  overflow-x: auto;
  font-family: ui-monospace, monospace;
  font-size: 0.875rem;
  margin-bottom: 1rem;
}

.content code {
  font-family: ui-monospace, monospace;
  font-size: 0.875em;
  background: var(--muted);
  padding: 0.125rem 0.375rem;
  border-radius: 0.25rem;
}

.content pre code {
  background: none;
  padding: 0;
  color: var(--card-foreground);
}

.content table {
  border-collapse: collapse;
}

.content th,
.content td {
  border: 1px solid var(--border);
  padding: 0.4rem 0.75rem;
}

/* Blog listing */
.blog-section {
  margin-top: 2rem;
}

.blog-section h2 {
  font-size: 1.35rem;
  margin-bottom: 0.75rem;
}

.blog-list {
  list-style: none;
}

.blog-list li {
  margin-bottom: 1rem;
}

.blog-list a {
  color: var(--primary);
  font-weight: 600;
  text-decoration: none;
}

.blog-list time,
.meta time {
  margin-left: 0.5rem;
  color: var(--muted-foreground);
  font-size: 0.875rem;
}

.tag {
  display: inline-block;
  margin-left: 0.5rem;
  padding: 0 0.5rem;
  border-radius: 999px;
  background: var(--accent);
  color: var(--accent-foreground);
  font-size: 0.75rem;
}

.meta {
  margin-bottom: 1rem;
}

.page-nav {
  display: flex;
  justify-content: space-between;
  margin-top: 3rem;
  padding-top: 1rem;
  border-top: 1px solid var(--border);
}

.page-nav a {
  color: var(--primary);
  text-decoration: none;
}

.page-nav .next {
  margin-left: auto;
}

/* Table of contents */
.toc {
  position: sticky;
  top: calc(var(--navbar-height) + 2rem);
  align-self: start;
}

.toc h2 {
  font-size: 0.75rem;
  font-weight: 600;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--muted-foreground);
  margin-bottom: 0.75rem;
}

.toc ul {
  list-style: none;
}

.toc a {
  font-size: 0.875rem;
  color: var(--muted-foreground);
  text-decoration: none;
}

.toc a:hover {
  color: var(--foreground);
}

.toc-level-3 {
  padding-left: 1rem;
}

.toc-level-4 {
  padding-left: 2rem;
}

.toc-level-5 {
  padding-left: 3rem;
}

.back-to-top {
  position: fixed;
  right: 1.5rem;
  bottom: 1.5rem;
  display: none;
  padding: 0.5rem 0.75rem;
  border-radius: 999px;
  background: var(--primary);
  color: var(--primary-foreground);
  text-decoration: none;
}

.back-to-top.visible {
  display: block;
}

.menu-btn {
  display: none;
  position: fixed;
  bottom: 1.5rem;
  left: 1.5rem;
  z-index: 100;
  padding: 0.5rem;
  background: var(--primary);
  color: var(--primary-foreground);
  border: none;
  border-radius: 0.375rem;
  cursor: pointer;
}

@media (max-width: 1024px) {
  .layout {
    grid-template-columns: 1fr;
  }

  .sidebar {
    position: fixed;
    left: -100%;
    z-index: 50;
    transition: left 0.3s;
    width: var(--sidebar-width);
  }

  .sidebar.open {
    left: 0;
  }

  .main {
    grid-template-columns: 1fr;
  }

  .toc {
    display: none;
  }

  .menu-btn {
    display: block;
  }
}
"#;

const DEFAULT_JS: &str = r#"(function() {
  'use strict';

  const body = document.body;
  const baseUrl = body.dataset.baseUrl || '/';
  const darkClass = body.dataset.darkClass;
  const root = document.documentElement;

  // Dark mode, remembered across pages
  if (darkClass) {
    if (localStorage.getItem('theme') === 'dark') {
      root.classList.add(darkClass);
    }
    const toggle = document.querySelector('.theme-toggle');
    if (toggle) {
      toggle.addEventListener('click', () => {
        const dark = root.classList.toggle(darkClass);
        localStorage.setItem('theme', dark ? 'dark' : 'light');
      });
    }
  }

  // Mobile menu toggle
  const menuBtn = document.querySelector('.menu-btn');
  const sidebar = document.querySelector('.sidebar');
  if (menuBtn && sidebar) {
    menuBtn.addEventListener('click', () => {
      sidebar.classList.toggle('open');
    });
  }

  // Back to top
  const backToTop = document.querySelector('.back-to-top');
  if (backToTop) {
    window.addEventListener('scroll', () => {
      backToTop.classList.toggle('visible', window.scrollY > 300);
    });
    backToTop.addEventListener('click', (event) => {
      event.preventDefault();
      window.scrollTo({ top: 0, behavior: 'smooth' });
    });
  }

  // Search over the generated index
  const box = document.querySelector('.search-box');
  const results = document.querySelector('.search-results');
  let index = null;

  function render(query) {
    results.innerHTML = '';
    if (!query || !index) return;
    const needle = query.toLowerCase();
    index
      .filter(page => (page.title + ' ' + page.description + ' ' + page.content)
        .toLowerCase()
        .includes(needle))
      .slice(0, 8)
      .forEach(page => {
        const item = document.createElement('li');
        const link = document.createElement('a');
        link.href = page.url;
        link.textContent = page.title || page.url;
        item.appendChild(link);
        results.appendChild(item);
      });
  }

  if (box && results) {
    box.addEventListener('input', () => {
      const query = box.value.trim();
      if (index) {
        render(query);
        return;
      }
      fetch(baseUrl + 'search-index.json')
        .then(response => response.json())
        .then(data => {
          index = data;
          render(box.value.trim());
        })
        .catch(() => {});
    });
  }
})();
"#;
