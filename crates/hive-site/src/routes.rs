//! Route table mapping URL paths to views.
//!
//! Four routes are fixed; every article in the content index adds one more
//! below `/article/`.

use std::path::{Path, PathBuf};

use hive_content::ContentIndex;
use serde::Serialize;

/// Page kind a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    About,
    BlogList,
    Article,
}

/// A single route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// URL path below the base URL, with leading and trailing `/`
    pub path: String,
    pub name: String,
    pub view: View,
    /// Content index key of the article, for article routes
    pub article: Option<String>,
}

impl Route {
    fn fixed(path: &str, name: &str, view: View) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view,
            article: None,
        }
    }

    /// Output file for this route under `output_dir`.
    pub fn output_file(&self, output_dir: &Path) -> PathBuf {
        let relative = self.path.trim_matches('/');
        if relative.is_empty() {
            output_dir.join("index.html")
        } else {
            output_dir.join(relative).join("index.html")
        }
    }
}

/// All routes of the site, in declaration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    base_url: String,
    routes: Vec<Route>,
}

/// URL path of an article route.
pub fn article_path(key: &str) -> String {
    format!("/article/{}/", key.trim_matches('/'))
}

impl RouteTable {
    pub fn new(base_url: &str, index: &ContentIndex) -> Self {
        let mut routes = vec![
            Route::fixed("/", "home", View::Home),
            Route::fixed("/about/", "about", View::About),
            Route::fixed("/blog/", "blog", View::BlogList),
            Route::fixed("/article/", "article", View::Article),
        ];

        routes.extend(index.articles().iter().map(|article| {
            let key = article.key();
            Route {
                path: article_path(&key),
                name: format!("article:{}", key),
                view: View::Article,
                article: Some(key),
            }
        }));

        Self {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            routes,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route for a request path.
    ///
    /// The base URL prefix and the trailing slash are optional.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path
            .strip_prefix(self.base_url.trim_end_matches('/'))
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(path);

        let trimmed = path.trim_matches('/');
        let normalized = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };

        self.routes.iter().find(|r| r.path == normalized)
    }

    /// Absolute URL of a route including the base URL.
    pub fn url(&self, route: &Route) -> String {
        self.url_for_path(&route.path)
    }

    pub fn url_for_path(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}
