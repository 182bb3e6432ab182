//! Navigation bar and sidebar construction.

use serde::Serialize;

use crate::config::NavLink;

/// A sidebar item: a section with children, or an article leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page or contains it
    pub active: bool,
}

impl NavItem {
    fn leaf(title: String, path: String) -> Self {
        Self {
            title,
            path,
            children: Vec::new(),
            active: false,
        }
    }
}

/// A link in the top navigation bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopLink {
    pub text: String,
    pub link: String,
    pub active: bool,
}

/// Title and URL of a neighbouring page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLink {
    pub title: String,
    pub url: String,
}

/// What the sidebar needs to know about one article.
#[derive(Debug, Clone)]
pub struct ArticleEntry {
    pub key: String,
    pub section: Vec<String>,
    pub title: String,
    pub url: String,
    pub order: Option<i32>,
    pub in_nav: bool,
}

const DEFAULT_ORDER: i32 = 999;

#[derive(Default)]
struct SectionNode<'a> {
    segments: Vec<String>,
    items: Vec<&'a ArticleEntry>,
    children: Vec<SectionNode<'a>>,
}

impl<'a> SectionNode<'a> {
    fn insert(&mut self, path: &[String], entry: &'a ArticleEntry) {
        let Some((head, rest)) = path.split_first() else {
            self.items.push(entry);
            return;
        };

        let position = self
            .children
            .iter()
            .position(|c| c.segments.last() == Some(head));

        let child = match position {
            Some(i) => &mut self.children[i],
            None => {
                let mut segments = self.segments.clone();
                segments.push(head.clone());
                self.children.push(SectionNode {
                    segments,
                    ..Default::default()
                });
                let last = self.children.len() - 1;
                &mut self.children[last]
            }
        };

        child.insert(rest, entry);
    }

    fn into_items(mut self, section_base: &str) -> Vec<NavItem> {
        self.items
            .sort_by_key(|e| e.order.unwrap_or(DEFAULT_ORDER));

        let mut nav: Vec<NavItem> = self
            .items
            .iter()
            .map(|e| NavItem::leaf(e.title.clone(), e.url.clone()))
            .collect();

        for child in self.children {
            let title = child
                .segments
                .last()
                .map(|s| section_title(s))
                .unwrap_or_default();
            let path = format!("{}#{}", section_base, section_anchor(&child.segments));
            nav.push(NavItem {
                title,
                path,
                children: child.into_items(section_base),
                active: false,
            });
        }

        nav
    }
}

/// Build the sidebar tree from articles in index order.
///
/// Sections nested deeper than `depth` are folded into their deepest
/// allowed ancestor. Articles hidden from navigation are left out. Section
/// items link to `section_base` (the blog listing) with a section anchor.
pub fn build_sidebar(entries: &[ArticleEntry], depth: usize, section_base: &str) -> Vec<NavItem> {
    let mut root = SectionNode::default();

    for entry in entries.iter().filter(|e| e.in_nav) {
        let folded = &entry.section[..entry.section.len().min(depth)];
        root.insert(folded, entry);
    }

    root.into_items(section_base)
}

/// Article leaves of the sidebar in reading order.
pub fn flatten(nav: &[NavItem]) -> Vec<&NavItem> {
    let mut out = Vec::new();
    for item in nav {
        if item.children.is_empty() {
            out.push(item);
        } else {
            out.extend(flatten(&item.children));
        }
    }
    out
}

/// Previous and next articles around `url` in sidebar order.
pub fn neighbours(nav: &[NavItem], url: &str) -> (Option<PageLink>, Option<PageLink>) {
    let leaves = flatten(nav);
    let Some(pos) = leaves.iter().position(|i| i.path == url) else {
        return (None, None);
    };

    let link = |item: &NavItem| PageLink {
        title: item.title.clone(),
        url: item.path.clone(),
    };

    let prev = pos.checked_sub(1).map(|i| link(leaves[i]));
    let next = leaves.get(pos + 1).copied().map(link);
    (prev, next)
}

/// Mark the item at `url` and all of its ancestors active.
///
/// Returns whether anything in `nav` matched.
pub fn mark_active(nav: &mut [NavItem], url: &str) -> bool {
    let mut found = false;
    for item in nav.iter_mut() {
        let child_active = mark_active(&mut item.children, url);
        item.active = child_active || (item.children.is_empty() && item.path == url);
        found |= item.active;
    }
    found
}

/// Top navigation links with the one matching `url` marked active.
pub fn top_links(links: &[NavLink], base_url: &str, url: &str) -> Vec<TopLink> {
    links
        .iter()
        .map(|l| {
            let link = if l.link.starts_with("http://") || l.link.starts_with("https://") {
                l.link.clone()
            } else {
                format!(
                    "{}/{}",
                    base_url.trim_end_matches('/'),
                    l.link.trim_start_matches('/')
                )
            };
            let active = link != base_url && url.starts_with(&link);
            TopLink {
                text: l.text.clone(),
                link,
                active,
            }
        })
        .collect()
}

/// Human title for a section directory: `game-dev` -> `Game Dev`.
pub fn section_title(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Anchor id of a section on the blog listing page.
///
/// Segments are joined with `/`, which no directory name can contain, so
/// `game-dev` and `game/dev` get different anchors.
pub fn section_anchor(segments: &[String]) -> String {
    format!("section-{}", segments.join("/"))
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(key: &str, title: &str) -> ArticleEntry {
        let mut section: Vec<String> = key.split('/').map(String::from).collect();
        section.pop();
        ArticleEntry {
            key: key.to_string(),
            section,
            title: title.to_string(),
            url: format!("/article/{}/", key),
            order: None,
            in_nav: true,
        }
    }

    fn sample() -> Vec<ArticleEntry> {
        vec![
            entry("game-dev/subterfuge/choosing-a-game-engine", "Choosing a Game Engine"),
            entry("kubernetes/highly-available-disks", "Highly Available Disks"),
            entry("kubernetes/resources-stuck-terminating", "Stuck Terminating"),
            entry("prometheus/1-architecture", "Architecture"),
            entry("prometheus/2-client-api", "Client API"),
        ]
    }

    fn titles(nav: &[NavItem]) -> Vec<&str> {
        nav.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn groups_articles_by_section() {
        let nav = build_sidebar(&sample(), 4, "/blog/");

        assert_eq!(titles(&nav), vec!["Game Dev", "Kubernetes", "Prometheus"]);
        assert_eq!(nav[0].path, "/blog/#section-game-dev");
        assert_eq!(titles(&nav[0].children), vec!["Subterfuge"]);
        assert_eq!(nav[0].children[0].path, "/blog/#section-game-dev/subterfuge");
        assert_eq!(
            titles(&nav[0].children[0].children),
            vec!["Choosing a Game Engine"]
        );
        assert_eq!(titles(&nav[2].children), vec!["Architecture", "Client API"]);
    }

    #[test]
    fn folds_sections_beyond_depth() {
        let nav = build_sidebar(&sample(), 1, "/blog/");

        assert_eq!(titles(&nav[0].children), vec!["Choosing a Game Engine"]);
    }

    #[test]
    fn zero_depth_is_flat() {
        let nav = build_sidebar(&sample(), 0, "/blog/");

        assert_eq!(nav.len(), 5);
        assert!(nav.iter().all(|i| i.children.is_empty()));
    }

    #[test]
    fn hides_and_orders_articles() {
        let mut entries = sample();
        entries[3].order = Some(10);
        entries[4].order = Some(1);
        entries[1].in_nav = false;

        let nav = build_sidebar(&entries, 4, "/blog/");

        assert_eq!(titles(&nav[1].children), vec!["Stuck Terminating"]);
        assert_eq!(titles(&nav[2].children), vec!["Client API", "Architecture"]);
    }

    #[test]
    fn finds_neighbours_across_sections() {
        let nav = build_sidebar(&sample(), 4, "/blog/");

        let (prev, next) = neighbours(&nav, "/article/kubernetes/highly-available-disks/");
        assert_eq!(prev.unwrap().title, "Choosing a Game Engine");
        assert_eq!(next.unwrap().title, "Stuck Terminating");

        let (prev, next) = neighbours(&nav, "/article/prometheus/2-client-api/");
        assert_eq!(prev.unwrap().title, "Architecture");
        assert!(next.is_none());

        assert_eq!(neighbours(&nav, "/nowhere/"), (None, None));
    }

    #[test]
    fn marks_active_path() {
        let mut nav = build_sidebar(&sample(), 4, "/blog/");

        assert!(mark_active(&mut nav, "/article/game-dev/subterfuge/choosing-a-game-engine/"));

        assert!(nav[0].active);
        assert!(nav[0].children[0].active);
        assert!(nav[0].children[0].children[0].active);
        assert!(!nav[1].active);
    }

    #[test]
    fn top_links_respect_base_url() {
        let links = vec![
            NavLink {
                text: "Blog".to_string(),
                link: "/blog/".to_string(),
            },
            NavLink {
                text: "GitHub".to_string(),
                link: "https://github.com".to_string(),
            },
        ];

        let top = top_links(&links, "/site/", "/site/blog/");

        assert_eq!(top[0].link, "/site/blog/");
        assert!(top[0].active);
        assert_eq!(top[1].link, "https://github.com");
        assert!(!top[1].active);
    }

    #[test]
    fn section_anchors_keep_nesting_apart() {
        let flat = section_anchor(&["game-dev".to_string()]);
        let nested = section_anchor(&["game".to_string(), "dev".to_string()]);

        assert_eq!(flat, "section-game-dev");
        assert_eq!(nested, "section-game/dev");
        assert_ne!(flat, nested);
    }

    #[test]
    fn section_titles() {
        assert_eq!(section_title("game-dev"), "Game Dev");
        assert_eq!(section_title("microelectronics"), "Microelectronics");
        assert_eq!(section_title("snake_case-name"), "Snake Case Name");
    }
}
