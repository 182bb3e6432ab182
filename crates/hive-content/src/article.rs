//! Markdown article parser.

use std::collections::HashSet;

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// A parsed article.
#[derive(Debug, Clone)]
pub struct Article {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Errors that can occur when parsing an article.
#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Parse an article.
///
/// Extracts frontmatter and builds a table of contents from the headings.
pub fn parse_article(source: &str) -> Result<Article, ArticleError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    let mut toc = Vec::new();
    let mut used_ids = HashSet::new();
    let mut current_heading: Option<(u8, String)> = None;

    for event in Parser::new_ext(content, markdown_options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level as u8, String::new()));
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&text);
                }
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current_heading.take() {
                    let id = unique_anchor(heading_anchor(&title), &mut used_ids);
                    toc.push(TocEntry { title, id, level });
                }
            }

            _ => {}
        }
    }

    Ok(Article {
        frontmatter,
        content: content.to_string(),
        toc,
    })
}

impl Article {
    /// Title from frontmatter, falling back to the first level-1 heading.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.title.as_deref())
            .or_else(|| {
                self.toc
                    .iter()
                    .find(|e| e.level == 1)
                    .map(|e| e.title.as_str())
            })
    }

    pub fn description(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.description.as_deref())
    }

    /// Navigation order from frontmatter.
    pub fn order(&self) -> Option<i32> {
        self.frontmatter.as_ref().and_then(|f| f.order)
    }

    /// Whether the article should appear in the sidebar.
    pub fn in_nav(&self) -> bool {
        self.frontmatter.as_ref().map_or(true, |f| f.nav)
    }

    /// Render the body to HTML.
    ///
    /// Headings get an `id` matching their table of contents anchor.
    pub fn render_html(&self) -> String {
        let mut anchors = self.toc.iter().map(|e| e.id.clone());

        let events = Parser::new_ext(&self.content, markdown_options()).map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => Event::Start(Tag::Heading {
                level,
                id: anchors.next().map(CowStr::from),
                classes,
                attrs,
            }),
            other => other,
        });

        let mut html_output = String::new();
        html::push_html(&mut html_output, events);
        html_output
    }
}

/// Convert a heading to a URL-safe anchor.
pub fn heading_anchor(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Suffix repeated anchors with `-1`, `-2`, ... so ids stay unique in a page.
fn unique_anchor(base: String, used: &mut HashSet<String>) -> String {
    let mut id = base.clone();
    let mut n = 0;
    while !used.insert(id.clone()) {
        n += 1;
        id = format!("{}-{}", base, n);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_article() {
        let source = r#"---
title: Choosing a Game Engine
description: Why Subterfuge moved engines
---

# Choosing a Game Engine

Some intro.

## Requirements

Text.

### Networking

```rust
fn main() {}
```
"#;

        let article = parse_article(source).unwrap();

        assert_eq!(article.title(), Some("Choosing a Game Engine"));
        assert_eq!(article.description(), Some("Why Subterfuge moved engines"));

        assert_eq!(article.toc.len(), 3);
        assert_eq!(article.toc[0].level, 1);
        assert_eq!(article.toc[1].title, "Requirements");
        assert_eq!(article.toc[1].id, "requirements");
        assert_eq!(article.toc[2].level, 3);
    }

    #[test]
    fn title_falls_back_to_first_heading() {
        let article = parse_article("Intro\n\n## Minor\n\n# Main Title\n").unwrap();

        assert!(article.frontmatter.is_none());
        assert_eq!(article.title(), Some("Main Title"));
    }

    #[test]
    fn untitled_article_has_no_title() {
        let article = parse_article("Just text.").unwrap();

        assert_eq!(article.title(), None);
        assert!(article.in_nav());
    }

    #[test]
    fn inline_code_is_part_of_heading() {
        let article = parse_article("## The `kubectl` CLI").unwrap();

        assert_eq!(article.toc[0].title, "The kubectl CLI");
        assert_eq!(article.toc[0].id, "the-kubectl-cli");
    }

    #[test]
    fn rendered_headings_carry_anchor_ids() {
        let article = parse_article("# Alerts\n\n## Alert Rules\n\nBody text.").unwrap();

        let html = article.render_html();

        assert!(html.contains(r#"<h1 id="alerts">Alerts</h1>"#));
        assert!(html.contains(r#"<h2 id="alert-rules">Alert Rules</h2>"#));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn repeated_headings_get_distinct_anchors() {
        let article =
            parse_article("## Example

One.

## Example

Two.

## Example 1

## Example
")
                .unwrap();

        let ids: Vec<&str> = article.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["example", "example-1", "example-1-1", "example-2"]);

        let html = article.render_html();
        assert!(html.contains(r#"<h2 id="example">Example</h2>"#));
        assert!(html.contains(r#"<h2 id="example-1">Example</h2>"#));
        assert!(html.contains(r#"<h2 id="example-2">Example</h2>"#));
    }

    #[test]
    fn renders_tables() {
        let article = parse_article("| a | b |\n|---|---|\n| 1 | 2 |\n").unwrap();

        assert!(article.render_html().contains("<table>"));
    }

    #[test]
    fn heading_anchor_works() {
        assert_eq!(heading_anchor("Hello World"), "hello-world");
        assert_eq!(heading_anchor("API Reference"), "api-reference");
        assert_eq!(heading_anchor("Button (Primary)"), "button-primary");
        assert_eq!(heading_anchor("  Multiple   Spaces  "), "multiple-spaces");
    }
}
