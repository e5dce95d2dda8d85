//! Front matter of post files, for the listing pages.

use crate::models::Post;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
struct Metadata {
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    draft: bool,
}

/// Splits `+++` (TOML) or `---` (YAML) front matter from the body.
///
/// Unreadable front matter leaves every field at its default; the slug
/// stands in for a missing title.
pub fn parse_frontmatter(raw: &str, slug: &str) -> Post {
    let mut meta = Metadata::default();
    let mut content = raw.to_string();

    let (delimiter, is_toml) = if raw.starts_with("+++") {
        ("+++", true)
    } else if raw.starts_with("---") {
        ("---", false)
    } else {
        ("", false)
    };

    if !delimiter.is_empty() {
        let parts: Vec<&str> = raw.splitn(3, delimiter).collect();
        if parts.len() == 3 {
            let fm_str = parts[1];
            content = parts[2].trim().to_string();

            let parsed = if is_toml {
                parse_toml_metadata(fm_str)
            } else {
                serde_yaml::from_str(fm_str).ok()
            };
            if let Some(m) = parsed {
                meta = m;
            }
        }
    }

    let date = meta.date.as_deref().and_then(parse_date);

    Post {
        slug: slug.to_string(),
        title: meta.title.unwrap_or_else(|| slug.to_string()),
        date: date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        date_display: date.map(|d| d.format("%b %-d, %Y").to_string()).unwrap_or_default(),
        description: meta.description.unwrap_or_default(),
        tags: meta.tags,
        draft: meta.draft,
        raw_content: content,
    }
}

/// TOML dates are a native type; turn them into text before deserializing.
fn parse_toml_metadata(src: &str) -> Option<Metadata> {
    let mut table: toml::Table = toml::from_str(src).ok()?;
    if let Some(toml::Value::Datetime(dt)) = table.get("date") {
        let text = dt.to_string();
        table.insert("date".to_string(), toml::Value::String(text));
    }
    toml::Value::Table(table).try_into().ok()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Every non-draft `*.md` in `dir`, newest first. A missing directory is an
/// empty blog, not an error.
pub fn load_posts(dir: &Path) -> io::Result<Vec<Post>> {
    let mut posts = Vec::new();
    if !dir.exists() {
        return Ok(posts);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let raw = fs::read_to_string(&path)?;
        let post = parse_frontmatter(&raw, slug);
        if !post.draft {
            posts.push(post);
        }
    }

    // ISO dates sort lexically; ties fall back to slug for a stable order
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let raw = "---\ntitle: Hello World\ndate: 2024-01-05\ndescription: First post\ntags: [rust, web]\n---\n\nBody text";
        let post = parse_frontmatter(raw, "hello-world");
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.date, "2024-01-05");
        assert_eq!(post.date_display, "Jan 5, 2024");
        assert_eq!(post.description, "First post");
        assert_eq!(post.tags, vec!["rust", "web"]);
        assert_eq!(post.raw_content, "Body text");
    }

    #[test]
    fn test_toml_frontmatter_with_native_date() {
        let raw = "+++\ntitle = \"Toml Post\"\ndate = 2023-12-31\ndraft = true\n+++\nBody";
        let post = parse_frontmatter(raw, "toml-post");
        assert_eq!(post.title, "Toml Post");
        assert_eq!(post.date, "2023-12-31");
        assert!(post.draft);
    }

    #[test]
    fn test_rfc3339_date() {
        let raw = "---\ndate: \"2024-03-02T10:00:00+01:00\"\n---\n";
        assert_eq!(parse_frontmatter(raw, "x").date, "2024-03-02");
    }

    #[test]
    fn test_no_frontmatter_uses_slug() {
        let post = parse_frontmatter("Just text", "plain");
        assert_eq!(post.title, "plain");
        assert!(post.date.is_empty());
        assert_eq!(post.raw_content, "Just text");
    }

    #[test]
    fn test_broken_frontmatter_keeps_defaults() {
        let post = parse_frontmatter("---\ntitle: [unclosed\n---\nBody", "broken");
        assert_eq!(post.title, "broken");
        assert_eq!(post.raw_content, "Body");
    }

    #[test]
    fn test_load_posts_sorted_and_drafts_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("old.md"), "---\ntitle: Old\ndate: 2022-01-01\n---\n").unwrap();
        fs::write(dir.path().join("new.md"), "---\ntitle: New\ndate: 2024-06-01\n---\n").unwrap();
        fs::write(
            dir.path().join("wip.md"),
            "---\ntitle: WIP\ndate: 2025-01-01\ndraft: true\n---\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let posts = load_posts(dir.path()).unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_posts(&dir.path().join("nope")).unwrap().is_empty());
    }
}
