//! `<head>` generation.
//!
//! Title, description, canonical URL and preview image always come from the
//! [`SiteConfig`], optionally narrowed by a page's own [`PageMeta`].

use crate::partials;
use crate::site::SiteConfig;
use serde::Serialize;
use url::Url;

/// Resolves `path` against `site_url`.
///
/// Absolute URLs are returned unchanged, so resolving twice is the same as
/// resolving once. Relative paths follow normal URL joining: `./img/a.png`
/// and `img/a.png` land under `site_url`, `/img/a.png` under its origin.
pub fn resolve_url(site_url: &str, path: &str) -> Result<String, url::ParseError> {
    if Url::parse(path).is_ok() {
        return Ok(path.to_string());
    }
    let base = Url::parse(site_url)?;
    Ok(base.join(path)?.to_string())
}

/// Per-page overrides. Anything left `None` falls back to the site.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageMeta<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    /// Page path relative to the site root; empty for the home page.
    pub path: &'a str,
    pub og_image: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadTags {
    pub title: String,
    pub description: String,
    pub author: String,
    pub keywords: String,
    pub canonical_url: String,
    pub og_image: Option<String>,
}

impl HeadTags {
    pub fn new(site: &SiteConfig, page: &PageMeta<'_>) -> Result<Self, url::ParseError> {
        let title = match page.title {
            Some(t) if !t.is_empty() && t != site.title => format!("{t} | {}", site.title),
            _ => site.title.clone(),
        };

        let og_image = match page.og_image.unwrap_or(site.og_image.as_str()) {
            "" => None,
            image => Some(resolve_url(&site.site_url, image)?),
        };

        Ok(Self {
            title,
            description: page.description.unwrap_or(site.desc.as_str()).to_string(),
            author: site.author.clone(),
            keywords: site.keywords.clone(),
            canonical_url: resolve_url(&site.site_url, page.path)?,
            og_image,
        })
    }

    /// The `<head>` tags, one per line, through the built-in partial.
    pub fn render(&self) -> tera::Result<String> {
        let mut ctx = tera::Context::new();
        ctx.insert("head", self);
        partials::render(partials::HEAD, &ctx)
    }
}
