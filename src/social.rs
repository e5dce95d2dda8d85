//! Social links: the closed set of platforms, their default icons, and the
//! list renderer every page uses.

use crate::head::resolve_url;
use crate::partials;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Platforms a social link may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SocialMediaType {
    Github,
    Facebook,
    Instagram,
    LinkedIn,
    Mail,
    Twitter,
    YouTube,
    WhatsApp,
    Snapchat,
    CodePen,
    Discord,
    #[serde(rename = "Cal.com")]
    CalCom,
}

impl SocialMediaType {
    pub const ALL: [SocialMediaType; 12] = [
        SocialMediaType::Github,
        SocialMediaType::Facebook,
        SocialMediaType::Instagram,
        SocialMediaType::LinkedIn,
        SocialMediaType::Mail,
        SocialMediaType::Twitter,
        SocialMediaType::YouTube,
        SocialMediaType::WhatsApp,
        SocialMediaType::Snapchat,
        SocialMediaType::CodePen,
        SocialMediaType::Discord,
        SocialMediaType::CalCom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SocialMediaType::Github => "Github",
            SocialMediaType::Facebook => "Facebook",
            SocialMediaType::Instagram => "Instagram",
            SocialMediaType::LinkedIn => "LinkedIn",
            SocialMediaType::Mail => "Mail",
            SocialMediaType::Twitter => "Twitter",
            SocialMediaType::YouTube => "YouTube",
            SocialMediaType::WhatsApp => "WhatsApp",
            SocialMediaType::Snapchat => "Snapchat",
            SocialMediaType::CodePen => "CodePen",
            SocialMediaType::Discord => "Discord",
            SocialMediaType::CalCom => "Cal.com",
        }
    }
}

impl fmt::Display for SocialMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialMediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocialMediaType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown social platform `{s}`"))
    }
}

/// Icon id used when a platform has no entry of its own.
pub const PLACEHOLDER_ICON: &str = "link";

/// Default icon id for every platform. The match is exhaustive, so a new
/// platform cannot be added without an icon.
pub fn default_icon(tag: SocialMediaType) -> &'static str {
    match tag {
        SocialMediaType::Github => "github",
        SocialMediaType::Facebook => "facebook",
        SocialMediaType::Instagram => "instagram",
        SocialMediaType::LinkedIn => "linkedin",
        SocialMediaType::Mail => "mail",
        SocialMediaType::Twitter => "twitter",
        SocialMediaType::YouTube => "youtube",
        SocialMediaType::WhatsApp => "whatsapp",
        SocialMediaType::Snapchat => "snapchat",
        SocialMediaType::CodePen => "codepen",
        SocialMediaType::Discord => "discord",
        SocialMediaType::CalCom => "calendar",
    }
}

/// Display properties handed to an [`Icon`].
#[derive(Debug, Clone, Copy)]
pub struct IconProps<'a> {
    pub size: u32,
    pub class: &'a str,
}

impl Default for IconProps<'_> {
    fn default() -> Self {
        Self {
            size: 20,
            class: "icon",
        }
    }
}

/// Something that can draw an icon.
pub trait Icon: Send + Sync {
    fn render(&self, props: &IconProps<'_>) -> String;
}

/// An icon drawn from an SVG sprite symbol (`/icons.svg#github`).
#[derive(Debug, Clone)]
pub struct SpriteIcon {
    href: String,
}

impl SpriteIcon {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

impl Icon for SpriteIcon {
    fn render(&self, props: &IconProps<'_>) -> String {
        format!(
            r#"<svg class="{class}" width="{size}" height="{size}" aria-hidden="true" focusable="false"><use href="{href}"></use></svg>"#,
            class = tera::escape_html(props.class),
            size = props.size,
            href = tera::escape_html(&self.href),
        )
    }
}

/// Inline chain-link glyph, needs no sprite.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderIcon;

impl Icon for PlaceholderIcon {
    fn render(&self, props: &IconProps<'_>) -> String {
        format!(
            r#"<svg class="{class}" width="{size}" height="{size}" viewBox="0 0 24 24" aria-hidden="true" focusable="false" fill="none" stroke="currentColor" stroke-width="2"><path d="M10 14a5 5 0 0 0 7 0l3-3a5 5 0 0 0-7-7l-1 1"/><path d="M14 10a5 5 0 0 0-7 0l-3 3a5 5 0 0 0 7 7l1-1"/></svg>"#,
            class = tera::escape_html(props.class),
            size = props.size,
        )
    }
}

/// Name of a registered icon, as written in `folio.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

impl IconRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `[icons]` table of `folio.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconsConfig {
    /// Sprite that holds a symbol for every default icon id. Relative paths
    /// resolve against the site root.
    #[serde(default = "default_sprite")]
    pub sprite: String,

    /// Extra icons by id, each pointing at a sprite symbol or svg file.
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            sprite: default_sprite(),
            custom: BTreeMap::new(),
        }
    }
}

fn default_sprite() -> String {
    "icons.svg".to_string()
}

/// Icons known to the site, by id.
pub struct IconRegistry {
    icons: BTreeMap<String, Box<dyn Icon>>,
    placeholder: Box<dyn Icon>,
}

impl fmt::Debug for IconRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconRegistry")
            .field("icons", &self.icons.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self::from_config(&IconsConfig::default(), "")
    }
}

/// Where a resolved icon came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// The link's own `icon` reference.
    Explicit,
    /// The platform's default mapping.
    Default,
    /// The link named an unregistered icon; the default mapping was used.
    UnknownReference(String),
    /// Neither the link's reference nor the default mapping is registered.
    Placeholder,
}

pub struct ResolvedIcon<'r> {
    pub id: String,
    pub source: IconSource,
    icon: &'r dyn Icon,
}

impl ResolvedIcon<'_> {
    pub fn render(&self, props: &IconProps<'_>) -> String {
        self.icon.render(props)
    }
}

impl IconRegistry {
    /// A registry with no icons; everything resolves to the placeholder.
    pub fn empty() -> Self {
        Self {
            icons: BTreeMap::new(),
            placeholder: Box::new(PlaceholderIcon),
        }
    }

    /// Default icons from the configured sprite, plus any custom entries.
    ///
    /// Relative hrefs are resolved against `site_url`, so a site served from
    /// a sub-path still finds its sprite. When `site_url` does not parse they
    /// stay as written; validation reports the URL itself.
    pub fn from_config(config: &IconsConfig, site_url: &str) -> Self {
        let resolve =
            |href: &str| resolve_url(site_url, href).unwrap_or_else(|_| href.to_string());
        let sprite = resolve(&config.sprite);

        let mut registry = Self::empty();
        for tag in SocialMediaType::ALL {
            let id = default_icon(tag);
            registry.register(id, SpriteIcon::new(format!("{sprite}#{id}")));
        }
        for (id, href) in &config.custom {
            registry.register(id.clone(), SpriteIcon::new(resolve(href)));
        }
        registry
    }

    pub fn register(&mut self, id: impl Into<String>, icon: impl Icon + 'static) {
        self.icons.insert(id.into(), Box::new(icon));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.icons.contains_key(id)
    }

    /// Explicit reference first, then the platform default, then the
    /// placeholder glyph.
    pub fn resolve(&self, link: &SocialLink) -> ResolvedIcon<'_> {
        let mut unknown = None;
        if let Some(icon_ref) = &link.icon {
            if let Some(icon) = self.icons.get(icon_ref.as_str()) {
                return ResolvedIcon {
                    id: icon_ref.as_str().to_string(),
                    source: IconSource::Explicit,
                    icon: icon.as_ref(),
                };
            }
            unknown = Some(icon_ref.as_str().to_string());
        }

        let id = default_icon(link.name);
        match self.icons.get(id) {
            Some(icon) => ResolvedIcon {
                id: id.to_string(),
                source: match unknown {
                    Some(requested) => IconSource::UnknownReference(requested),
                    None => IconSource::Default,
                },
                icon: icon.as_ref(),
            },
            None => ResolvedIcon {
                id: PLACEHOLDER_ICON.to_string(),
                source: IconSource::Placeholder,
                icon: self.placeholder.as_ref(),
            },
        }
    }
}

/// One outbound link in the site's social list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: SocialMediaType,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRef>,
    /// Inactive links stay in the config but are never rendered.
    #[serde(default = "default_active")]
    pub active: bool,
    pub title: String,
}

fn default_active() -> bool {
    true
}

/// A social link as templates see it: active, with its icon already drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleSocialLink {
    pub name: SocialMediaType,
    pub href: String,
    pub title: String,
    pub icon_id: String,
    pub icon_html: String,
}

/// Active links in stored order, each with its resolved icon.
pub fn visible_links(
    links: &[SocialLink],
    registry: &IconRegistry,
    props: &IconProps<'_>,
) -> Vec<VisibleSocialLink> {
    links
        .iter()
        .filter(|link| link.active)
        .map(|link| {
            let icon = registry.resolve(link);
            VisibleSocialLink {
                name: link.name,
                href: link.href.clone(),
                title: link.title.clone(),
                icon_id: icon.id.clone(),
                icon_html: icon.render(props),
            }
        })
        .collect()
}

/// Renders the social list as a `<ul>`. No active links renders nothing.
pub fn render_social_links(
    links: &[SocialLink],
    registry: &IconRegistry,
    props: &IconProps<'_>,
) -> tera::Result<String> {
    let visible = visible_links(links, registry, props);
    if visible.is_empty() {
        return Ok(String::new());
    }

    let mut ctx = tera::Context::new();
    ctx.insert("links", &visible);
    partials::render(partials::SOCIALS, &ctx)
}
