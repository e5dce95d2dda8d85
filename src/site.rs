//! The site model: metadata plus the ordered social links.
//!
//! A [`Site`] can only be built through [`Site::new`], which validates every
//! invariant up front. Once built it is never mutated, so page renders can
//! share one `&Site` across threads.

use crate::error::{ConfigDiagnostics, ConfigWarning};
use crate::head::resolve_url;
use crate::social::{
    IconProps, IconRegistry, IconSource, SocialLink, VisibleSocialLink, visible_links,
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Site-wide metadata, the `[site]` table of `folio.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute URL of the site root, always ending in `/`.
    #[serde(alias = "siteUrl")]
    pub site_url: String,

    pub author: String,

    /// Used for the description and open-graph meta tags.
    #[serde(default)]
    pub desc: String,

    pub title: String,

    /// Preview image, relative to `site_url` or absolute.
    #[serde(default, alias = "ogImage")]
    pub og_image: String,

    /// Comma-separated, passed through untouched.
    #[serde(default)]
    pub keywords: String,

    /// Page size of every post listing.
    #[serde(default = "default_post_per_page", alias = "postPerPage")]
    pub post_per_page: usize,
}

fn default_post_per_page() -> usize {
    3
}

impl SiteConfig {
    /// Records every violated invariant in `diag`.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_site_url(&self.site_url, diag);

        if self.author.trim().is_empty() {
            diag.error("site.author", "must not be empty");
        }
        if self.title.trim().is_empty() {
            diag.error("site.title", "must not be empty");
        }
        if self.desc.trim().is_empty() {
            diag.warn(ConfigWarning::EmptyDescription);
        }
        if self.post_per_page == 0 {
            diag.error_with_hint(
                "site.post_per_page",
                "must be greater than 0",
                "e.g. post_per_page = 3",
            );
        }

        // only meaningful once the base itself parses
        if !self.og_image.is_empty() && Url::parse(&self.site_url).is_ok() {
            if let Err(e) = resolve_url(&self.site_url, &self.og_image) {
                diag.error(
                    "site.og_image",
                    format!("cannot be resolved against site_url: {e}"),
                );
            }
        }
    }
}

fn validate_site_url(site_url: &str, diag: &mut ConfigDiagnostics) {
    const FIELD: &str = "site.site_url";
    const HINT: &str = "use format like https://example.com/";

    if site_url.is_empty() {
        diag.error_with_hint(FIELD, "must not be empty", HINT);
        return;
    }
    match Url::parse(site_url) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.error_with_hint(
                    FIELD,
                    format!("scheme '{}' not supported, must be http or https", parsed.scheme()),
                    HINT,
                );
            }
            if parsed.host_str().is_none() {
                diag.error_with_hint(FIELD, "URL must have a valid host", HINT);
            }
        }
        Err(e) => diag.error_with_hint(FIELD, format!("invalid URL: {e}"), HINT),
    }
    if !site_url.ends_with('/') {
        diag.error_with_hint(
            FIELD,
            "must end with `/`",
            format!("site_url = \"{site_url}/\""),
        );
    }
}

/// Records empty labels/targets and unresolvable icons for `socials[index]`.
pub fn validate_social_link(
    index: usize,
    link: &SocialLink,
    icons: &IconRegistry,
    diag: &mut ConfigDiagnostics,
) {
    if link.href.trim().is_empty() {
        diag.error(format!("socials[{index}].href"), "must not be empty");
    }
    if link.title.trim().is_empty() {
        diag.error_with_hint(
            format!("socials[{index}].title"),
            "must not be empty",
            "the title is the accessible label of the link",
        );
    }

    match icons.resolve(link).source {
        IconSource::Explicit | IconSource::Default => {}
        IconSource::UnknownReference(requested) => diag.warn(ConfigWarning::MissingIcon {
            field: format!("socials[{index}].icon"),
            platform: link.name,
            requested: Some(requested),
        }),
        IconSource::Placeholder => diag.warn(ConfigWarning::MissingIcon {
            field: format!("socials[{index}].icon"),
            platform: link.name,
            requested: link.icon.as_ref().map(|r| r.as_str().to_string()),
        }),
    }
}

/// The validated, read-only site model.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    socials: Vec<SocialLink>,
    icons: IconRegistry,
    warnings: Vec<ConfigWarning>,
}

impl Site {
    /// Validates and freezes the model. Fails with every violation found.
    pub fn new(
        config: SiteConfig,
        socials: Vec<SocialLink>,
        icons: IconRegistry,
    ) -> Result<Self, ConfigDiagnostics> {
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        for (i, link) in socials.iter().enumerate() {
            validate_social_link(i, link, &icons, &mut diag);
        }
        let warnings = diag.into_result()?;
        Ok(Self {
            config,
            socials,
            icons,
            warnings,
        })
    }

    /// For callers that already ran the same checks over a larger config.
    pub(crate) fn from_checked(
        config: SiteConfig,
        socials: Vec<SocialLink>,
        icons: IconRegistry,
        warnings: Vec<ConfigWarning>,
    ) -> Self {
        Self {
            config,
            socials,
            icons,
            warnings,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Every configured link, inactive ones included, in display order.
    pub fn social_links(&self) -> &[SocialLink] {
        &self.socials
    }

    pub fn icons(&self) -> &IconRegistry {
        &self.icons
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn visible_social_links(&self, props: &IconProps<'_>) -> Vec<VisibleSocialLink> {
        visible_links(&self.socials, &self.icons, props)
    }
}
