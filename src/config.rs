//! Configuration logic for folio.
//!
//! This module handles the deserialization of `folio.toml`, provides sane
//! defaults for the directory settings, and turns the raw file into a
//! validated [`Site`]. The file is split into tables (`[site]`,
//! `[[socials]]`, `[icons]`, `[[sandboxes]]`, `[build]`) to keep it organized.

use crate::error::{ConfigDiagnostics, ConfigError};
use crate::sandbox::SandboxEmbed;
use crate::site::{Site, SiteConfig, validate_social_link};
use crate::social::{IconRef, IconRegistry, IconsConfig, SocialLink, SocialMediaType};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "folio.toml";

/// The starter project written by `folio init`.
#[derive(RustEmbed)]
#[folder = "assets/default_site/"]
pub struct DefaultSite;

/// The root configuration schema for a folio project.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    // --- Directory Settings ---

    /// Directory containing post Markdown files. Only their front matter is
    /// read, for the listing pages. Defaults to `./posts`.
    #[serde(default = "default_posts")]
    pub posts_dir: PathBuf,

    /// Target directory for the generated site. Defaults to `./dist`.
    #[serde(default = "default_output")]
    pub output_dir: PathBuf,

    /// Directory holding the Tera templates. Defaults to `./templates`.
    #[serde(default = "default_templates")]
    pub templates_dir: PathBuf,

    /// Raw assets (images, icon sprite, scripts) copied to the output as is.
    /// Defaults to `./public`.
    #[serde(default = "default_static")]
    pub static_dir: PathBuf,

    // --- Site Model ---

    /// Site identity: URL, author, title, description, preview image.
    pub site: SiteConfig,

    /// Social links in display order.
    #[serde(default)]
    pub socials: Vec<SocialEntry>,

    #[serde(default)]
    pub icons: IconsConfig,

    // --- Presentation ---

    /// Code sandboxes that templates can embed by id.
    #[serde(default)]
    pub sandboxes: Vec<SandboxEmbed>,

    #[serde(default)]
    pub build: BuildSettings,
}

/// A `[[socials]]` entry before its platform name has been checked.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SocialEntry {
    pub name: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub icon: Option<IconRef>,
    #[serde(default = "default_bool_true")]
    pub active: bool,
    #[serde(default)]
    pub title: String,
}

/// Flags that tune the build.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BuildSettings {
    /// Wipe the output directory before every build.
    #[serde(default = "default_bool_true")]
    pub clean_output: bool,

    /// Render listing pages on the rayon pool.
    #[serde(default = "default_bool_true")]
    pub parallel: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            clean_output: true,
            parallel: true,
        }
    }
}

impl Config {
    pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let src = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&src)
    }

    /// The configuration shipped inside the binary.
    pub fn embedded_default() -> Result<Self, ConfigError> {
        let file = DefaultSite::get(CONFIG_FILE).ok_or_else(|| {
            ConfigError::Io(
                PathBuf::from(CONFIG_FILE),
                io::Error::new(io::ErrorKind::NotFound, "not embedded in this build"),
            )
        })?;
        let src = String::from_utf8_lossy(&file.data);
        Self::from_toml(&src)
    }

    pub fn sandbox(&self, id: &str) -> Option<&SandboxEmbed> {
        self.sandboxes.iter().find(|s| s.id == id)
    }

    /// Validates every section in one pass and freezes the site model.
    ///
    /// All invariant violations are reported together; warnings travel with
    /// the returned [`Site`].
    pub fn to_site(&self) -> Result<Site, ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        let icons = IconRegistry::from_config(&self.icons, &self.site.site_url);

        self.site.validate(&mut diag);

        let mut socials = Vec::with_capacity(self.socials.len());
        for (i, entry) in self.socials.iter().enumerate() {
            match entry.name.parse::<SocialMediaType>() {
                Ok(name) => {
                    let link = SocialLink {
                        name,
                        href: entry.href.clone(),
                        icon: entry.icon.clone(),
                        active: entry.active,
                        title: entry.title.clone(),
                    };
                    validate_social_link(i, &link, &icons, &mut diag);
                    socials.push(link);
                }
                Err(msg) => diag.error_with_hint(
                    format!("socials[{i}].name"),
                    msg,
                    format!("one of: {}", platform_list()),
                ),
            }
        }

        let mut seen = HashSet::new();
        for (i, sandbox) in self.sandboxes.iter().enumerate() {
            if let Err(e) = sandbox.validate() {
                diag.error(format!("sandboxes[{i}]"), e.to_string());
            }
            if !seen.insert(sandbox.id.as_str()) {
                diag.error(
                    format!("sandboxes[{i}].id"),
                    format!("duplicate sandbox id `{}`", sandbox.id),
                );
            }
        }

        let warnings = diag.into_result().map_err(ConfigError::Diagnostics)?;
        Ok(Site::from_checked(self.site.clone(), socials, icons, warnings))
    }
}

fn platform_list() -> String {
    SocialMediaType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// --- Default value providers ---

fn default_posts() -> PathBuf { PathBuf::from("./posts") }
fn default_output() -> PathBuf { PathBuf::from("./dist") }
fn default_templates() -> PathBuf { PathBuf::from("./templates") }
fn default_static() -> PathBuf { PathBuf::from("./public") }
fn default_bool_true() -> bool { true }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigWarning;
    use crate::social::IconProps;

    const MINIMAL: &str = r#"
        [site]
        site_url = "https://example.com/"
        author = "Jane Doe"
        desc = "Personal blog"
        title = "Jane Doe"
        og_image = "images/pic.png"
        keywords = "blog, tech"
        post_per_page = 3

        [[socials]]
        name = "Github"
        href = "https://github.com/jane"
        title = "Jane on Github"

        [[socials]]
        name = "Mail"
        href = "mailto:a@b.com"
        title = "Email"
        active = false

        [[socials]]
        name = "Cal.com"
        href = "https://cal.com/jane"
        title = "Book a call"
    "#;

    fn error_fields(err: ConfigError) -> Vec<String> {
        match err {
            ConfigError::Diagnostics(diag) => {
                diag.errors().iter().map(|e| e.field.clone()).collect()
            }
            other => panic!("expected diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(config.posts_dir, PathBuf::from("./posts"));
        assert_eq!(config.output_dir, PathBuf::from("./dist"));
        assert!(config.build.clean_output);
        assert_eq!(config.icons.sprite, "icons.svg");
        assert!(config.sandboxes.is_empty());
    }

    #[test]
    fn test_social_order_and_activity() {
        let site = Config::from_toml(MINIMAL).unwrap().to_site().unwrap();
        let names: Vec<_> = site.social_links().iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            vec![
                SocialMediaType::Github,
                SocialMediaType::Mail,
                SocialMediaType::CalCom
            ]
        );
        let visible = site.visible_social_links(&IconProps::default());
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[1].icon_id, "calendar");
    }

    #[test]
    fn test_unknown_platform_is_an_invariant_violation() {
        let src = MINIMAL.replace(r#"name = "Github""#, r#"name = "Myspace""#);
        let err = Config::from_toml(&src).unwrap().to_site().unwrap_err();
        assert_eq!(error_fields(err), vec!["socials[0].name"]);
    }

    #[test]
    fn test_errors_from_all_sections_reported_together() {
        let src = MINIMAL
            .replace("https://example.com/", "https://example.com")
            .replace("post_per_page = 3", "post_per_page = 0")
            .replace(r#"name = "Cal.com""#, r#"name = "Calcom""#);
        let err = Config::from_toml(&src).unwrap().to_site().unwrap_err();
        assert_eq!(
            error_fields(err),
            vec!["site.site_url", "site.post_per_page", "socials[2].name"]
        );
    }

    #[test]
    fn test_missing_site_table_fails_to_parse() {
        let err = Config::from_toml("posts_dir = \"posts\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_custom_icon_is_registered() {
        let src = format!(
            "{MINIMAL}\n[icons]\nsprite = \"/sprite.svg\"\n[icons.custom]\nenvelope = \"/extra.svg#envelope\"\n"
        )
        .replace(
            "title = \"Email\"",
            "title = \"Email\"\nicon = \"envelope\"",
        );
        let site = Config::from_toml(&src).unwrap().to_site().unwrap();
        assert!(site.warnings().is_empty());
        assert!(site.icons().contains("envelope"));
    }

    #[test]
    fn test_icons_follow_a_sub_path_site_url() {
        let src = MINIMAL.replace("https://example.com/", "https://example.github.io/blog/");
        let site = Config::from_toml(&src).unwrap().to_site().unwrap();
        let visible = site.visible_social_links(&IconProps::default());
        let icon = visible[0].icon_html.replace("&#x2F;", "/");
        assert!(icon.contains(r#"href="https://example.github.io/blog/icons.svg#github""#));
    }

    #[test]
    fn test_unknown_icon_warns_but_builds() {
        let src = MINIMAL.replace(
            "title = \"Book a call\"",
            "title = \"Book a call\"\nicon = \"phone\"",
        );
        let site = Config::from_toml(&src).unwrap().to_site().unwrap();
        assert!(matches!(
            site.warnings(),
            [ConfigWarning::MissingIcon { requested: Some(id), .. }] if id == "phone"
        ));
    }

    #[test]
    fn test_sandbox_validation_and_lookup() {
        let src = format!(
            r#"{MINIMAL}
            [[sandboxes]]
            id = "intro"
            template = "vanilla-ts"

            [[sandboxes]]
            id = "intro"
            template = "react"
            [sandboxes.options]
            active_file = "App.js"
            "#
        );
        let config = Config::from_toml(&src).unwrap();
        assert_eq!(config.sandbox("intro").map(|s| s.id.as_str()), Some("intro"));
        let err = config.to_site().unwrap_err();
        assert_eq!(error_fields(err), vec!["sandboxes[1]", "sandboxes[1].id"]);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, MINIMAL).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.site.post_per_page, 3);
    }

    #[test]
    fn test_embedded_default_is_valid() {
        let config = Config::embedded_default().unwrap();
        let site = config.to_site().unwrap();
        assert!(site.config().site_url.ends_with('/'));
        assert!(!site.social_links().is_empty());
    }
}
