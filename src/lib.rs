//! folio: typed site configuration for a personal blog and portfolio.
//!
//! [`config::Config`] reads `folio.toml`; [`config::Config::to_site`] checks
//! every invariant and yields the read-only [`site::Site`] that all
//! renderers (head tags, social links, pagination, sandbox embeds) consume.

pub mod logger;

pub mod build;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod head;
pub mod models;
pub mod pagination;
pub mod partials;
pub mod sandbox;
pub mod site;
pub mod social;

pub use config::Config;
pub use error::{ConfigError, ConfigWarning};
pub use site::{Site, SiteConfig};
pub use social::{SocialLink, SocialMediaType, default_icon};
