//! Built-in Tera partials for the fragments every page shares: the head
//! tags, the social list and the sandbox mount.
//!
//! They are compiled once and rendered with autoescaping on, so every value
//! that reaches an attribute or text node goes through `tera::escape_html`.

use rust_embed::RustEmbed;
use std::sync::LazyLock;
use tera::{Context, Tera};

pub const HEAD: &str = "head.html";
pub const SOCIALS: &str = "socials.html";
pub const SANDBOX: &str = "sandbox.html";

#[derive(RustEmbed)]
#[folder = "assets/partials/"]
struct Partials;

static TERA: LazyLock<tera::Result<Tera>> = LazyLock::new(load);

fn load() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    for file in Partials::iter() {
        let Some(asset) = Partials::get(&file) else {
            continue;
        };
        let src = String::from_utf8_lossy(&asset.data);
        tera.add_raw_template(&file, &src)?;
    }
    Ok(tera)
}

/// Renders the partial `name` with `ctx`.
pub fn render(name: &str, ctx: &Context) -> tera::Result<String> {
    match &*TERA {
        Ok(tera) => tera.render(name, ctx),
        Err(e) => Err(tera::Error::msg(format!("built-in partials failed to load: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_partial_is_embedded() {
        for name in [HEAD, SOCIALS, SANDBOX] {
            assert!(Partials::get(name).is_some(), "{name} missing");
        }
        assert!(TERA.is_ok());
    }

    #[test]
    fn test_unknown_partial_is_an_error() {
        assert!(render("nope.html", &Context::new()).is_err());
    }

    #[test]
    fn test_values_are_escaped() {
        let mut ctx = Context::new();
        ctx.insert("links", &[serde_json::json!({
            "href": "https://example.com/?a=1&b=2",
            "title": "<me>",
            "icon_html": "<svg></svg>",
        })]);
        let html = render(SOCIALS, &ctx).unwrap();
        assert!(html.contains("?a=1&amp;b=2"));
        assert!(html.contains(r#"title="&lt;me&gt;""#));
        assert!(html.contains("<svg></svg>"));
    }
}
