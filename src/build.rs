//! The build engine for folio.
//!
//! Renders the paginated post listings through Tera. Every page reads its
//! head tags, social links, page size and sandbox parameters from the one
//! validated [`Site`], which is shared read-only across the rayon pool.

use crate::config::{Config, DefaultSite};
use crate::frontmatter::load_posts;
use crate::head::{HeadTags, PageMeta};
use crate::logger;
use crate::models::Post;
use crate::pagination::{Page, Paginator};
use crate::site::Site;
use crate::social::{IconProps, render_social_links};
use crate::{debug, log};
use anyhow::{Context as _, Result};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tera::Tera;

/// Name of the listing template.
const INDEX_TEMPLATE: &str = "index.html";

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub pages: Vec<PathBuf>,
}

/// Standard recursive directory copy.
fn copy_dir_all(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(&dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        if ty.is_dir() {
            copy_dir_all(entry.path(), dst.as_ref().join(entry.file_name()))?;
        } else {
            fs::copy(entry.path(), dst.as_ref().join(entry.file_name()))?;
        }
    }
    Ok(())
}

/// Loads the project's templates, falling back to the embedded starter
/// templates when the project has none.
fn init_tera(templates_dir: &Path) -> Result<Tera> {
    if templates_dir.is_dir() {
        let glob = templates_dir.join("**").join("*.html");
        let glob = glob
            .to_str()
            .context("templates directory is not valid UTF-8")?;
        let tera = Tera::new(glob).context("failed to load templates")?;
        if tera.get_template_names().any(|t| t == INDEX_TEMPLATE) {
            return Ok(tera);
        }
        debug!("build"; "no {} in {}, using the built-in one", INDEX_TEMPLATE, templates_dir.display());
    }

    let mut tera = Tera::default();
    for file in DefaultSite::iter() {
        if let Some(name) = file.strip_prefix("templates/") {
            let Some(asset) = DefaultSite::get(&file) else {
                continue;
            };
            let src = String::from_utf8_lossy(&asset.data);
            tera.add_raw_template(name, &src)
                .with_context(|| format!("built-in template {name}"))?;
        }
    }
    Ok(tera)
}

/// Renders one listing page.
fn render_page(
    tera: &Tera,
    site: &Site,
    posts: &[Post],
    page: &Page,
    sandboxes: &BTreeMap<String, String>,
) -> Result<String> {
    let title = format!("Page {}", page.number);
    let meta = PageMeta {
        title: (page.number > 1).then_some(title.as_str()),
        path: &page.path,
        ..PageMeta::default()
    };
    let head = HeadTags::new(site.config(), &meta)
        .with_context(|| format!("head tags for page {}", page.number))?;

    let props = IconProps::default();
    let mut ctx = tera::Context::new();
    ctx.insert("site", site.config());
    ctx.insert("head", &head);
    ctx.insert("head_html", &head.render()?);
    ctx.insert("socials", &site.visible_social_links(&props));
    ctx.insert(
        "socials_html",
        &render_social_links(site.social_links(), site.icons(), &props)?,
    );
    ctx.insert("posts", posts);
    ctx.insert("page", page);
    ctx.insert("sandboxes", sandboxes);

    tera.render(INDEX_TEMPLATE, &ctx)
        .with_context(|| format!("rendering {INDEX_TEMPLATE} for page {}", page.number))
}

/// The orchestrator of the folio build.
pub fn perform_build(config: &Config, site: &Site, verbose: bool) -> Result<BuildReport> {
    let start = Instant::now();

    // --- STEP 1: OUTPUT & STATIC ASSETS ---
    if verbose { logger::step(1, 4, "Preparing output directory..."); }
    if config.build.clean_output && config.output_dir.exists() {
        fs::remove_dir_all(&config.output_dir)
            .with_context(|| format!("cleaning {}", config.output_dir.display()))?;
    }
    fs::create_dir_all(&config.output_dir)?;
    if config.static_dir.exists() {
        copy_dir_all(&config.static_dir, &config.output_dir)
            .with_context(|| format!("copying {}", config.static_dir.display()))?;
    }

    // --- STEP 2: CONTENT INGESTION ---
    if verbose { logger::step(2, 4, "Reading posts..."); }
    let posts = load_posts(&config.posts_dir)
        .with_context(|| format!("reading {}", config.posts_dir.display()))?;
    debug!("build"; "{} posts", posts.len());

    // --- STEP 3: TEMPLATES & EMBEDS ---
    if verbose { logger::step(3, 4, "Loading templates..."); }
    let tera = init_tera(&config.templates_dir)?;
    let mut sandboxes = BTreeMap::new();
    for sandbox in &config.sandboxes {
        sandboxes.insert(sandbox.id.clone(), sandbox.render_mount()?);
    }

    // --- STEP 4: PAGINATED RENDERING ---
    if verbose { logger::step(4, 4, "Rendering listing pages..."); }
    let paginator = Paginator::new(site.config(), posts.len());
    let pages: Vec<Page> = paginator.pages().collect();

    let render = |page: &Page| -> Result<PathBuf> {
        let html = render_page(&tera, site, paginator.slice(&posts, page), page, &sandboxes)?;
        let dest = config.output_dir.join(page.output_file());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, html).with_context(|| format!("writing {}", dest.display()))?;
        debug!("build"; "wrote {}", dest.display());
        Ok(dest)
    };

    let written: Vec<PathBuf> = if config.build.parallel {
        pages.par_iter().map(render).collect::<Result<_>>()?
    } else {
        pages.iter().map(render).collect::<Result<_>>()?
    };

    if verbose {
        log!("build"; "{} posts on {} pages", posts.len(), written.len());
        logger::success(&format!("build complete in {:.2}s.", start.elapsed().as_secs_f32()));
    }

    Ok(BuildReport {
        posts: posts.len(),
        pages: written,
    })
}
