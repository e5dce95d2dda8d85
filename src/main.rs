use clap::{Parser as ClapParser, Subcommand};
use folio::config::{CONFIG_FILE, Config, DefaultSite};
use folio::head::{HeadTags, PageMeta};
use folio::social::{IconProps, render_social_links};
use folio::{ConfigError, Site, build, log, logger};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(ClapParser)]
#[command(author, version, about = "folio - a typed home for your blog's identity.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Path to the project configuration.
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Write the starter project into the current directory.
    Init,
    /// Validate the configuration and report every problem.
    Check,
    /// Render the paginated listing pages.
    Build,
    /// Print the <head> tags for a page.
    Head {
        /// Page path relative to the site root, e.g. `page/2/`.
        #[arg(long, default_value = "")]
        path: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Print the rendered social-link list.
    Socials,
    /// Print the mount element of a configured sandbox.
    Sandbox { id: String },
}

fn main() -> anyhow::Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    if let Commands::Init = cli.command {
        println!("folio init v{}", env!("CARGO_PKG_VERSION"));
        init_project(Path::new("."))?;
        logger::success("Project initialized.");
        println!("Done in {:.2}s.", start.elapsed().as_secs_f32());
        return Ok(());
    }

    let config = load_config(&cli.config)?;
    let site = config.to_site()?;
    for warning in site.warnings() {
        log!("warn"; "{warning}");
    }

    match cli.command {
        Commands::Check => {
            logger::success(&format!(
                "{} is valid ({} social links, {} sandboxes).",
                cli.config.display(),
                site.social_links().len(),
                config.sandboxes.len()
            ));
        }
        Commands::Build => {
            println!("folio build v{}", env!("CARGO_PKG_VERSION"));
            let report = build::perform_build(&config, &site, cli.verbose)?;
            if !cli.verbose {
                logger::success(&format!(
                    "{} posts, {} pages in {:.2}s.",
                    report.posts,
                    report.pages.len(),
                    start.elapsed().as_secs_f32()
                ));
            }
        }
        Commands::Head {
            path,
            title,
            description,
            image,
        } => {
            let meta = PageMeta {
                title: title.as_deref(),
                description: description.as_deref(),
                path: &path,
                og_image: image.as_deref(),
            };
            println!("{}", HeadTags::new(site.config(), &meta)?.render()?);
        }
        Commands::Socials => print_socials(&site)?,
        Commands::Sandbox { id } => match config.sandbox(&id) {
            Some(sandbox) => println!("{}", sandbox.render_mount()?),
            None => anyhow::bail!("no sandbox with id `{id}` in {}", cli.config.display()),
        },
        Commands::Init => unreachable!(),
    }
    Ok(())
}

/// Only a missing file points at `folio init`; other read errors surface as is.
fn load_config(path: &Path) -> anyhow::Result<Config> {
    match Config::load(path) {
        Err(ConfigError::Io(path, e)) if e.kind() == io::ErrorKind::NotFound => {
            anyhow::bail!(
                "{} not found. Run 'folio init' to begin.",
                path.display()
            )
        }
        other => Ok(other?),
    }
}

fn print_socials(site: &Site) -> anyhow::Result<()> {
    let html = render_social_links(site.social_links(), site.icons(), &IconProps::default())?;
    if html.is_empty() {
        log!("socials"; "no active social links");
    } else {
        println!("{html}");
    }
    Ok(())
}

/// Writes the embedded starter project under `root`. Files that already
/// exist are kept as they are.
fn init_project(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    logger::step(1, 1, "Extracting starter project...");

    let mut written = Vec::new();
    for file in DefaultSite::iter() {
        let path = root.join(file.as_ref());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let Some(content) = DefaultSite::get(file.as_ref()) else {
            continue;
        };

        if !path.exists() {
            fs::write(&path, content.data)?;
            written.push(path);
        } else {
            log!("init"; "kept existing {}", path.display());
        }
    }
    Ok(written)
}
